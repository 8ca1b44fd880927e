// grid.rs - Double-buffered toroidal grid shared by all workers

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

// Cells and the buffer index use relaxed atomics. Cross-thread ordering comes
// from the round barrier, whose mutex every worker passes through between a
// write and any read of the same cell.

/// Wrap a possibly negative index onto `0..dim`.
#[inline]
pub fn wrap(idx: isize, dim: usize) -> usize {
    let dim = dim as isize;
    (((idx % dim) + dim) % dim) as usize
}

/// Two same-sized row-major cell buffers tagged current and next.
pub struct GridState {
    rows: usize,
    cols: usize,
    buffers: [Box<[AtomicBool]>; 2],
    current: AtomicUsize,
}

impl GridState {
    /// Empty grid. Callers validate `rows, cols >= 1` beforehand.
    pub fn new(rows: usize, cols: usize) -> Self {
        let buffer = || -> Box<[AtomicBool]> {
            (0..rows * cols).map(|_| AtomicBool::new(false)).collect()
        };
        Self {
            rows,
            cols,
            buffers: [buffer(), buffer()],
            current: AtomicUsize::new(0),
        }
    }

    /// Grid whose current buffer has the given cells alive.
    pub fn with_alive(rows: usize, cols: usize, alive: &[(usize, usize)]) -> Self {
        let grid = Self::new(rows, cols);
        let current = grid.current_buffer();
        for &(row, col) in alive {
            current[row * cols + col].store(true, Ordering::Relaxed);
        }
        grid
    }

    fn current_buffer(&self) -> &[AtomicBool] {
        &self.buffers[self.current.load(Ordering::Relaxed)]
    }

    fn next_buffer(&self) -> &[AtomicBool] {
        &self.buffers[self.current.load(Ordering::Relaxed) ^ 1]
    }

    /// Current-buffer state at a toroidally wrapped position.
    #[inline]
    pub fn read(&self, row: isize, col: isize) -> bool {
        let r = wrap(row, self.rows);
        let c = wrap(col, self.cols);
        self.current_buffer()[r * self.cols + c].load(Ordering::Relaxed)
    }

    /// Current-buffer state at an in-range position.
    #[inline]
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.current_buffer()[row * self.cols + col].load(Ordering::Relaxed)
    }

    /// Store into the next buffer. Only the worker owning `(row, col)` may call this.
    #[inline]
    pub fn write(&self, row: usize, col: usize, alive: bool) {
        self.next_buffer()[row * self.cols + col].store(alive, Ordering::Relaxed);
    }

    /// Exchange the current and next roles.
    ///
    /// Must run exactly once per round while every worker is parked at the
    /// round barrier; [`crate::barrier::RoundBarrier::wait_then`] provides that.
    pub fn swap(&self) {
        self.current.fetch_xor(1, Ordering::Relaxed);
    }

    /// Number of alive cells in the current buffer.
    pub fn count_alive(&self) -> usize {
        self.current_buffer()
            .iter()
            .filter(|cell| cell.load(Ordering::Relaxed))
            .count()
    }

    /// Owned copy of the current buffer.
    pub fn snapshot(&self) -> Board {
        Board {
            rows: self.rows,
            cols: self.cols,
            cells: self
                .current_buffer()
                .iter()
                .map(|cell| cell.load(Ordering::Relaxed))
                .collect(),
        }
    }
}

/// Plain snapshot of one grid buffer, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Board {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col]
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Coordinates of alive cells in row-major order.
    pub fn alive_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(i, _)| (i / self.cols, i % self.cols))
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                f.write_str(if self.is_alive(row, col) { " @" } else { " ." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
