// render.rs - Per-round reporting hooks called by the designated worker

use std::io::Write;
use std::thread;
use std::time::Duration;

use crate::error::Result;
use crate::grid::{Board, GridState};
use crate::partition::Region;

/// Read-only view of the grid handed to a [`Renderer`] after a round completes.
pub struct Frame<'a> {
    round: u32,
    live: i64,
    grid: &'a GridState,
}

impl<'a> Frame<'a> {
    pub(crate) fn new(round: u32, live: i64, grid: &'a GridState) -> Self {
        Self { round, live, grid }
    }

    /// 0 for the initial board, then 1..=rounds.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn live_cells(&self) -> i64 {
        self.live
    }

    pub fn snapshot(&self) -> Board {
        self.grid.snapshot()
    }
}

/// Consumer of simulation progress.
///
/// `render` runs synchronously on worker 0 while every other worker waits, so
/// it must not block indefinitely.
pub trait Renderer {
    /// Whether `render` should be called at all. When false the per-round
    /// render step and its barrier are skipped.
    fn wants_frames(&self) -> bool {
        true
    }

    /// Called once before the workers start, only when partition printing is on.
    fn report_partition(&mut self, _regions: &[Region]) -> Result<()> {
        Ok(())
    }

    fn render(&mut self, frame: &Frame<'_>) -> Result<()>;
}

/// Renderer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn wants_frames(&self) -> bool {
        false
    }

    fn render(&mut self, _frame: &Frame<'_>) -> Result<()> {
        Ok(())
    }
}

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Terminal reporter: partition table, plus an ASCII animation when enabled.
pub struct TextRenderer<W: Write> {
    out: W,
    animate: bool,
    clear: bool,
    delay: Duration,
}

impl<W: Write> TextRenderer<W> {
    /// Partition table only; no frames.
    pub fn summary(out: W) -> Self {
        Self {
            out,
            animate: false,
            clear: false,
            delay: Duration::ZERO,
        }
    }

    /// Clear the terminal and redraw the board every round, pausing `delay` after each.
    pub fn ascii(out: W, delay: Duration) -> Self {
        Self {
            out,
            animate: true,
            clear: true,
            delay,
        }
    }

    /// Keep previous frames on screen instead of clearing.
    pub fn without_clear(mut self) -> Self {
        self.clear = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn wants_frames(&self) -> bool {
        self.animate
    }

    fn report_partition(&mut self, regions: &[Region]) -> Result<()> {
        for region in regions {
            writeln!(self.out, "{region}")?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        if self.clear {
            self.out.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        writeln!(self.out, "Round: {}", frame.round())?;
        write!(self.out, "{}", frame.snapshot())?;
        writeln!(self.out, "Live cells: {}\n", frame.live_cells())?;
        self.out.flush()?;

        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        Ok(())
    }
}
