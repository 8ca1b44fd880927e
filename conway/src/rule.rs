// rule.rs - Conway's B3/S23 rule on the toroidal grid

use crate::grid::GridState;

const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Alive cells among the 8 wrapped neighbors of `(row, col)` in the current buffer.
pub fn live_neighbors(grid: &GridState, row: usize, col: usize) -> u8 {
    let (row, col) = (row as isize, col as isize);
    NEIGHBOR_OFFSETS
        .iter()
        .filter(|&&(dr, dc)| grid.read(row + dr, col + dc))
        .count() as u8
}

#[inline]
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true, // Survival
        (false, 3) => true,            // Birth
        _ => false,                    // Death or stays dead
    }
}
