// patterns.rs - Named seed patterns and random soups

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::WorldFile;
use crate::error::{GolError, Result};

/// A named shape, with cells given relative to its top-left corner.
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "block",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
    },
    Pattern {
        name: "pulsar",
        cells: &[
            // Top half
            (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
            (2, 0), (2, 5), (2, 7), (2, 12),
            (3, 0), (3, 5), (3, 7), (3, 12),
            (4, 0), (4, 5), (4, 7), (4, 12),
            (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
            // Bottom half (mirrored)
            (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
            (8, 0), (8, 5), (8, 7), (8, 12),
            (9, 0), (9, 5), (9, 7), (9, 12),
            (10, 0), (10, 5), (10, 7), (10, 12),
            (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
        ],
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    },
    Pattern {
        name: "gosper-glider-gun",
        cells: &[
            (4, 0), (4, 1), (5, 0), (5, 1),
            (4, 10), (5, 10), (6, 10), (3, 11), (7, 11), (2, 12), (8, 12),
            (2, 13), (8, 13), (5, 14), (3, 15), (7, 15), (4, 16), (5, 16),
            (6, 16), (5, 17), (2, 20), (3, 20), (4, 20), (2, 21), (3, 21),
            (4, 21), (1, 22), (5, 22), (0, 24), (1, 24), (5, 24), (6, 24),
            (2, 34), (3, 34), (2, 35), (3, 35),
        ],
    },
];

/// Name accepted by [`world_from_pattern`] for a random soup.
pub const RANDOM: &str = "random";

impl Pattern {
    pub fn find(name: &str) -> Option<&'static Pattern> {
        PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Bounding box as `(height, width)`.
    pub fn extent(&self) -> (usize, usize) {
        self.cells.iter().fold((0, 0), |(h, w), &(r, c)| (h.max(r + 1), w.max(c + 1)))
    }

    /// Cells placed at the centre of a `rows x cols` torus, wrapping if it doesn't fit.
    pub fn centered(&self, rows: usize, cols: usize) -> Vec<(usize, usize)> {
        let (height, width) = self.extent();
        let top = rows.saturating_sub(height) / 2;
        let left = cols.saturating_sub(width) / 2;
        let mut cells: Vec<_> = self
            .cells
            .iter()
            .map(|&(r, c)| ((top + r) % rows, (left + c) % cols))
            .collect();
        cells.sort_unstable();
        cells.dedup();
        cells
    }
}

/// About one cell in three alive, reproducible from `seed`.
pub fn random_soup(rows: usize, cols: usize, seed: u64) -> Vec<(usize, usize)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut alive = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            if rng.gen_ratio(1, 3) {
                alive.push((row, col));
            }
        }
    }
    alive
}

/// Build a world from a pattern name (or [`RANDOM`]) instead of a file.
pub fn world_from_pattern(
    name: &str,
    rows: usize,
    cols: usize,
    rounds: u32,
    seed: u64,
) -> Result<WorldFile> {
    if rows == 0 || cols == 0 {
        return Err(GolError::config(format!(
            "grid dimensions must be at least 1x1, got {rows}x{cols}"
        )));
    }
    let alive = if name.eq_ignore_ascii_case(RANDOM) {
        random_soup(rows, cols, seed)
    } else {
        let pattern = Pattern::find(name).ok_or_else(|| {
            let known: Vec<_> = PATTERNS.iter().map(|p| p.name).collect();
            GolError::config(format!(
                "unknown pattern `{name}` (known: {}, {RANDOM})",
                known.join(", ")
            ))
        })?;
        pattern.centered(rows, cols)
    };
    Ok(WorldFile { rows, cols, rounds, alive })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(Pattern::find("Glider").is_some());
        assert!(Pattern::find("nope").is_none());
    }

    #[test]
    fn extents() {
        assert_eq!(Pattern::find("blinker").unwrap().extent(), (1, 3));
        assert_eq!(Pattern::find("pulsar").unwrap().extent(), (13, 13));
        assert_eq!(Pattern::find("gosper-glider-gun").unwrap().extent(), (9, 36));
    }

    #[test]
    fn centered_blinker() {
        let cells = Pattern::find("blinker").unwrap().centered(5, 5);
        assert_eq!(cells, vec![(2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn oversized_pattern_wraps_into_the_grid() {
        let cells = Pattern::find("gosper-glider-gun").unwrap().centered(10, 10);
        assert!(cells.iter().all(|&(r, c)| r < 10 && c < 10));
    }

    #[test]
    fn soup_is_reproducible() {
        let a = random_soup(20, 30, 7);
        let b = random_soup(20, 30, 7);
        assert_eq!(a, b);
        assert!(!a.is_empty() && a.len() < 600);
    }

    #[test]
    fn unknown_pattern_lists_choices() {
        let err = world_from_pattern("spaceship", 10, 10, 1, 0).unwrap_err();
        assert!(err.to_string().contains("glider"));
    }
}
