// partition.rs - Splits the grid into one contiguous region per worker

use std::fmt;
use std::ops::RangeInclusive;

use clap::ValueEnum;

use crate::error::{GolError, Result};

/// Axis along which the grid is cut into regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Axis {
    /// Each worker owns a band of whole rows
    #[default]
    Row,
    /// Each worker owns a band of whole columns
    Col,
}

impl Axis {
    /// Number of units available along this axis.
    pub fn extent(self, rows: usize, cols: usize) -> usize {
        match self {
            Axis::Row => rows,
            Axis::Col => cols,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Col => f.write_str("col"),
        }
    }
}

/// Rectangle of cells owned by one worker. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub id: usize,
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl Region {
    pub fn rows(&self) -> RangeInclusive<usize> {
        self.row_start..=self.row_end
    }

    pub fn cols(&self) -> RangeInclusive<usize> {
        self.col_start..=self.col_end
    }

    pub fn height(&self) -> usize {
        self.row_end - self.row_start + 1
    }

    pub fn width(&self) -> usize {
        self.col_end - self.col_start + 1
    }

    pub fn cell_count(&self) -> usize {
        self.height() * self.width()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tid: {:5}: rows: {:5}:{:5} \t({}) cols: {:5}:{:5} ({})",
            self.id,
            self.row_start,
            self.row_end,
            self.height(),
            self.col_start,
            self.col_end,
            self.width()
        )
    }
}

/// Cut a `rows x cols` grid into `workers` regions along `axis`.
///
/// Every region gets `extent / workers` units along the axis and the first
/// `extent % workers` regions get one extra. The cross axis always spans the
/// whole grid.
pub fn partition(rows: usize, cols: usize, workers: usize, axis: Axis) -> Result<Vec<Region>> {
    if rows == 0 || cols == 0 {
        return Err(GolError::config(format!(
            "grid dimensions must be at least 1x1, got {rows}x{cols}"
        )));
    }
    let extent = axis.extent(rows, cols);
    if workers == 0 {
        return Err(GolError::config("number of threads must be at least 1"));
    }
    if workers > extent {
        return Err(GolError::config(format!(
            "number of threads ({workers}) must not exceed the number of {axis}s ({extent})"
        )));
    }

    let base = extent / workers;
    let remainder = extent % workers;

    let mut regions = Vec::with_capacity(workers);
    let mut start = 0;
    for id in 0..workers {
        let len = if id < remainder { base + 1 } else { base };
        let end = start + len - 1;
        let region = match axis {
            Axis::Row => Region {
                id,
                row_start: start,
                row_end: end,
                col_start: 0,
                col_end: cols - 1,
            },
            Axis::Col => Region {
                id,
                row_start: 0,
                row_end: rows - 1,
                col_start: start,
                col_end: end,
            },
        };
        regions.push(region);
        start = end + 1;
    }

    Ok(regions)
}

/// True when `regions` cover every cell of the grid exactly once.
pub fn covers_exactly_once(regions: &[Region], rows: usize, cols: usize) -> bool {
    let mut hits = vec![0u32; rows * cols];
    for region in regions {
        if region.row_end >= rows || region.col_end >= cols {
            return false;
        }
        for row in region.rows() {
            for col in region.cols() {
                hits[row * cols + col] += 1;
            }
        }
    }
    hits.iter().all(|&h| h == 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn remainder_goes_to_earliest_regions() {
        let regions = partition(10, 4, 3, Axis::Row).unwrap();
        let heights: Vec<_> = regions.iter().map(Region::height).collect();
        assert_eq!(heights, vec![4, 3, 3]);
        assert_eq!(regions[0].rows(), 0..=3);
        assert_eq!(regions[1].rows(), 4..=6);
        assert_eq!(regions[2].rows(), 7..=9);
        assert!(regions.iter().all(|r| r.cols() == (0..=3)));
    }

    #[test]
    fn column_axis_spans_all_rows_and_uses_column_bounds() {
        // 4 rows by 9 columns: the column bound must come from cols, not rows
        let regions = partition(4, 9, 2, Axis::Col).unwrap();
        assert_eq!(regions[0].cols(), 0..=4);
        assert_eq!(regions[1].cols(), 5..=8);
        assert!(regions.iter().all(|r| r.rows() == (0..=3)));
    }

    #[test]
    fn row_axis_column_bound_uses_cols() {
        let regions = partition(3, 7, 3, Axis::Row).unwrap();
        assert!(regions.iter().all(|r| r.col_end == 6));
        assert!(covers_exactly_once(&regions, 3, 7));
    }

    #[test]
    fn too_many_workers_is_a_config_error() {
        let err = partition(4, 100, 5, Axis::Row).unwrap_err();
        assert!(matches!(err, GolError::Config { .. }));
        assert!(partition(100, 4, 5, Axis::Col).is_err());
        assert!(partition(4, 4, 0, Axis::Row).is_err());
    }

    #[test]
    fn one_worker_per_row_is_allowed() {
        let regions = partition(5, 5, 5, Axis::Row).unwrap();
        assert!(regions.iter().all(|r| r.height() == 1));
    }

    #[test]
    fn display_matches_partition_report() {
        let region = Region { id: 1, row_start: 4, row_end: 6, col_start: 0, col_end: 9 };
        assert_eq!(
            region.to_string(),
            "tid:     1: rows:     4:    6 \t(3) cols:     0:    9 (10)"
        );
    }

    #[test]
    fn overlap_is_detected() {
        let a = Region { id: 0, row_start: 0, row_end: 1, col_start: 0, col_end: 1 };
        let b = Region { id: 1, row_start: 1, row_end: 1, col_start: 0, col_end: 1 };
        assert!(!covers_exactly_once(&[a, b], 2, 2));
        assert!(!covers_exactly_once(&[a], 3, 2));
    }

    fn axis_strategy() -> impl Strategy<Value = Axis> {
        prop_oneof![Just(Axis::Row), Just(Axis::Col)]
    }

    proptest! {
        #[test]
        fn prop_regions_tile_the_grid(
            rows in 1usize..40,
            cols in 1usize..40,
            axis in axis_strategy(),
            pick in 0usize..1000,
        ) {
            let extent = axis.extent(rows, cols);
            let workers = pick % extent + 1;
            let regions = partition(rows, cols, workers, axis).unwrap();

            prop_assert_eq!(regions.len(), workers);
            prop_assert!(covers_exactly_once(&regions, rows, cols));
            let total: usize = regions.iter().map(Region::cell_count).sum();
            prop_assert_eq!(total, rows * cols);
            for (i, region) in regions.iter().enumerate() {
                prop_assert_eq!(region.id, i);
            }
        }

        #[test]
        fn prop_region_sizes_differ_by_at_most_one(
            extent in 1usize..200,
            pick in 0usize..1000,
        ) {
            let workers = pick % extent + 1;
            let regions = partition(extent, 3, workers, Axis::Row).unwrap();
            let sizes: Vec<_> = regions.iter().map(Region::height).collect();
            let max = *sizes.iter().max().unwrap();
            let min = *sizes.iter().min().unwrap();
            prop_assert!(max - min <= 1);
            // non-increasing: the extra units sit at the front
            prop_assert!(sizes.windows(2).all(|w| w[0] >= w[1]));
        }
    }
}
