// config.rs - World files and the validated run configuration
//
// A world file is a stream of whitespace-separated integers:
//
//   rows cols rounds
//   count
//   row col
//   ...
//
// followed by exactly `count` coordinate pairs of initially alive cells.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::error::{GolError, Result};
use crate::partition::Axis;

/// Initial state read from a world file (or built from a pattern).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldFile {
    pub rows: usize,
    pub cols: usize,
    pub rounds: u32,
    pub alive: Vec<(usize, usize)>,
}

impl WorldFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let world: WorldFile = text.parse()?;
        debug!(
            path = %path.display(),
            rows = world.rows,
            cols = world.cols,
            rounds = world.rounds,
            alive = world.alive.len(),
            "loaded world file"
        );
        Ok(world)
    }

    /// Check that every coordinate lies inside the grid.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GolError::config(format!(
                "grid dimensions must be at least 1x1, got {}x{}",
                self.rows, self.cols
            )));
        }
        if let Some(&(row, col)) = self
            .alive
            .iter()
            .find(|&&(row, col)| row >= self.rows || col >= self.cols)
        {
            return Err(GolError::config(format!(
                "alive cell ({row}, {col}) lies outside the {}x{} grid",
                self.rows, self.cols
            )));
        }
        Ok(())
    }
}

/// Integer tokens tagged with the 1-based line they came from.
struct Tokens<'a> {
    inner: Box<dyn Iterator<Item = (usize, &'a str)> + 'a>,
    last_line: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        let inner = text
            .lines()
            .enumerate()
            .flat_map(|(i, line)| line.split_whitespace().map(move |tok| (i + 1, tok)));
        Self {
            inner: Box::new(inner),
            last_line: text.lines().count().max(1),
        }
    }

    fn next<T: FromStr>(&mut self, what: &str) -> Result<T> {
        match self.inner.next() {
            Some((line, tok)) => tok
                .parse()
                .map_err(|_| GolError::parse(line, format!("expected {what}, found `{tok}`"))),
            None => Err(GolError::parse(
                self.last_line,
                format!("unexpected end of file, missing {what}"),
            )),
        }
    }
}

impl FromStr for WorldFile {
    type Err = GolError;

    fn from_str(text: &str) -> Result<Self> {
        let mut tokens = Tokens::new(text);
        let rows = tokens.next("row count")?;
        let cols = tokens.next("column count")?;
        let rounds = tokens.next("round count")?;
        let count: usize = tokens.next("number of alive cells")?;

        let mut alive = Vec::new();
        for i in 0..count {
            let row = tokens.next(&format!("row of alive cell {}", i + 1))?;
            let col = tokens.next(&format!("column of alive cell {}", i + 1))?;
            alive.push((row, col));
        }

        let world = WorldFile { rows, cols, rounds, alive };
        world.validate()?;
        Ok(world)
    }
}

/// Shared, immutable configuration for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub rows: usize,
    pub cols: usize,
    pub rounds: u32,
    pub workers: usize,
    pub axis: Axis,
    pub print_partition: bool,
}

impl RunConfig {
    pub fn for_world(world: &WorldFile, workers: usize, axis: Axis) -> Self {
        Self {
            rows: world.rows,
            cols: world.cols,
            rounds: world.rounds,
            workers,
            axis,
            print_partition: false,
        }
    }

    pub fn with_print_partition(mut self, print_partition: bool) -> Self {
        self.print_partition = print_partition;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GolError::config(format!(
                "grid dimensions must be at least 1x1, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.workers == 0 {
            return Err(GolError::config("number of threads must be at least 1"));
        }
        let extent = self.axis.extent(self.rows, self.cols);
        if self.workers > extent {
            return Err(GolError::config(format!(
                "number of threads ({}) must not exceed the number of {}s ({extent})",
                self.workers, self.axis
            )));
        }
        Ok(())
    }
}
