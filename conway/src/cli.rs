// cli.rs - Command-line arguments shared by the `gol` and `grid_display` binaries

use std::path::PathBuf;

use clap::Args;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{RunConfig, WorldFile};
use crate::error::{GolError, Result};
use crate::partition::Axis;
use crate::patterns;

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// World file: `rows cols rounds count` followed by `count` pairs of `row col`
    #[arg(required_unless_present = "pattern", conflicts_with = "pattern")]
    pub infile: Option<PathBuf>,

    /// Seed the grid from a named pattern (glider, pulsar, random, ...) instead of a file
    #[arg(long)]
    pub pattern: Option<String>,

    /// Grid rows when using --pattern
    #[arg(long, default_value_t = 50, requires = "pattern")]
    pub rows: usize,

    /// Grid columns when using --pattern
    #[arg(long, default_value_t = 50, requires = "pattern")]
    pub cols: usize,

    /// Rounds to play when using --pattern
    #[arg(long, default_value_t = 100, requires = "pattern")]
    pub rounds: u32,

    /// Seed for `--pattern random`
    #[arg(long, default_value_t = 0, requires = "pattern")]
    pub seed: u64,

    /// Number of worker threads
    #[arg(short = 't', long, default_value_t = 1)]
    pub threads: usize,

    /// Axis the grid is split along
    #[arg(short, long, value_enum, default_value_t = Axis::Row)]
    pub partition: Axis,

    /// Print each worker's region before the run starts
    #[arg(long)]
    pub print_partition: bool,

    /// Log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl RunArgs {
    pub fn load_world(&self) -> Result<WorldFile> {
        match (&self.infile, &self.pattern) {
            (Some(path), _) => WorldFile::load(path),
            (None, Some(name)) => {
                patterns::world_from_pattern(name, self.rows, self.cols, self.rounds, self.seed)
            }
            (None, None) => Err(GolError::config("either INFILE or --pattern is required")),
        }
    }

    pub fn run_config(&self, world: &WorldFile) -> RunConfig {
        RunConfig::for_world(world, self.threads, self.partition)
            .with_print_partition(self.print_partition)
    }
}

/// Install a fmt subscriber on stderr. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_names(true)
                .with_timer(fmt::time::uptime()),
        )
        .init();
}
