// main.rs - Headless / ASCII front end for the threaded Game of Life
//
//   gol world.txt                          # no animation, print totals
//   gol world.txt -o ascii -t 4 -p col     # ASCII animation, 4 column bands
//   gol --pattern pulsar --rounds 30 -o ascii --print-partition

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use conway::cli::{RunArgs, init_tracing};
use conway::{Simulation, TextRenderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputMode {
    /// Run silently and print only the totals
    #[value(name = "none")]
    Silent,
    /// Redraw the board in the terminal after every round
    Ascii,
}

#[derive(Parser, Debug)]
#[command(name = "gol", version, about = "Conway's Game of Life on a torus, one thread per region")]
struct Cli {
    #[command(flatten)]
    run: RunArgs,

    /// Output mode
    #[arg(short, long, value_enum, default_value_t = OutputMode::Silent)]
    output: OutputMode,

    /// Pause between ASCII frames, in milliseconds
    #[arg(long, default_value_t = 100)]
    delay_ms: u64,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.run.verbose);

    let world = cli.run.load_world().context("failed to load initial world")?;
    let config = cli.run.run_config(&world);
    let sim = Simulation::from_world(&world, config).context("invalid run configuration")?;

    let mut renderer = renderer_for(cli.output, Duration::from_millis(cli.delay_ms));
    let summary = sim.run(&mut renderer).context("simulation failed")?;

    println!("Total time: {:0.3} seconds", summary.elapsed.as_secs_f64());
    println!(
        "After {} rounds on {}x{}, the number of live cells is: {}\n",
        summary.rounds, summary.rows, summary.cols, summary.live_cells
    );
    Ok(())
}

/// ASCII frames go to stderr, leaving stdout for the totals.
fn renderer_for(mode: OutputMode, delay: Duration) -> TextRenderer<Box<dyn Write + Send>> {
    match mode {
        OutputMode::Silent => TextRenderer::summary(Box::new(io::stdout())),
        OutputMode::Ascii => TextRenderer::ascii(Box::new(io::stderr()), delay),
    }
}
