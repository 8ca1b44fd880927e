// main.rs - egui window that animates a threaded Game of Life run
//
// The simulation runs on a background thread. Worker 0 pushes a snapshot into a
// bounded channel after every round and the window paints whatever arrived last.

use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread;
use std::time::Duration;

use anyhow::{Context, anyhow};
use clap::Parser;
use eframe::egui;
use tracing::{info, warn};

use conway::cli::{RunArgs, init_tracing};
use conway::{Board, Frame, Region, Renderer, Simulation};

mod ui;

use ui::ViewerApp;

#[derive(Parser, Debug)]
#[command(name = "grid_display", version, about = "Animate a threaded Game of Life run in a window")]
struct Cli {
    #[command(flatten)]
    run: RunArgs,

    /// Pause between rounds, in milliseconds
    #[arg(long, default_value_t = 100)]
    delay_ms: u64,
}

/// Messages from the simulation thread to the window.
pub enum Update {
    Round { round: u32, live: i64, board: Board },
    Finished { live: i64, elapsed: Duration },
    Failed(String),
}

/// Forwards every round to the window. Once the window is gone it stops
/// sending, and the run carries on to its last round.
struct ChannelRenderer {
    tx: SyncSender<Update>,
    delay: Duration,
    open: bool,
}

impl Renderer for ChannelRenderer {
    fn render(&mut self, frame: &Frame<'_>) -> conway::Result<()> {
        if !self.open {
            return Ok(());
        }
        let update = Update::Round {
            round: frame.round(),
            live: frame.live_cells(),
            board: frame.snapshot(),
        };
        if self.tx.send(update).is_err() {
            info!("viewer closed, continuing without frames");
            self.open = false;
            return Ok(());
        }
        thread::sleep(self.delay);
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.run.verbose);

    let world = cli.run.load_world().context("failed to load initial world")?;
    let config = cli.run.run_config(&world);
    let sim = Simulation::from_world(&world, config).context("invalid run configuration")?;
    let regions: Vec<Region> = sim.regions().to_vec();

    let rx = spawn_simulation(sim, Duration::from_millis(cli.delay_ms))?;
    let app = ViewerApp::new(rx, config.rows, config.cols, &regions);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([820.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Game of Life",
        options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|e| anyhow!("viewer failed: {e}"))
}

fn spawn_simulation(sim: Simulation, delay: Duration) -> anyhow::Result<Receiver<Update>> {
    let (tx, rx) = mpsc::sync_channel(1);
    let status = tx.clone();
    let mut renderer = ChannelRenderer { tx, delay, open: true };

    thread::Builder::new()
        .name("gol-sim".into())
        .spawn(move || {
            let update = match sim.run(&mut renderer) {
                Ok(summary) => Update::Finished {
                    live: summary.live_cells,
                    elapsed: summary.elapsed,
                },
                Err(err) => {
                    warn!(error = %err, "simulation failed");
                    Update::Failed(err.to_string())
                }
            };
            // the window may already be closed
            let _ = status.send(update);
        })
        .context("failed to start simulation thread")?;

    Ok(rx)
}
