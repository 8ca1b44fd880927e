// simulation.rs - Partitions the grid, spawns one worker per region and joins
// them once every round has been played

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::barrier::RoundBarrier;
use crate::config::{RunConfig, WorldFile};
use crate::counter::LiveCounter;
use crate::error::{GolError, Result};
use crate::grid::{Board, GridState};
use crate::partition::{self, Region};
use crate::render::{Frame, Renderer};
use crate::worker::{RENDER_REGION, Shared, WorkerTask};

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub rounds: u32,
    pub rows: usize,
    pub cols: usize,
    /// Final value of the shared live counter
    pub live_cells: i64,
    pub board: Board,
    /// Wall time from spawning the first worker to joining the last
    pub elapsed: Duration,
}

/// A validated run, ready to be played.
pub struct Simulation {
    config: RunConfig,
    regions: Vec<Region>,
    grid: GridState,
}

impl Simulation {
    /// Validate `config`, partition the grid and seed the current buffer.
    ///
    /// All configuration errors surface here, before any thread exists.
    pub fn new(config: RunConfig, alive: &[(usize, usize)]) -> Result<Self> {
        config.validate()?;
        if let Some(&(row, col)) = alive
            .iter()
            .find(|&&(row, col)| row >= config.rows || col >= config.cols)
        {
            return Err(GolError::config(format!(
                "alive cell ({row}, {col}) lies outside the {}x{} grid",
                config.rows, config.cols
            )));
        }

        let regions = partition::partition(config.rows, config.cols, config.workers, config.axis)?;
        if regions.len() != config.workers {
            return Err(GolError::config(format!(
                "partitioner produced {} regions for {} workers",
                regions.len(),
                config.workers
            )));
        }
        debug_assert!(
            partition::covers_exactly_once(&regions, config.rows, config.cols),
            "regions must tile the grid"
        );

        Ok(Self {
            config,
            regions,
            grid: GridState::with_alive(config.rows, config.cols, alive),
        })
    }

    /// Convenience constructor from a loaded world file.
    pub fn from_world(world: &WorldFile, config: RunConfig) -> Result<Self> {
        world.validate()?;
        Self::new(config, &world.alive)
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Play every configured round and return the final state.
    pub fn run(self, renderer: &mut (dyn Renderer + Send)) -> Result<RunSummary> {
        let Simulation { config, regions, grid } = self;

        let initial_live = grid.count_alive() as i64;
        let render_phase = renderer.wants_frames();
        let shared = Shared {
            config,
            grid,
            live: LiveCounter::new(initial_live),
            barrier: RoundBarrier::new(config.workers)?,
            render_phase,
        };

        if config.print_partition {
            renderer.report_partition(&regions)?;
        }
        if render_phase {
            renderer.render(&Frame::new(0, initial_live, &shared.grid))?;
        }

        info!(
            rows = config.rows,
            cols = config.cols,
            rounds = config.rounds,
            workers = config.workers,
            axis = %config.axis,
            live = initial_live,
            "starting simulation"
        );

        let start = Instant::now();
        let errors = spawn_and_join(&shared, &regions, renderer);
        let elapsed = start.elapsed();

        if let Some(err) = root_cause(errors) {
            warn!(error = %err, "simulation aborted");
            return Err(err);
        }

        let live_cells = shared.live.get();
        let board = shared.grid.snapshot();
        debug_assert_eq!(board.alive_count() as i64, live_cells);
        info!(
            live = live_cells,
            elapsed_ms = elapsed.as_millis() as u64,
            "simulation finished"
        );

        Ok(RunSummary {
            rounds: config.rounds,
            rows: config.rows,
            cols: config.cols,
            live_cells,
            board,
            elapsed,
        })
    }
}

/// Spawn one named thread per region and collect every failure.
fn spawn_and_join<'run>(
    shared: &'run Shared,
    regions: &[Region],
    renderer: &'run mut (dyn Renderer + Send + 'run),
) -> Vec<GolError> {
    let mut errors = Vec::new();
    let mut renderer = shared.render_phase.then_some(renderer);

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(regions.len());
        for region in regions {
            let task = WorkerTask {
                region: *region,
                shared,
                renderer: if region.id == RENDER_REGION { renderer.take() } else { None },
            };
            let spawned = thread::Builder::new()
                .name(format!("gol-worker-{}", region.id))
                .spawn_scoped(scope, move || task.run());
            match spawned {
                Ok(handle) => handles.push((region.id, handle)),
                Err(source) => {
                    // workers already started would wait forever for this one
                    shared.barrier.abandon();
                    errors.push(GolError::Spawn { id: region.id, source });
                    break;
                }
            }
        }
        debug!(spawned = handles.len(), "workers running");

        for (id, handle) in handles {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(err)) => errors.push(err),
                Err(_) => errors.push(GolError::WorkerPanicked { id }),
            }
        }
    });

    errors
}

/// First error that is not merely a consequence of another worker stopping.
fn root_cause(errors: Vec<GolError>) -> Option<GolError> {
    let mut fallback = None;
    for err in errors {
        if !err.is_knock_on() {
            return Some(err);
        }
        fallback.get_or_insert(err);
    }
    fallback
}
