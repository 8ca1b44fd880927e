// worker.rs - One thread per region, advancing its cells in lockstep

use std::thread;

use tracing::{debug, debug_span, trace};

use crate::barrier::RoundBarrier;
use crate::config::RunConfig;
use crate::counter::LiveCounter;
use crate::error::Result;
use crate::grid::GridState;
use crate::partition::Region;
use crate::render::{Frame, Renderer};
use crate::rule;

/// Region that owns the render step.
pub const RENDER_REGION: usize = 0;

/// State every worker borrows for the duration of the run.
pub(crate) struct Shared {
    pub config: RunConfig,
    pub grid: GridState,
    pub live: LiveCounter,
    pub barrier: RoundBarrier,
    /// Whether a render step (and its barrier) follows each round.
    pub render_phase: bool,
}

/// Everything one worker thread needs: its region, the shared state, and the
/// renderer if it is the designated worker.
pub(crate) struct WorkerTask<'run> {
    pub region: Region,
    pub shared: &'run Shared,
    pub renderer: Option<&'run mut (dyn Renderer + Send)>,
}

/// Abandons the barrier if the worker unwinds, so its peers don't wait forever.
struct AbandonOnPanic<'a>(&'a RoundBarrier);

impl Drop for AbandonOnPanic<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.abandon();
        }
    }
}

impl WorkerTask<'_> {
    pub fn run(mut self) -> Result<()> {
        let shared = self.shared;
        let _guard = AbandonOnPanic(&shared.barrier);
        let span = debug_span!("worker", id = self.region.id);
        let _enter = span.enter();
        debug!(region = %self.region, "worker started");

        for round in 1..=shared.config.rounds {
            // COMPUTE
            let delta = self.compute();

            // BARRIER_WRITE
            shared.barrier.wait()?;

            // AGGREGATE
            shared.live.add(delta);

            // BARRIER_ROUND; the last arrival flips the buffers
            shared.barrier.wait_then(|| shared.grid.swap())?;
            trace!(round, delta, "round complete");

            if shared.render_phase {
                if let Some(renderer) = self.renderer.as_deref_mut() {
                    let frame = Frame::new(round, shared.live.get(), &shared.grid);
                    if let Err(err) = renderer.render(&frame) {
                        shared.barrier.abandon();
                        return Err(err);
                    }
                }
                shared.barrier.wait()?;
            }
        }

        debug!("worker finished");
        Ok(())
    }

    /// Write the next state of every owned cell; returns the change in alive cells.
    fn compute(&self) -> i64 {
        let grid = &self.shared.grid;
        let mut before = 0i64;
        let mut after = 0i64;

        for row in self.region.rows() {
            for col in self.region.cols() {
                let alive = grid.is_alive(row, col);
                let next = rule::next_state(alive, rule::live_neighbors(grid, row, col));
                grid.write(row, col, next);
                before += alive as i64;
                after += next as i64;
            }
        }

        after - before
    }
}
