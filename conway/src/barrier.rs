// barrier.rs - Reusable N-party barrier with a leader action and abandonment

use parking_lot::{Condvar, Mutex};

use crate::error::{GolError, Result};

#[derive(Debug, Default)]
struct BarrierState {
    arrived: usize,
    generation: u64,
    abandoned: bool,
}

/// Synchronizes a fixed set of workers once per phase, every round.
///
/// Unlike `std::sync::Barrier` the last thread to arrive can run an action
/// before anyone is released, and a failing worker can abandon the barrier so
/// the rest wake up with an error instead of waiting forever.
#[derive(Debug)]
pub struct RoundBarrier {
    participants: usize,
    state: Mutex<BarrierState>,
    cvar: Condvar,
}

impl RoundBarrier {
    pub fn new(participants: usize) -> Result<Self> {
        if participants == 0 {
            return Err(GolError::resource("round barrier needs at least one participant"));
        }
        Ok(Self {
            participants,
            state: Mutex::new(BarrierState::default()),
            cvar: Condvar::new(),
        })
    }

    pub fn wait(&self) -> Result<()> {
        self.wait_then(|| ())
    }

    /// Block until all participants arrive. The last one runs `action` while
    /// the others are still parked, then releases everybody.
    pub fn wait_then<F: FnOnce()>(&self, action: F) -> Result<()> {
        let mut state = self.state.lock();
        if state.abandoned {
            return Err(GolError::BarrierAbandoned);
        }

        let generation = state.generation;
        state.arrived += 1;
        if state.arrived == self.participants {
            action();
            state.arrived = 0;
            state.generation = state.generation.wrapping_add(1);
            self.cvar.notify_all();
            return Ok(());
        }

        while state.generation == generation && !state.abandoned {
            self.cvar.wait(&mut state);
        }
        if state.generation == generation {
            Err(GolError::BarrierAbandoned)
        } else {
            Ok(())
        }
    }

    /// Wake every waiter with [`GolError::BarrierAbandoned`]; later waits fail immediately.
    pub fn abandon(&self) {
        let mut state = self.state.lock();
        state.abandoned = true;
        self.cvar.notify_all();
    }
}
