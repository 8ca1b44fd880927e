// counter.rs - Lock-protected total of alive cells

use parking_lot::Mutex;

/// Global alive-cell total, updated once per worker per round.
#[derive(Debug, Default)]
pub struct LiveCounter {
    total: Mutex<i64>,
}

impl LiveCounter {
    pub fn new(initial: i64) -> Self {
        Self {
            total: Mutex::new(initial),
        }
    }

    pub fn add(&self, delta: i64) {
        *self.total.lock() += delta;
    }

    /// Only consistent once the caller has passed the round barrier.
    pub fn get(&self) -> i64 {
        *self.total.lock()
    }
}
