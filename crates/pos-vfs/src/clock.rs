//! Timestamp sources for node metadata.

use std::cell::Cell;

/// Source of millisecond timestamps.
pub trait Clock {
    /// Current time in milliseconds since the Unix epoch.
    fn now(&self) -> u64;
}

/// Wall clock backed by `std::time`.
///
/// Not usable on `wasm32-unknown-unknown`; the browser crate supplies its own.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64)
    }
}

/// Deterministic clock: every reading returns the current value and advances it by one.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl ManualClock {
    /// Create a clock starting at `start`.
    pub fn new(start: u64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Set the current timestamp (for testing).
    pub fn set(&self, timestamp: u64) {
        self.now.set(timestamp);
    }

    /// Peek at the next value without advancing.
    pub fn peek(&self) -> u64 {
        self.now.get()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        let current = self.now.get();
        self.now.set(current + 1);
        current
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> u64 {
        (**self).now()
    }
}
