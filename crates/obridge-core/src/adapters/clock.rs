//! Clock adapters.

use crate::ports::outbound::Clock;
use parking_lot::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Manually driven time for tests and simulations.
#[derive(Debug)]
pub struct ManualClock {
    current_time: RwLock<u64>,
}

impl ManualClock {
    /// Default starting instant.
    pub const GENESIS: u64 = 1_700_000_000;

    /// Create a clock at [`ManualClock::GENESIS`].
    pub fn new() -> Self {
        Self::starting_at(Self::GENESIS)
    }

    /// Create a clock at `time`.
    pub fn starting_at(time: u64) -> Self {
        Self {
            current_time: RwLock::new(time),
        }
    }

    /// Set current time for testing.
    pub fn set_time(&self, time: u64) {
        *self.current_time.write() = time;
    }

    /// Advance time for testing.
    pub fn advance_time(&self, secs: u64) {
        let mut current = self.current_time.write();
        *current = current.saturating_add(secs);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        *self.current_time.read()
    }
}
