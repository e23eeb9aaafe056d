use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock time source used to stamp domination transitions.
pub trait Clock {
    /// Current time as UNIX epoch milliseconds.
    fn now_ms(&mut self) -> u64;
}

/// System clock implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&mut self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Hand-advanced clock for tests and deterministic batch replays.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now_ms: u64,
}

impl ManualClock {
    /// Creates a clock pinned to the given timestamp.
    pub fn at(now_ms: u64) -> Self {
        Self { now_ms }
    }

    /// Moves the clock forward.
    pub fn advance(&mut self, delta_ms: u64) {
        self.now_ms = self.now_ms.saturating_add(delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&mut self) -> u64 {
        self.now_ms
    }
}
