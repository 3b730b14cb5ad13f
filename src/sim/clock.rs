//! Per-snake interval clock.
//!
//! Replaces wall-clock interval timers: the match scheduler advances every
//! clock by simulated milliseconds and fires whichever is due first.

/// Interval clock driven by simulated time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickClock {
    interval_ms: u64,
    elapsed_ms: u64,
    running: bool,
}

impl TickClock {
    /// A stopped clock with the given period.
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0,
            running: false,
        }
    }

    /// Start counting from zero. Restarting a running clock resets its phase.
    pub fn start(&mut self) {
        self.elapsed_ms = 0;
        self.running = true;
    }

    /// Stop the clock. Safe to call on a stopped clock.
    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed_ms = 0;
    }

    /// Stop, change the period and start again.
    pub fn restart(&mut self, interval_ms: u64) {
        self.stop();
        self.interval_ms = interval_ms.max(1);
        self.start();
    }

    /// Change the period without touching the running state.
    pub fn set_interval(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms.max(1);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Milliseconds until the next tick, or `None` while stopped.
    pub fn due_in(&self) -> Option<u64> {
        self.running
            .then(|| self.interval_ms.saturating_sub(self.elapsed_ms))
    }

    /// Let `dt_ms` of simulated time pass. No effect while stopped.
    pub fn advance(&mut self, dt_ms: u64) {
        if self.running {
            self.elapsed_ms += dt_ms;
        }
    }

    /// Consume one due tick.
    pub fn fire(&mut self) {
        self.elapsed_ms = self.elapsed_ms.saturating_sub(self.interval_ms);
    }
}
