//! Periodic tick driver — an owned, cancellable interval accumulator.
//!
//! Each component that ticks on its own cadence (zones, wristbands,
//! attendance, the evacuation) owns one `PeriodicTask`. The model is
//! single-threaded and cooperative: the engine advances every task from its
//! `update` call, runs one callback per due tick, and ticks therefore never
//! overlap. Cancellation is immediate and idempotent — once cancelled a task
//! never reports another due tick, even for time that had already accrued.

/// Fixed-interval tick accumulator with explicit cancellation.
#[derive(Debug, Clone)]
pub struct PeriodicTask {
    interval: f64,
    accrued: f64,
    cancelled: bool,
}

impl PeriodicTask {
    /// A task firing every `interval_seconds`. Non-positive intervals are
    /// clamped to a minimum so `advance` can never spin forever.
    pub fn new(interval_seconds: f64) -> Self {
        Self {
            interval: interval_seconds.max(1e-6),
            accrued: 0.0,
            cancelled: false,
        }
    }

    /// Advance the task clock by `dt` seconds and return how many ticks
    /// fell due. Returns 0 forever once cancelled.
    pub fn advance(&mut self, dt: f64) -> u32 {
        if self.cancelled {
            return 0;
        }
        self.accrued += dt.max(0.0);
        let due = (self.accrued / self.interval) as u32;
        self.accrued -= due as f64 * self.interval;
        due
    }

    /// Stop the task. Effective immediately for all future ticks, including
    /// any already accrued; safe to call repeatedly.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.accrued = 0.0;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }
}
