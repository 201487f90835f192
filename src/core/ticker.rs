//! Wall-clock scheduling for the one-second tick.

use std::time::{Duration, Instant};

/// What the host loop should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDecision {
    /// Nothing due yet; wait at most this long for input.
    Wait(Duration),
    /// A tick is due now.
    Due,
    /// The schedule was missed by more than the allowed lag. The host must
    /// treat this as an implicit stop rather than replaying missed ticks.
    Stalled,
}

/// Tracks when the next tick is due.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    max_lag: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    /// Default allowed lag before the schedule counts as stalled.
    pub const DEFAULT_MAX_LAG: Duration = Duration::from_secs(3);

    /// A one-second ticker.
    #[must_use]
    pub const fn new(max_lag: Duration) -> Self {
        Self::with_interval(Duration::from_secs(1), max_lag)
    }

    /// A ticker with a custom interval.
    #[must_use]
    pub const fn with_interval(interval: Duration, max_lag: Duration) -> Self {
        Self {
            interval,
            max_lag,
            next_due: None,
        }
    }

    /// Begin scheduling; the first tick is due one interval after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    /// Stop scheduling.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Whether ticks are being scheduled.
    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.next_due.is_some()
    }

    /// Decide what to do at `now`.
    ///
    /// When stopped, returns `Wait` for one interval so input keeps polling.
    pub fn poll(&self, now: Instant) -> TickDecision {
        let Some(due) = self.next_due else {
            return TickDecision::Wait(self.interval);
        };

        if now < due {
            return TickDecision::Wait(due - now);
        }
        if now.duration_since(due) > self.max_lag {
            return TickDecision::Stalled;
        }
        TickDecision::Due
    }

    /// Record that the due tick was handled; schedules the next one from the
    /// previous deadline so ticks do not drift.
    pub fn advance(&mut self) {
        if let Some(due) = self.next_due {
            self.next_due = Some(due + self.interval);
        }
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_LAG)
    }
}
