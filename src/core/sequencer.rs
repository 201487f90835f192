//! The breathing sequencer.
//!
//! Drives a pattern one second at a time. Every operation returns the events
//! it produced, in emission order, so the caller decides who sees them.

use tracing::{debug, trace};

use super::events::Event;
use super::pattern::{Pattern, Phase};
use crate::error::BreathError;

/// Read-only view of the sequencer for displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencerSnapshot {
    /// Whether a run is in progress.
    pub running: bool,
    /// The stored pattern.
    pub pattern: Pattern,
    /// Current phase index (0-3).
    pub phase_index: usize,
    /// Seconds left in the current phase.
    pub remaining_secs: u32,
}

impl SequencerSnapshot {
    /// The current phase, if running.
    #[must_use]
    pub const fn phase(&self) -> Option<Phase> {
        if self.running {
            Some(self.pattern.phase(self.phase_index))
        } else {
            None
        }
    }

    /// Fraction of the current phase already elapsed (0.0 - 1.0).
    #[must_use]
    pub fn phase_progress(&self) -> f64 {
        let Some(phase) = self.phase() else {
            return 0.0;
        };
        if phase.duration_secs == 0 {
            return 1.0;
        }
        1.0 - f64::from(self.remaining_secs) / f64::from(phase.duration_secs)
    }
}

/// Cycles through the phases of a pattern.
#[derive(Debug, Clone)]
pub struct Sequencer {
    running: bool,
    pattern: Pattern,
    phase_index: usize,
    remaining_secs: u32,
}

impl Sequencer {
    /// Create an idle sequencer holding `pattern`.
    #[must_use]
    pub const fn new(pattern: Pattern) -> Self {
        Self {
            running: false,
            pattern,
            phase_index: 0,
            remaining_secs: pattern.inhale,
        }
    }

    /// Start sequencing the stored pattern.
    ///
    /// # Errors
    ///
    /// Returns `BreathError::InvalidPattern` if every phase is zero. The
    /// sequencer is left untouched.
    pub fn start(&mut self) -> Result<Vec<Event>, BreathError> {
        self.start_with(self.pattern)
    }

    /// Store `pattern` and start sequencing it from its first non-zero phase.
    ///
    /// Starting while already running restarts from the beginning.
    ///
    /// # Errors
    ///
    /// Returns `BreathError::InvalidPattern` if every phase is zero. The
    /// sequencer (including its stored pattern) is left untouched.
    pub fn start_with(&mut self, pattern: Pattern) -> Result<Vec<Event>, BreathError> {
        pattern.validate()?;
        let first = pattern.first_active().ok_or_else(|| {
            BreathError::InvalidPattern("pattern has no active phase".to_string())
        })?;

        let mut events = self.stop();

        self.pattern = pattern;
        self.running = true;
        debug!(%pattern, "sequencer started");
        self.enter(first, &mut events);
        events.push(Event::Tick {
            remaining_secs: self.remaining_secs,
        });

        Ok(events)
    }

    /// Advance the clock by one second.
    ///
    /// Does nothing while idle.
    pub fn tick(&mut self) -> Vec<Event> {
        if !self.running {
            return Vec::new();
        }

        let mut events = Vec::new();
        self.remaining_secs = self.remaining_secs.saturating_sub(1);

        if self.remaining_secs == 0 {
            let Some(next) = self.pattern.next_active_after(self.phase_index) else {
                return self.stop();
            };
            self.enter(next, &mut events);
        }

        trace!(remaining = self.remaining_secs, "tick");
        events.push(Event::Tick {
            remaining_secs: self.remaining_secs,
        });
        events
    }

    /// Stop the current run.
    ///
    /// Stopping an idle sequencer emits nothing.
    pub fn stop(&mut self) -> Vec<Event> {
        if !self.running {
            return Vec::new();
        }

        self.running = false;
        self.phase_index = 0;
        self.remaining_secs = self.pattern.inhale;
        debug!("sequencer stopped");
        vec![Event::Stopped]
    }

    /// Switch to a different pattern.
    ///
    /// While running, the current run is stopped and restarted from the first
    /// phase of the new pattern; the old phase position is discarded. While
    /// idle, the pattern is only stored for the next [`Sequencer::start`].
    ///
    /// # Errors
    ///
    /// Returns `BreathError::InvalidPattern` if the sequencer is running and
    /// every phase of `pattern` is zero. The current run continues.
    pub fn replace_pattern(&mut self, pattern: Pattern) -> Result<Vec<Event>, BreathError> {
        if self.running {
            pattern.validate()?;
            return self.start_with(pattern);
        }

        self.pattern = pattern;
        self.remaining_secs = pattern.inhale;
        Ok(Vec::new())
    }

    /// Whether a run is in progress.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// The stored pattern.
    #[must_use]
    pub const fn pattern(&self) -> Pattern {
        self.pattern
    }

    /// Current state as a copy.
    #[must_use]
    pub const fn snapshot(&self) -> SequencerSnapshot {
        SequencerSnapshot {
            running: self.running,
            pattern: self.pattern,
            phase_index: self.phase_index,
            remaining_secs: self.remaining_secs,
        }
    }

    fn enter(&mut self, index: usize, events: &mut Vec<Event>) {
        let phase = self.pattern.phase(index);
        self.phase_index = index;
        self.remaining_secs = phase.duration_secs;
        debug!(phase = %phase.kind, secs = phase.duration_secs, "phase entered");
        events.push(Event::PhaseEntered { phase });
        events.push(Event::CuePlayed { phase });
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(Pattern::new(4, 4, 4, 4))
    }
}
