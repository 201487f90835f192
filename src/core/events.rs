//! Events emitted by the sequencer and session timer.

use serde::Serialize;

use super::pattern::Phase;

/// A notification from the breathing core.
///
/// Within one tick, phase changes (`PhaseEntered`, `CuePlayed`) are always
/// emitted before the `Tick` that carries the new remaining count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// The sequencer moved into a phase (including re-entering the same one).
    PhaseEntered {
        /// The phase now running.
        phase: Phase,
    },
    /// The entry cue for a phase should sound.
    CuePlayed {
        /// The phase whose cue fired.
        phase: Phase,
    },
    /// Display refresh with the seconds left in the current phase.
    Tick {
        /// Seconds left in the current phase.
        remaining_secs: u32,
    },
    /// The sequencer stopped.
    Stopped,
    /// The session timer ran out.
    Expired,
}

impl Event {
    /// The phase carried by this event, if any.
    #[must_use]
    pub const fn phase(&self) -> Option<Phase> {
        match self {
            Self::PhaseEntered { phase } | Self::CuePlayed { phase } => Some(*phase),
            Self::Tick { .. } | Self::Stopped | Self::Expired => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pattern::PhaseKind;

    #[test]
    fn test_event_json_shape() {
        let event = Event::PhaseEntered {
            phase: Phase {
                kind: PhaseKind::Exhale,
                duration_secs: 8,
            },
        };
        let json = serde_json::to_value(event).unwrap();

        assert_eq!(json["event"], "phase_entered");
        assert_eq!(json["phase"]["kind"], "exhale");
        assert_eq!(json["phase"]["duration_secs"], 8);

        let tick = serde_json::to_value(Event::Tick { remaining_secs: 3 }).unwrap();
        assert_eq!(tick["event"], "tick");
        assert_eq!(tick["remaining_secs"], 3);
    }

    #[test]
    fn test_event_phase() {
        assert!(Event::Stopped.phase().is_none());
        assert!(Event::Tick { remaining_secs: 1 }.phase().is_none());
    }
}
