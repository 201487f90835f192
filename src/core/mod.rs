//! Core abstractions for breathbox.
//!
//! The sequencing engine (patterns, sequencer, session timer, controller) and
//! the traits its collaborators implement. Nothing in here touches the
//! terminal, the filesystem, or the database.

mod controller;
mod cue;
mod events;
pub mod pattern;
mod sequencer;
mod session_timer;
mod ticker;
mod traits;

pub use controller::BreathingController;
pub use cue::{Cue, ToneStyle};
pub use events::Event;
pub use pattern::{NamedPattern, Pattern, Phase, PhaseKind, PHASE_COUNT};
pub use sequencer::{Sequencer, SequencerSnapshot};
pub use session_timer::{format_clock, format_spoken, parse_length, SessionTimer};
pub use ticker::{TickDecision, Ticker};
pub use traits::{CuePlayer, DisplaySink, PatternStore, SettingsStore};

#[cfg(test)]
pub use traits::MockCuePlayer;
