//! Cue players for the terminal.
//!
//! A terminal cannot synthesize a tone, so the bell stands in for every
//! style. The requested tone is still logged at debug level.

mod players;

pub use players::{player_for, SilentPlayer, TerminalBell};
