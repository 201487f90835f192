//! Collaborator interfaces for the breathing core.
//!
//! The core never reaches into its collaborators and they never receive a
//! live reference into sequencer state: cue players get a `Cue`, displays get
//! `Event`s, and stores deal in owned values.

use super::cue::Cue;
use super::events::Event;
use super::pattern::{NamedPattern, Pattern};
use crate::error::BreathError;

/// Plays a tone when a phase begins.
///
/// Playback is best effort. The controller logs and discards any error.
#[cfg_attr(test, mockall::automock)]
pub trait CuePlayer {
    /// Play `cue` without waiting for it to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the output device is unavailable.
    fn play(&mut self, cue: &Cue) -> Result<(), BreathError>;
}

/// Receives events for display.
pub trait DisplaySink {
    /// Observe one event.
    fn on_event(&mut self, event: &Event);

    /// Observe a batch of events in order.
    fn on_events(&mut self, events: &[Event]) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// Persistent named patterns.
///
/// Names are unique ignoring case: "Calm" and "calm" are the same pattern.
pub trait PatternStore {
    /// Load a pattern by name.
    ///
    /// # Errors
    ///
    /// Returns `BreathError::NotFound` if no pattern has that name.
    fn load_named(&self, name: &str) -> Result<Pattern, BreathError>;

    /// Save a new pattern.
    ///
    /// # Errors
    ///
    /// Returns `BreathError::NameConflict` if the name is taken and
    /// `BreathError::InvalidPattern` if every phase is zero.
    fn save_named(&self, name: &str, pattern: &Pattern) -> Result<(), BreathError>;

    /// Save a pattern, overwriting any existing one with the same name.
    ///
    /// # Errors
    ///
    /// Returns `BreathError::InvalidPattern` if every phase is zero.
    fn replace_named(&self, name: &str, pattern: &Pattern) -> Result<(), BreathError>;

    /// All saved patterns, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_all(&self) -> Result<Vec<NamedPattern>, BreathError>;

    /// Remove a pattern.
    ///
    /// # Errors
    ///
    /// Returns `BreathError::NotFound` if no pattern has that name.
    fn delete(&self, name: &str) -> Result<(), BreathError>;
}

/// Opaque key-value persistence for user preferences.
///
/// The store does not interpret values; see `config::Preferences`.
pub trait SettingsStore {
    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, BreathError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), BreathError>;

    /// Delete a value. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn remove(&self, key: &str) -> Result<bool, BreathError>;

    /// All stored values, sorted by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list(&self) -> Result<Vec<(String, String)>, BreathError>;
}
