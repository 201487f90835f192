//! Feature implementations for breathbox.
//!
//! This module contains:
//! - Presets, saved patterns, import and export
//! - Persisted preferences
//! - Terminal cue players
//! - Interactive pattern picker
//! - Shell completions

pub mod cue;
pub mod interactive;
pub mod patterns;
pub mod settings;
pub mod shell;
