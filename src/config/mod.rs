//! Configuration management for breathbox.
//!
//! This module handles loading configuration from `~/.breathbox/` and
//! layering stored preferences on top of it.

mod paths;
pub mod preferences;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use preferences::{Preferences, SettingEntry, SettingSource};
pub use settings::{
    Config, CueConfig, GeneralConfig, MusicConfig, SessionConfig, Theme, TickerConfig,
};
