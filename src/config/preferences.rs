//! User preferences layered over the config file.
//!
//! The settings store keeps opaque strings. This module is the only place that
//! knows which keys exist and what their values mean.

use std::path::PathBuf;

use serde::Serialize;
use tracing::warn;

use super::settings::{Config, Theme};
use crate::core::{SettingsStore, ToneStyle};
use crate::error::BreathError;

/// Whether cues play.
pub const CUE_ENABLED: &str = "cue.enabled";
/// Tone style for cues.
pub const CUE_STYLE: &str = "cue.style";
/// Whether background music is wanted.
pub const MUSIC_ENABLED: &str = "music.enabled";
/// Background music file.
pub const MUSIC_TRACK: &str = "music.track";
/// Background music volume.
pub const MUSIC_VOLUME: &str = "music.volume";
/// Color theme.
pub const THEME: &str = "theme";

/// Every key the settings store may hold, with a short description.
pub const KNOWN_KEYS: [(&str, &str); 6] = [
    (CUE_ENABLED, "play a tone when each phase begins (true/false)"),
    (CUE_STYLE, "tone style (low/medium/high)"),
    (MUSIC_ENABLED, "play background music (true/false)"),
    (MUSIC_TRACK, "path of the background music file"),
    (MUSIC_VOLUME, "background music volume (0.0-1.0)"),
    (THEME, "color theme (dark/light)"),
];

/// Where a preference's effective value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingSource {
    /// The settings store.
    Stored,
    /// The config file or built-in default.
    Config,
}

/// One preference as shown by `settings list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingEntry {
    /// Setting key.
    pub key: &'static str,
    /// Effective value.
    pub value: String,
    /// Where the value comes from.
    pub source: SettingSource,
    /// Short description.
    pub description: &'static str,
}

/// Effective preferences for a session.
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    /// Whether cues play.
    pub cue_enabled: bool,
    /// Tone style for cues.
    pub cue_style: ToneStyle,
    /// Whether background music is wanted.
    pub music_enabled: bool,
    /// Background music file.
    pub music_track: Option<PathBuf>,
    /// Background music volume.
    pub music_volume: f32,
    /// Color theme.
    pub theme: Theme,
}

impl Preferences {
    /// Preferences straight from the config file.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            cue_enabled: config.cue.enabled,
            cue_style: config.cue.style,
            music_enabled: config.music.enabled,
            music_track: config.music.track.clone(),
            music_volume: config.music.volume,
            theme: config.theme,
        }
    }

    /// Config values overridden by anything in the settings store.
    ///
    /// Stored values that no longer parse are ignored with a warning so a
    /// stale setting never blocks a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings store cannot be read.
    pub fn resolve(config: &Config, store: &dyn SettingsStore) -> Result<Self, BreathError> {
        let mut prefs = Self::from_config(config);

        for (key, value) in store.list()? {
            if let Err(e) = prefs.apply(&key, &value) {
                warn!(key = %key, value = %value, "ignoring stored setting: {e}");
            }
        }

        Ok(prefs)
    }

    /// Every known preference with its effective value and origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings store cannot be read.
    pub fn entries(
        config: &Config,
        store: &dyn SettingsStore,
    ) -> Result<Vec<SettingEntry>, BreathError> {
        let prefs = Self::resolve(config, store)?;
        let stored = store.list()?;

        Ok(KNOWN_KEYS
            .iter()
            .map(|&(key, description)| {
                let is_stored = stored.iter().any(|(k, v)| {
                    k == key && Self::normalize(key, v).is_ok()
                });
                SettingEntry {
                    key,
                    value: prefs.value_of(key).unwrap_or_default(),
                    source: if is_stored {
                        SettingSource::Stored
                    } else {
                        SettingSource::Config
                    },
                    description,
                }
            })
            .collect())
    }

    /// Apply one key/value pair.
    ///
    /// # Errors
    ///
    /// Returns `BreathError::Config` for an unknown key or a malformed value.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), BreathError> {
        match key {
            CUE_ENABLED => self.cue_enabled = parse_bool(key, value)?,
            CUE_STYLE => {
                self.cue_style = ToneStyle::parse(value).ok_or_else(|| {
                    BreathError::Config(format!("{key}: expected low, medium or high, got '{value}'"))
                })?;
            }
            MUSIC_ENABLED => self.music_enabled = parse_bool(key, value)?,
            MUSIC_TRACK => {
                let value = value.trim();
                self.music_track = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            MUSIC_VOLUME => {
                let volume: f32 = value.trim().parse().map_err(|_| {
                    BreathError::Config(format!("{key}: expected a number, got '{value}'"))
                })?;
                if !(0.0..=1.0).contains(&volume) {
                    return Err(BreathError::Config(format!(
                        "{key}: must be between 0.0 and 1.0"
                    )));
                }
                self.music_volume = volume;
            }
            THEME => {
                self.theme = Theme::parse(value).ok_or_else(|| {
                    BreathError::Config(format!("{key}: expected dark or light, got '{value}'"))
                })?;
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    /// Canonical form of `value` for `key`, for storing.
    ///
    /// # Errors
    ///
    /// Returns `BreathError::Config` for an unknown key or a malformed value.
    pub fn normalize(key: &str, value: &str) -> Result<String, BreathError> {
        let mut probe = Self::from_config(&Config::default());
        probe.apply(key, value)?;
        Ok(probe.value_of(key).unwrap_or_default())
    }

    /// Current value of `key` as a string.
    #[must_use]
    pub fn value_of(&self, key: &str) -> Option<String> {
        match key {
            CUE_ENABLED => Some(self.cue_enabled.to_string()),
            CUE_STYLE => Some(self.cue_style.to_string()),
            MUSIC_ENABLED => Some(self.music_enabled.to_string()),
            MUSIC_TRACK => Some(
                self.music_track
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            MUSIC_VOLUME => Some(self.music_volume.to_string()),
            THEME => Some(self.theme.as_str().to_string()),
            _ => None,
        }
    }
}

/// Check that `key` is one the application understands.
///
/// # Errors
///
/// Returns `BreathError::Config` for an unknown key.
pub fn check_key(key: &str) -> Result<(), BreathError> {
    if KNOWN_KEYS.iter().any(|(k, _)| *k == key) {
        Ok(())
    } else {
        Err(unknown_key(key))
    }
}

fn unknown_key(key: &str) -> BreathError {
    let known: Vec<&str> = KNOWN_KEYS.iter().map(|(k, _)| *k).collect();
    BreathError::Config(format!(
        "unknown setting '{key}' (known: {})",
        known.join(", ")
    ))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, BreathError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(BreathError::Config(format!(
            "{key}: expected true or false, got '{value}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    use super::*;

    #[derive(Default)]
    struct MemoryStore(RefCell<BTreeMap<String, String>>);

    impl SettingsStore for MemoryStore {
        fn get(&self, key: &str) -> Result<Option<String>, BreathError> {
            Ok(self.0.borrow().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), BreathError> {
            self.0.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<bool, BreathError> {
            Ok(self.0.borrow_mut().remove(key).is_some())
        }

        fn list(&self) -> Result<Vec<(String, String)>, BreathError> {
            Ok(self
                .0
                .borrow()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect())
        }
    }

    #[test]
    fn test_from_config_defaults() {
        let prefs = Preferences::from_config(&Config::default());

        assert!(prefs.cue_enabled);
        assert_eq!(prefs.cue_style, ToneStyle::Medium);
        assert_eq!(prefs.theme, Theme::Dark);
        assert!(prefs.music_track.is_none());
    }

    #[test]
    fn test_store_overrides_config() {
        let store = MemoryStore::default();
        store.set(CUE_STYLE, "low").unwrap();
        store.set(CUE_ENABLED, "off").unwrap();
        store.set(THEME, "light").unwrap();
        store.set(MUSIC_TRACK, "/music/rain.ogg").unwrap();

        let prefs = Preferences::resolve(&Config::default(), &store).unwrap();

        assert_eq!(prefs.cue_style, ToneStyle::Low);
        assert!(!prefs.cue_enabled);
        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.music_track, Some(PathBuf::from("/music/rain.ogg")));
    }

    #[test]
    fn test_bad_stored_value_is_ignored() {
        let store = MemoryStore::default();
        store.set(CUE_STYLE, "deafening").unwrap();
        store.set("legacy.key", "x").unwrap();

        let prefs = Preferences::resolve(&Config::default(), &store).unwrap();
        assert_eq!(prefs.cue_style, ToneStyle::Medium);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(Preferences::normalize(CUE_ENABLED, "YES").unwrap(), "true");
        assert_eq!(Preferences::normalize(CUE_STYLE, "H").unwrap(), "high");
        assert_eq!(Preferences::normalize(MUSIC_VOLUME, "0.25").unwrap(), "0.25");
        assert!(Preferences::normalize(MUSIC_VOLUME, "1.5").is_err());
        assert!(Preferences::normalize("cue.pitch", "440").is_err());
    }

    #[test]
    fn test_entries_report_source() {
        let store = MemoryStore::default();
        store.set(THEME, "light").unwrap();
        store.set(CUE_STYLE, "shrill").unwrap();

        let entries = Preferences::entries(&Config::default(), &store).unwrap();
        assert_eq!(entries.len(), KNOWN_KEYS.len());

        let theme = entries.iter().find(|e| e.key == THEME).unwrap();
        assert_eq!(theme.value, "light");
        assert_eq!(theme.source, SettingSource::Stored);

        let style = entries.iter().find(|e| e.key == CUE_STYLE).unwrap();
        assert_eq!(style.value, "medium");
        assert_eq!(style.source, SettingSource::Config);
    }

    #[test]
    fn test_check_key() {
        assert!(check_key(THEME).is_ok());
        assert!(matches!(check_key("volume"), Err(BreathError::Config(_))));
    }
}
