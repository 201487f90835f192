//! Configuration settings for breathbox.
//!
//! Settings are loaded from `~/.breathbox/config.yaml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::core::ToneStyle;
use crate::error::BreathError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Phase-entry cue settings.
    pub cue: CueConfig,
    /// Background music preferences.
    pub music: MusicConfig,
    /// Color theme.
    pub theme: Theme,
    /// Session length settings.
    pub session: SessionConfig,
    /// Tick scheduling settings.
    pub ticker: TickerConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Pattern used when `start` is given none.
    #[serde(default = "default_pattern")]
    pub default_pattern: String,
}

/// Phase-entry cue settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CueConfig {
    /// Play a tone when each phase begins.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Tone style.
    #[serde(default)]
    pub style: ToneStyle,
}

/// Background music preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicConfig {
    /// Whether music should accompany sessions.
    #[serde(default)]
    pub enabled: bool,
    /// Audio file to play.
    #[serde(default)]
    pub track: Option<PathBuf>,
    /// Music volume from 0.0 to 1.0.
    #[serde(default = "default_music_volume")]
    pub volume: f32,
}

/// Color theme.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light text on a dark terminal.
    #[default]
    Dark,
    /// Dark text on a light terminal.
    Light,
}

impl Theme {
    /// Parse a theme name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Lowercase name, as stored in settings.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// The other theme.
    #[must_use]
    pub const fn toggled(&self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Session length settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SessionConfig {
    /// Default session length in minutes; 0 runs until stopped.
    #[serde(default)]
    pub default_minutes: u32,
}

/// Tick scheduling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TickerConfig {
    /// Seconds a tick may be late before the session is stopped.
    #[serde(default = "default_max_lag")]
    pub max_lag_secs: u64,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

fn default_pattern() -> String {
    "box".to_string()
}

const fn default_true() -> bool {
    true
}

const fn default_music_volume() -> f32 {
    0.5
}

const fn default_max_lag() -> u64 {
    3
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            default_pattern: default_pattern(),
        }
    }
}

impl Default for CueConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            style: ToneStyle::default(),
        }
    }
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            track: None,
            volume: default_music_volume(),
        }
    }
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            max_lag_secs: default_max_lag(),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, BreathError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, BreathError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            BreathError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            BreathError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), BreathError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| BreathError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            BreathError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.general.default_pattern, "box");
        assert!(config.cue.enabled);
        assert_eq!(config.cue.style, ToneStyle::Medium);
        assert!(!config.music.enabled);
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.session.default_minutes, 0);
        assert_eq!(config.ticker.max_lag_secs, 3);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();

        // Should return defaults when file doesn't exist
        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.cue.style = ToneStyle::Low;
        config.session.default_minutes = 10;
        config.theme = Theme::Light;

        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.cue.style, ToneStyle::Low);
        assert_eq!(loaded.session.default_minutes, 10);
        assert_eq!(loaded.theme, Theme::Light);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r"
cue:
  style: high
theme: light
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.cue.style, ToneStyle::High);
        assert_eq!(config.theme, Theme::Light);
        // Defaults should be used for missing fields
        assert!(config.cue.enabled);
        assert_eq!(config.general.default_pattern, "box");
    }

    #[test]
    fn test_invalid_config_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "cue: [not, a, map]").unwrap();

        assert!(matches!(
            Config::load_from_path(&config_path),
            Err(BreathError::Config(_))
        ));
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!(Theme::parse("LIGHT"), Some(Theme::Light));
        assert_eq!(Theme::parse("solarized"), None);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
