//! Path resolution for breathbox configuration and data files.
//!
//! All breathbox data is stored in `~/.breathbox/` (or `$BREATHBOX_HOME`):
//! - `config.yaml` - Main configuration file
//! - `breathbox.db` - `SQLite` database for saved patterns and settings
//! - `logs/` - Log output of the interactive session

use std::path::PathBuf;

use crate::error::BreathError;

/// Environment variable that overrides the data directory.
pub const HOME_ENV: &str = "BREATHBOX_HOME";

/// Paths to breathbox configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.breathbox/`
    pub root: PathBuf,
    /// Config file: `~/.breathbox/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.breathbox/breathbox.db`
    pub database: PathBuf,
    /// Logs directory: `~/.breathbox/logs/`
    pub logs: PathBuf,
}

impl Paths {
    /// Resolve paths from `$BREATHBOX_HOME`, falling back to `$HOME/.breathbox`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, BreathError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            BreathError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".breathbox")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("breathbox.db"),
            logs: root.join("logs"),
            root,
        }
    }

    /// Log file for the interactive session.
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.logs.join("breathbox.log")
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), BreathError> {
        for dir in [&self.root, &self.logs] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    BreathError::Config(format!(
                        "Failed to create directory {}: {e}",
                        dir.display()
                    ))
                })?;
            }
        }

        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| {
            // Fall back to the current directory if home cannot be determined
            Self::with_root(PathBuf::from(".breathbox"))
        })
    }
}
