//! State shared by every command.

use crate::cli::args::OutputFormat;
use crate::config::{Config, Paths, Preferences};
use crate::error::BreathError;
use crate::features::patterns::PatternStorage;
use crate::features::settings::SettingsStorage;
use crate::storage::Database;

/// Resolved paths, loaded config and the output format for one invocation.
#[derive(Debug, Clone)]
pub struct Context {
    /// Data directory layout.
    pub paths: Paths,
    /// Contents of `config.yaml`.
    pub config: Config,
    /// Output format for results.
    pub format: OutputFormat,
}

impl Context {
    /// Resolve paths and load the config file.
    ///
    /// `output` overrides `general.default_output`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory is unknown or the config file
    /// cannot be parsed.
    pub fn load(output: Option<OutputFormat>) -> Result<Self, BreathError> {
        let paths = Paths::new()?;
        let config = Config::load_from_path(&paths.config_file)?;
        Ok(Self::with_config(paths, config, output))
    }

    /// Build a context from parts (useful for testing).
    #[must_use]
    pub fn with_config(paths: Paths, config: Config, output: Option<OutputFormat>) -> Self {
        let format = output.unwrap_or(config.general.default_output);
        Self {
            paths,
            config,
            format,
        }
    }

    /// Open the saved pattern store.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn patterns(&self) -> Result<PatternStorage, BreathError> {
        Ok(PatternStorage::with_database(Database::open_with(
            &self.paths,
        )?))
    }

    /// Open the settings store.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn settings(&self) -> Result<SettingsStorage, BreathError> {
        Ok(SettingsStorage::with_database(Database::open_with(
            &self.paths,
        )?))
    }

    /// Effective preferences: config file overridden by stored settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings store cannot be read.
    pub fn preferences(&self) -> Result<Preferences, BreathError> {
        Preferences::resolve(&self.config, &self.settings()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use crate::core::SettingsStore;

    #[test]
    fn test_output_override() {
        let paths = Paths::with_root("/tmp/breathbox-test".into());
        let mut config = Config::default();
        config.general.default_output = OutputFormat::Json;

        assert_eq!(
            Context::with_config(paths.clone(), config.clone(), None).format,
            OutputFormat::Json
        );
        assert_eq!(
            Context::with_config(paths, config, Some(OutputFormat::Pretty)).format,
            OutputFormat::Pretty
        );
    }

    #[test]
    fn test_stores_share_database() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let ctx = Context::with_config(
            Paths::with_root(temp_dir.path().to_path_buf()),
            Config::default(),
            None,
        );

        ctx.settings().unwrap().set("theme", "light").unwrap();
        assert_eq!(ctx.preferences().unwrap().theme, Theme::Light);
    }
}
