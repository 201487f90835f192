//! Preference commands.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{OutputFormat, SettingsCommands};
use crate::cli::Context;
use crate::config::preferences::check_key;
use crate::config::{Config, Preferences};
use crate::core::SettingsStore;
use crate::error::BreathError;
use crate::output::{format_settings, to_json};

/// Execute settings subcommands.
///
/// # Errors
///
/// Returns an error for an unknown key, a malformed value, or a store failure.
pub fn settings(ctx: &Context, cmd: SettingsCommands) -> Result<String, BreathError> {
    let store = ctx.settings()?;
    run(&ctx.config, &store, cmd, ctx.format)
}

fn run(
    config: &Config,
    store: &dyn SettingsStore,
    cmd: SettingsCommands,
    format: OutputFormat,
) -> Result<String, BreathError> {
    match cmd {
        SettingsCommands::List => format_settings(&Preferences::entries(config, store)?, format),

        SettingsCommands::Get { key } => {
            check_key(&key)?;
            let entry = Preferences::entries(config, store)?
                .into_iter()
                .find(|e| e.key == key)
                .ok_or_else(|| BreathError::NotFound(format!("Setting '{key}'")))?;

            match format {
                OutputFormat::Json => to_json(&entry),
                OutputFormat::Pretty => Ok(entry.value),
            }
        }

        SettingsCommands::Set { key, value } => {
            check_key(&key)?;
            let value = Preferences::normalize(&key, &value)?;
            store.set(&key, &value)?;

            match format {
                OutputFormat::Json => to_json(&json!({ "key": key, "value": value })),
                OutputFormat::Pretty => Ok(format!("{} = {}", key.bold(), value.green())),
            }
        }

        SettingsCommands::Unset { key } => {
            check_key(&key)?;
            let removed = store.remove(&key)?;

            match format {
                OutputFormat::Json => to_json(&json!({ "key": key, "removed": removed })),
                OutputFormat::Pretty if removed => Ok(format!("{} reset to config value", key.bold())),
                OutputFormat::Pretty => Ok(format!("{} was not set", key.bold())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::settings::SettingsStorage;
    use crate::storage::Database;

    fn store() -> SettingsStorage {
        SettingsStorage::with_database(Database::open_in_memory().unwrap())
    }

    fn exec(store: &SettingsStorage, cmd: SettingsCommands) -> Result<String, BreathError> {
        colored::control::set_override(false);
        run(&Config::default(), store, cmd, OutputFormat::Pretty)
    }

    #[test]
    fn test_set_normalizes_and_get_reads_back() {
        let store = store();
        let out = exec(
            &store,
            SettingsCommands::Set {
                key: "cue.enabled".to_string(),
                value: "OFF".to_string(),
            },
        )
        .unwrap();
        assert_eq!(out, "cue.enabled = false");
        assert_eq!(store.get("cue.enabled").unwrap().as_deref(), Some("false"));

        let value = exec(
            &store,
            SettingsCommands::Get {
                key: "cue.enabled".to_string(),
            },
        )
        .unwrap();
        assert_eq!(value, "false");
    }

    #[test]
    fn test_get_falls_back_to_config() {
        let value = exec(
            &store(),
            SettingsCommands::Get {
                key: "cue.style".to_string(),
            },
        )
        .unwrap();
        assert_eq!(value, "medium");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let store = store();
        let result = exec(
            &store,
            SettingsCommands::Set {
                key: "volume".to_string(),
                value: "11".to_string(),
            },
        );
        assert!(matches!(result, Err(BreathError::Config(_))));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_value_not_stored() {
        let store = store();
        let result = exec(
            &store,
            SettingsCommands::Set {
                key: "theme".to_string(),
                value: "neon".to_string(),
            },
        );
        assert!(result.is_err());
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn test_unset() {
        let store = store();
        store.set("theme", "light").unwrap();

        let out = exec(
            &store,
            SettingsCommands::Unset {
                key: "theme".to_string(),
            },
        )
        .unwrap();
        assert!(out.contains("reset"));
        assert_eq!(store.get("theme").unwrap(), None);
    }
}
