//! Settings storage.
//!
//! Persists opaque key-value preferences to the local database. Meaning is
//! given to the values by `config::Preferences`.

use chrono::Utc;
use rusqlite::params;

use crate::core::SettingsStore;
use crate::error::BreathError;
use crate::storage::Database;

/// `SQLite`-backed settings store.
pub struct SettingsStorage {
    db: Database,
}

impl SettingsStorage {
    /// Create storage with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }
}

impl SettingsStore for SettingsStorage {
    fn get(&self, key: &str) -> Result<Option<String>, BreathError> {
        self.db
            .query_opt("SELECT value FROM settings WHERE key = ?1", [key], |row| {
                row.get(0)
            })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BreathError> {
        self.db.execute(
            r"INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)
              ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;

        tracing::debug!(key, value, "stored setting");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, BreathError> {
        let deleted = self
            .db
            .execute("DELETE FROM settings WHERE key = ?1", &[&key])?;
        Ok(deleted > 0)
    }

    fn list(&self) -> Result<Vec<(String, String)>, BreathError> {
        self.db.query_rows(
            "SELECT key, value FROM settings ORDER BY key",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
    }
}
