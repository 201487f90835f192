//! Saved pattern storage.
//!
//! Persists named patterns to the local database. Names are unique ignoring
//! case: every lookup goes through the `name_key` column, which holds
//! [`NamedPattern::key`] and carries a unique index.

use chrono::Utc;
use rusqlite::{params, Row};

use crate::core::{NamedPattern, Pattern, PatternStore};
use crate::error::BreathError;
use crate::storage::Database;

/// Longest accepted pattern name.
const MAX_NAME_LEN: usize = 64;

/// `SQLite`-backed pattern store.
pub struct PatternStorage {
    db: Database,
}

impl PatternStorage {
    /// Create storage with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Whether a pattern with this name exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn exists(&self, name: &str) -> Result<bool, BreathError> {
        Ok(self.find(name.trim())?.is_some())
    }

    fn find(&self, name: &str) -> Result<Option<NamedPattern>, BreathError> {
        self.db.query_opt(
            r"SELECT name, inhale, hold_in, exhale, hold_out
              FROM patterns WHERE name_key = ?1",
            [NamedPattern::key(name)],
            row_to_pattern,
        )
    }

    fn insert(&self, name: &str, pattern: &Pattern) -> Result<(), BreathError> {
        let now = Utc::now().to_rfc3339();
        self.db.execute(
            r"INSERT INTO patterns
              (name, name_key, inhale, hold_in, exhale, hold_out, created_at, updated_at)
              VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
            params![
                name,
                NamedPattern::key(name),
                pattern.inhale,
                pattern.hold_in,
                pattern.exhale,
                pattern.hold_out,
                now,
            ],
        )?;
        Ok(())
    }
}

impl PatternStore for PatternStorage {
    fn load_named(&self, name: &str) -> Result<Pattern, BreathError> {
        self.find(name.trim())?
            .map(|named| named.pattern)
            .ok_or_else(|| BreathError::NotFound(format!("Pattern '{}'", name.trim())))
    }

    fn save_named(&self, name: &str, pattern: &Pattern) -> Result<(), BreathError> {
        let name = validate_name(name)?;
        pattern.validate()?;

        if let Some(existing) = self.find(name)? {
            return Err(BreathError::NameConflict(format!(
                "Pattern '{}'",
                existing.name
            )));
        }

        self.insert(name, pattern)?;
        tracing::info!(name, %pattern, "saved pattern");
        Ok(())
    }

    fn replace_named(&self, name: &str, pattern: &Pattern) -> Result<(), BreathError> {
        let name = validate_name(name)?;
        pattern.validate()?;

        // The stored name takes the new spelling.
        let updated = self
            .db
            .execute(
                r"UPDATE patterns SET
                  name = ?1, inhale = ?2, hold_in = ?3, exhale = ?4, hold_out = ?5,
                  updated_at = ?6
                  WHERE name_key = ?7",
                &[
                    &name,
                    &pattern.inhale,
                    &pattern.hold_in,
                    &pattern.exhale,
                    &pattern.hold_out,
                    &Utc::now().to_rfc3339(),
                    &NamedPattern::key(name),
                ],
            )?;

        if updated == 0 {
            self.insert(name, pattern)?;
        }

        tracing::info!(name, %pattern, "replaced pattern");
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<NamedPattern>, BreathError> {
        self.db.query_rows(
            r"SELECT name, inhale, hold_in, exhale, hold_out
              FROM patterns ORDER BY name_key, name",
            [],
            row_to_pattern,
        )
    }

    fn delete(&self, name: &str) -> Result<(), BreathError> {
        let name = name.trim();
        let deleted = self
            .db
            .execute(
                "DELETE FROM patterns WHERE name_key = ?1",
                &[&NamedPattern::key(name)],
            )?;

        if deleted == 0 {
            return Err(BreathError::NotFound(format!("Pattern '{name}'")));
        }

        tracing::info!(name, "deleted pattern");
        Ok(())
    }
}

/// Check a user-supplied pattern name and return it trimmed.
///
/// Names that read as notation (`4-7-8`) are refused so that `start 4-7-8`
/// is never ambiguous.
///
/// # Errors
///
/// Returns `BreathError::InvalidPattern` for an empty, overlong or numeric name.
pub fn validate_name(name: &str) -> Result<&str, BreathError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(BreathError::InvalidPattern(
            "pattern name cannot be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(BreathError::InvalidPattern(format!(
            "pattern name is longer than {MAX_NAME_LEN} characters"
        )));
    }
    if Pattern::is_notation(name) {
        return Err(BreathError::InvalidPattern(format!(
            "'{name}' looks like a pattern, not a name"
        )));
    }

    Ok(name)
}

fn row_to_pattern(row: &Row<'_>) -> rusqlite::Result<NamedPattern> {
    Ok(NamedPattern::new(
        row.get::<_, String>(0)?,
        Pattern::new(row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?),
    ))
}
