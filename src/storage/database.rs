//! `SQLite` database connection and operations.
//!
//! The database is stored at `~/.breathbox/breathbox.db` and contains tables for:
//! - Saved breathing patterns
//! - User preferences
//!
//! Stores go through the helpers here so every `rusqlite` error surfaces as
//! `BreathError::Database`.

use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, OptionalExtension, Params, Row, ToSql};

use crate::config::Paths;
use crate::error::BreathError;

use super::migrations;

/// How long a write waits on another breathbox process holding the lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(2);

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database described by `paths`, creating its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_with(paths: &Paths) -> Result<Self, BreathError> {
        paths.ensure_dirs()?;
        Self::open_at(&paths.database)
    }

    /// Open the database at a specific path, migrating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &Path) -> Result<Self, BreathError> {
        let conn = Connection::open(path).map_err(|e| {
            BreathError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;

        tracing::debug!(path = %path.display(), "opened database");
        Self::prepare(conn)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, BreathError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            BreathError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        Self::prepare(conn)
    }

    fn prepare(conn: Connection) -> Result<Self, BreathError> {
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|e| BreathError::Database(format!("Failed to set busy timeout: {e}")))?;
        migrations::run(&conn)?;
        Ok(Self { conn })
    }

    /// Execute a statement and return the number of changed rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub fn execute(&self, sql: &str, params: &[&dyn ToSql]) -> Result<usize, BreathError> {
        self.conn.execute(sql, params).map_err(query_failed)
    }

    /// Fetch at most one row.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be mapped.
    pub fn query_opt<T, P, F>(&self, sql: &str, params: P, map: F) -> Result<Option<T>, BreathError>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        self.conn
            .query_row(sql, params, map)
            .optional()
            .map_err(query_failed)
    }

    /// Fetch every row of a query.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or any row cannot be mapped.
    pub fn query_rows<T, P, F>(&self, sql: &str, params: P, map: F) -> Result<Vec<T>, BreathError>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self.conn.prepare(sql).map_err(query_failed)?;
        let rows = stmt
            .query_map(params, map)
            .map_err(query_failed)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(query_failed)?;
        Ok(rows)
    }

    #[cfg(test)]
    pub(crate) const fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn query_failed(e: rusqlite::Error) -> BreathError {
    BreathError::Database(format!("Query failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(db: &Database) -> i32 {
        migrations::get_version(db.connection()).unwrap()
    }

    #[test]
    fn test_open_in_memory_is_migrated() {
        let db = Database::open_in_memory().unwrap();
        assert!(version(&db) > 0);
    }

    #[test]
    fn test_open_with_creates_root() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("home"));

        let db = Database::open_with(&paths).unwrap();
        assert!(version(&db) > 0);
        assert!(paths.database.exists());
    }

    #[test]
    fn test_reopen_keeps_rows() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        {
            let db = Database::open_at(&db_path).unwrap();
            let changed = db
                .execute(
                    "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)",
                    &[&"theme", &"light", &"2024-01-01T00:00:00Z"],
                )
                .unwrap();
            assert_eq!(changed, 1);
        }

        let db = Database::open_at(&db_path).unwrap();
        let value = db
            .query_opt("SELECT value FROM settings WHERE key = ?1", ["theme"], |row| {
                row.get::<_, String>(0)
            })
            .unwrap();
        assert_eq!(value.as_deref(), Some("light"));
    }

    #[test]
    fn test_query_helpers() {
        let db = Database::open_in_memory().unwrap();
        for key in ["b", "a"] {
            db.execute(
                "INSERT INTO settings (key, value, updated_at) VALUES (?1, 'x', 'now')",
                &[&key],
            )
            .unwrap();
        }

        let keys: Vec<String> = db
            .query_rows("SELECT key FROM settings ORDER BY key", [], |row| row.get(0))
            .unwrap();
        assert_eq!(keys, vec!["a", "b"]);

        let missing: Option<String> = db
            .query_opt("SELECT value FROM settings WHERE key = ?1", ["zzz"], |row| {
                row.get(0)
            })
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_bad_sql_is_database_error() {
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(
            db.execute("DELETE FROM nowhere", &[]),
            Err(BreathError::Database(_))
        ));
    }
}
