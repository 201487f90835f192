//! Database migrations for breathbox.
//!
//! Each migration is a function that upgrades the schema by one version.
//! Migrations are run automatically when the database is opened.

use std::collections::HashSet;

use rusqlite::{params, Connection};

use crate::core::NamedPattern;
use crate::error::BreathError;

/// Current schema version.
const CURRENT_VERSION: i32 = 2;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, BreathError> {
    let version: i32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| BreathError::Database(format!("Failed to get schema version: {e}")))?;

    Ok(version)
}

/// Set the schema version in the database.
fn set_version(conn: &Connection, version: i32) -> Result<(), BreathError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| BreathError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), BreathError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        tracing::debug!(version, "running migration");
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

/// Run a specific migration.
fn run_migration(conn: &Connection, version: i32) -> Result<(), BreathError> {
    match version {
        1 => migrate_v1(conn),
        2 => migrate_v2(conn),
        _ => Err(BreathError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: Initial schema.
///
/// Creates tables for:
/// - `patterns`: Named breathing patterns (names unique ignoring ASCII case)
/// - `settings`: Opaque key-value preferences
fn migrate_v1(conn: &Connection) -> Result<(), BreathError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS patterns (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE COLLATE NOCASE,
            inhale INTEGER NOT NULL CHECK (inhale >= 0),
            hold_in INTEGER NOT NULL CHECK (hold_in >= 0),
            exhale INTEGER NOT NULL CHECK (exhale >= 0),
            hold_out INTEGER NOT NULL CHECK (hold_out >= 0),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        ",
    )
    .map_err(|e| BreathError::Database(format!("Migration v1 failed: {e}")))
}

/// Migration v2: Unicode-aware pattern name keys.
///
/// `COLLATE NOCASE` only folds ASCII, so "Ärger" and "ärger" could both be
/// saved. Adds `patterns.name_key` (see [`NamedPattern::key`]) with a unique
/// index. Rows whose keys collide keep the oldest name; later ones get a
/// numeric suffix.
fn migrate_v2(conn: &Connection) -> Result<(), BreathError> {
    let fail = |e: rusqlite::Error| BreathError::Database(format!("Migration v2 failed: {e}"));

    let tx = conn.unchecked_transaction().map_err(fail)?;
    tx.execute_batch("ALTER TABLE patterns ADD COLUMN name_key TEXT NOT NULL DEFAULT '';")
        .map_err(fail)?;

    let rows: Vec<(i64, String)> = {
        let mut stmt = tx
            .prepare("SELECT id, name FROM patterns ORDER BY id")
            .map_err(fail)?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .map_err(fail)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(fail)?;
        rows
    };

    let mut taken = HashSet::new();
    for (id, name) in rows {
        let mut unique = name.clone();
        let mut suffix = 2;
        while !taken.insert(NamedPattern::key(&unique)) {
            unique = format!("{name} ({suffix})");
            suffix += 1;
        }
        if unique != name {
            tracing::warn!(from = %name, to = %unique, "renamed pattern with clashing name");
        }

        tx.execute(
            "UPDATE patterns SET name = ?1, name_key = ?2 WHERE id = ?3",
            params![unique, NamedPattern::key(&unique), id],
        )
        .map_err(fail)?;
    }

    tx.execute_batch("CREATE UNIQUE INDEX idx_patterns_name_key ON patterns(name_key);")
        .map_err(fail)?;
    tx.commit().map_err(fail)
}
