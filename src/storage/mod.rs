//! Storage layer for breathbox.
//!
//! This module provides SQLite-based persistence for:
//! - Saved breathing patterns
//! - User preferences (cue style, music, theme)

mod database;
mod migrations;

pub use database::Database;
