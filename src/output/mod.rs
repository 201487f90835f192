//! Output formatting for breathbox.
//!
//! This module provides formatters for patterns, settings and session
//! results, plus the line-by-line display used by `start --plain`.

mod display;
mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::config::SettingEntry;
use crate::core::NamedPattern;
use crate::error::BreathError;
use crate::features::patterns::{ImportReport, Preset};

pub use display::{LineDisplay, SessionSummary, SessionTally};
pub use json::*;
pub use pretty::*;

/// Format the built-in presets.
///
/// # Errors
///
/// Returns `BreathError::Parse` if JSON serialization fails.
pub fn format_presets(presets: &[Preset], format: OutputFormat) -> Result<String, BreathError> {
    match format {
        OutputFormat::Pretty => Ok(format_presets_pretty(presets)),
        OutputFormat::Json => format_presets_json(presets),
    }
}

/// Format saved patterns.
///
/// # Errors
///
/// Returns `BreathError::Parse` if JSON serialization fails.
pub fn format_patterns(
    patterns: &[NamedPattern],
    format: OutputFormat,
) -> Result<String, BreathError> {
    match format {
        OutputFormat::Pretty => Ok(format_patterns_pretty(patterns)),
        OutputFormat::Json => format_patterns_json(patterns),
    }
}

/// Format one pattern with its phases.
///
/// # Errors
///
/// Returns `BreathError::Parse` if JSON serialization fails.
pub fn format_pattern(
    named: &NamedPattern,
    origin: &str,
    format: OutputFormat,
) -> Result<String, BreathError> {
    match format {
        OutputFormat::Pretty => Ok(format_pattern_pretty(named, origin)),
        OutputFormat::Json => format_pattern_json(named, origin),
    }
}

/// Format preferences.
///
/// # Errors
///
/// Returns `BreathError::Parse` if JSON serialization fails.
pub fn format_settings(
    entries: &[SettingEntry],
    format: OutputFormat,
) -> Result<String, BreathError> {
    match format {
        OutputFormat::Pretty => Ok(format_settings_pretty(entries)),
        OutputFormat::Json => to_json(entries),
    }
}

/// Format the result of an import.
///
/// # Errors
///
/// Returns `BreathError::Parse` if JSON serialization fails.
pub fn format_import_report(
    report: &ImportReport,
    format: OutputFormat,
) -> Result<String, BreathError> {
    match format {
        OutputFormat::Pretty => Ok(format_import_report_pretty(report)),
        OutputFormat::Json => to_json(report),
    }
}

/// Format the end-of-session summary.
///
/// # Errors
///
/// Returns `BreathError::Parse` if JSON serialization fails.
pub fn format_summary(
    summary: &SessionSummary,
    format: OutputFormat,
) -> Result<String, BreathError> {
    match format {
        OutputFormat::Pretty => Ok(format_summary_pretty(summary)),
        OutputFormat::Json => to_json(summary),
    }
}
