//! JSON output formatting for breathbox.

use serde::Serialize;
use serde_json::json;

use crate::core::{NamedPattern, PhaseKind};
use crate::error::BreathError;
use crate::features::patterns::Preset;

/// Format presets as JSON.
///
/// # Errors
///
/// Returns `BreathError::Parse` if JSON serialization fails.
pub fn format_presets_json(presets: &[Preset]) -> Result<String, BreathError> {
    let items: Vec<_> = presets
        .iter()
        .map(|p| {
            json!({
                "name": p.name,
                "description": p.description,
                "notation": p.pattern.to_string(),
                "pattern": p.pattern,
            })
        })
        .collect();

    let output = json!({
        "count": items.len(),
        "items": items
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format saved patterns as JSON.
///
/// # Errors
///
/// Returns `BreathError::Parse` if JSON serialization fails.
pub fn format_patterns_json(patterns: &[NamedPattern]) -> Result<String, BreathError> {
    let output = json!({
        "count": patterns.len(),
        "items": patterns
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format one pattern as JSON, with its phases spelled out.
///
/// # Errors
///
/// Returns `BreathError::Parse` if JSON serialization fails.
pub fn format_pattern_json(named: &NamedPattern, origin: &str) -> Result<String, BreathError> {
    let pattern = &named.pattern;
    let phases: Vec<_> = PhaseKind::ALL
        .iter()
        .map(|kind| {
            json!({
                "kind": kind,
                "label": kind.label(),
                "duration_secs": pattern.duration_at(kind.index()),
            })
        })
        .collect();

    let output = json!({
        "name": named.name,
        "origin": origin,
        "notation": pattern.to_string(),
        "cycle_secs": pattern.cycle_secs(),
        "breaths_per_minute": pattern.breaths_per_minute(),
        "phases": phases,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Serialize any value as pretty JSON.
///
/// # Errors
///
/// Returns `BreathError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, BreathError> {
    Ok(serde_json::to_string_pretty(value)?)
}
