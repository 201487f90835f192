//! Built-in patterns and pattern lookup.

use serde::Serialize;

use crate::core::{NamedPattern, Pattern, PatternStore};
use crate::error::BreathError;

/// A pattern shipped with breathbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    /// Lookup name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// The phase durations.
    pub pattern: Pattern,
}

/// The built-in presets, in menu order.
pub static PRESETS: [Preset; 3] = [
    Preset {
        name: "box",
        description: "Equal counts on every side; steadies attention",
        pattern: Pattern::new(4, 4, 4, 4),
    },
    Preset {
        name: "relaxing",
        description: "4-7-8 breathing; long exhale for winding down",
        pattern: Pattern::new(4, 7, 8, 0),
    },
    Preset {
        name: "energizing",
        description: "Short holds and a brisk exhale",
        pattern: Pattern::new(4, 4, 6, 0),
    },
];

/// Find a preset by name, ignoring case.
#[must_use]
pub fn find(name: &str) -> Option<&'static Preset> {
    let name = name.trim();
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Whether `name` belongs to a preset.
#[must_use]
pub fn is_preset(name: &str) -> bool {
    find(name).is_some()
}

/// Where a resolved pattern came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// A built-in preset.
    Preset,
    /// A pattern saved by the user.
    Saved,
    /// Notation typed on the command line.
    Notation,
}

/// Resolve a preset name, a saved name or notation to a pattern.
///
/// Presets win over saved patterns; saving under a preset name is refused
/// anyway.
///
/// # Errors
///
/// Returns `BreathError::NotFound` if nothing matches, or a store error.
pub fn resolve(
    input: &str,
    store: &dyn PatternStore,
) -> Result<(NamedPattern, Source), BreathError> {
    let input = input.trim();

    if let Some(preset) = find(input) {
        return Ok((NamedPattern::new(preset.name, preset.pattern), Source::Preset));
    }

    if Pattern::is_notation(input) {
        let pattern = Pattern::parse(input)?;
        return Ok((NamedPattern::new(pattern.to_string(), pattern), Source::Notation));
    }

    let pattern = store.load_named(input)?;
    Ok((NamedPattern::new(input, pattern), Source::Saved))
}
