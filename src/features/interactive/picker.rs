//! Fuzzy picker implementation using skim.
//!
//! Provides an interactive terminal interface for choosing a pattern.

use std::fmt::Write as _;
use std::sync::Arc;

use skim::prelude::*;

use crate::core::{NamedPattern, PhaseKind};

/// Where a pickable pattern comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOrigin {
    /// Built-in preset.
    Preset,
    /// Saved by the user.
    Saved,
}

impl std::fmt::Display for PickOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Preset => write!(f, "preset"),
            Self::Saved => write!(f, "saved"),
        }
    }
}

/// Options for the picker.
#[derive(Debug, Clone, Default)]
pub struct PickOptions {
    /// Initial query string.
    pub query: Option<String>,
    /// Prompt text.
    pub prompt: Option<String>,
    /// Show a preview of the phases.
    pub preview: bool,
}

/// A wrapper around a named pattern that implements `SkimItem`.
struct PatternItem {
    named: NamedPattern,
    origin: PickOrigin,
    display: String,
}

impl PatternItem {
    fn new(named: NamedPattern, origin: PickOrigin) -> Self {
        let display = item_line(&named, origin);
        Self {
            named,
            origin,
            display,
        }
    }
}

/// One picker row: name, notation and origin.
fn item_line(named: &NamedPattern, origin: PickOrigin) -> String {
    format!("{:<20} {:<12} [{origin}]", named.name, named.pattern.to_string())
}

/// Preview text listing each phase.
fn preview_text(named: &NamedPattern, origin: PickOrigin) -> String {
    let pattern = &named.pattern;
    let mut preview = String::new();

    let _ = writeln!(preview, "Name: {} ({origin})", named.name);
    let _ = writeln!(preview, "Pattern: {pattern}");
    let _ = writeln!(
        preview,
        "Cycle: {}s, {:.1} breaths/min\n",
        pattern.cycle_secs(),
        pattern.breaths_per_minute()
    );

    for kind in PhaseKind::ALL {
        let secs = pattern.duration_at(kind.index());
        let note = if secs == 0 { " (skipped)" } else { "" };
        let _ = writeln!(preview, "  {:<12} {secs}s{note}", kind.label());
    }

    preview
}

impl SkimItem for PatternItem {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.display)
    }

    fn preview(&self, _context: PreviewContext<'_>) -> ItemPreview {
        ItemPreview::Text(preview_text(&self.named, self.origin))
    }

    fn output(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.named.name)
    }
}

/// Run the interactive picker.
///
/// Returns the chosen pattern's name, or `None` if the list is empty, the
/// user aborted, or skim could not start.
#[must_use]
pub fn pick_pattern(
    candidates: Vec<(NamedPattern, PickOrigin)>,
    options: &PickOptions,
) -> Option<String> {
    if candidates.is_empty() {
        return None;
    }

    let skim_options = SkimOptionsBuilder::default()
        .height(Some("50%"))
        .prompt(Some(options.prompt.as_deref().unwrap_or("Pattern > ")))
        .query(options.query.as_deref())
        .preview(options.preview.then_some(""))
        .preview_window(options.preview.then_some("right:50%:wrap"))
        .header(Some("Enter: start | Ctrl-C: cancel"))
        .build()
        .ok()?;

    let (tx, rx): (SkimItemSender, SkimItemReceiver) = unbounded();
    for (named, origin) in candidates {
        let item: Arc<dyn SkimItem> = Arc::new(PatternItem::new(named, origin));
        let _ = tx.send(item);
    }
    drop(tx);

    let output = Skim::run_with(&skim_options, Some(rx))?;
    if output.is_abort {
        return None;
    }

    output
        .selected_items
        .first()
        .map(|item| item.output().to_string())
}
