//! Pretty (human-readable) output formatting for breathbox.

use std::fmt::Write as _;

use colored::Colorize;

use crate::config::{SettingEntry, SettingSource};
use crate::core::{format_spoken, NamedPattern, PhaseKind};
use crate::features::patterns::{ImportReport, Preset};

use super::display::SessionSummary;

/// Colorize a phase label.
#[must_use]
pub fn phase_label_colored(kind: PhaseKind) -> String {
    let label = kind.label();
    match kind {
        PhaseKind::Inhale => label.cyan().bold().to_string(),
        PhaseKind::Exhale => label.green().bold().to_string(),
        PhaseKind::HoldAfterInhale | PhaseKind::HoldAfterExhale => {
            label.yellow().bold().to_string()
        }
    }
}

/// Format presets as a table.
#[must_use]
pub fn format_presets_pretty(presets: &[Preset]) -> String {
    let mut output = format!("Presets ({})\n", presets.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for preset in presets {
        let _ = writeln!(
            output,
            "{:<12} {:<10} {}",
            preset.name.bold(),
            preset.pattern.to_string().cyan(),
            preset.description.dimmed()
        );
    }

    output
}

/// Format saved patterns as a table.
#[must_use]
pub fn format_patterns_pretty(patterns: &[NamedPattern]) -> String {
    if patterns.is_empty() {
        return format!(
            "Saved patterns (0)\n  {}",
            "None yet. Save one with 'breathbox pattern save NAME 4-7-8-0'".dimmed()
        );
    }

    let mut output = format!("Saved patterns ({})\n", patterns.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for named in patterns {
        let _ = writeln!(
            output,
            "{:<24} {:<12} {}",
            named.name.bold(),
            named.pattern.to_string().cyan(),
            format!("{}s cycle", named.pattern.cycle_secs()).dimmed()
        );
    }

    output
}

/// Format one pattern with each phase on its own line.
#[must_use]
pub fn format_pattern_pretty(named: &NamedPattern, origin: &str) -> String {
    let pattern = &named.pattern;
    let mut output = format!("{} {}\n", named.name.bold(), format!("({origin})").dimmed());

    let _ = writeln!(output, "  {}: {}", "Pattern".dimmed(), pattern);
    let _ = writeln!(
        output,
        "  {}: {}s, {:.1} breaths/min",
        "Cycle".dimmed(),
        pattern.cycle_secs(),
        pattern.breaths_per_minute()
    );

    for kind in PhaseKind::ALL {
        let secs = pattern.duration_at(kind.index());
        let line = if secs == 0 {
            format!("{:<12} skipped", kind.label()).dimmed().to_string()
        } else {
            format!("{:<12} {secs}s", kind.label())
        };
        let _ = writeln!(output, "    {line}");
    }

    output
}

/// Format preferences as a table.
#[must_use]
pub fn format_settings_pretty(entries: &[SettingEntry]) -> String {
    let mut output = String::from("Settings\n");
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for entry in entries {
        let value = if entry.value.is_empty() {
            "(unset)".dimmed().to_string()
        } else {
            entry.value.clone()
        };
        let source = match entry.source {
            SettingSource::Stored => "stored".green(),
            SettingSource::Config => "config".dimmed(),
        };
        let _ = writeln!(output, "{:<14} {:<20} {}", entry.key.bold(), value, source);
    }

    output
}

/// Format an import report.
#[must_use]
pub fn format_import_report_pretty(report: &ImportReport) -> String {
    let mut output = format!(
        "{} added, {} replaced, {} skipped\n",
        report.added.len().to_string().green(),
        report.replaced.len().to_string().yellow(),
        report.skipped.len().to_string().dimmed()
    );

    for name in &report.added {
        let _ = writeln!(output, "  {} {name}", "+".green());
    }
    for name in &report.replaced {
        let _ = writeln!(output, "  {} {name}", "~".yellow());
    }
    for (name, reason) in &report.skipped {
        let _ = writeln!(output, "  {} {name}: {}", "-".dimmed(), reason.dimmed());
    }

    output
}

/// Format the end-of-session summary.
#[must_use]
pub fn format_summary_pretty(summary: &SessionSummary) -> String {
    let headline = if summary.completed {
        "Session complete".green().bold()
    } else {
        "Session stopped".yellow().bold()
    };

    format!(
        "{headline}\n  {}: {} ({})\n  {}: {}\n  {}: {}",
        "Pattern".dimmed(),
        summary.pattern.name,
        summary.pattern.pattern,
        "Time".dimmed(),
        format_spoken(summary.elapsed_secs),
        "Breaths".dimmed(),
        summary.breaths
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Pattern;
    use crate::features::patterns::PRESETS;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_format_presets_pretty() {
        plain();
        let output = format_presets_pretty(&PRESETS);

        assert!(output.starts_with("Presets (3)"));
        assert!(output.contains("relaxing"));
        assert!(output.contains("4-4-6-0"));
    }

    #[test]
    fn test_format_empty_patterns() {
        plain();
        assert!(format_patterns_pretty(&[]).contains("None yet"));
    }

    #[test]
    fn test_format_pattern_marks_skipped() {
        plain();
        let named = NamedPattern::new("relaxing", Pattern::new(4, 7, 8, 0));
        let output = format_pattern_pretty(&named, "preset");

        assert!(output.contains("relaxing (preset)"));
        assert!(output.contains("Cycle: 19s"));
        assert!(output.contains("Breathe Out  8s"));
        assert_eq!(output.matches("skipped").count(), 1);
    }

    #[test]
    fn test_format_summary_pretty() {
        plain();
        let summary = SessionSummary {
            pattern: NamedPattern::new("box", Pattern::new(4, 4, 4, 4)),
            elapsed_secs: 95,
            breaths: 6,
            completed: true,
        };
        let output = format_summary_pretty(&summary);

        assert!(output.starts_with("Session complete"));
        assert!(output.contains("1 minute, 35 seconds"));
        assert!(output.contains("Breaths: 6"));
    }
}
