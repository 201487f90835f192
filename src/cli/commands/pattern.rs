//! Saved pattern commands.

use std::path::Path;

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{OutputFormat, PatternCommands};
use crate::cli::Context;
use crate::core::{Pattern, PatternStore};
use crate::error::BreathError;
use crate::features::patterns::{
    self, import, is_preset, validate_name, BundleFormat, PatternBundle, Source,
};
use crate::output::{format_import_report, format_pattern, format_patterns, to_json};

/// Execute pattern subcommands.
///
/// # Errors
///
/// Returns an error if the store fails or the request is invalid.
pub fn pattern(ctx: &Context, cmd: PatternCommands) -> Result<String, BreathError> {
    let store = ctx.patterns()?;
    let format = ctx.format;

    match cmd {
        PatternCommands::List => format_patterns(&store.list_all()?, format),
        PatternCommands::Show { name } => show(&store, &name, format),
        PatternCommands::Save {
            name,
            pattern,
            force,
        } => save(&store, &name, &pattern, force, format),
        PatternCommands::Delete { name } => delete(&store, &name, format),
        PatternCommands::Export { file, format: bundle_format } => {
            export(&store, file.as_deref(), bundle_format, format)
        }
        PatternCommands::Import { file, overwrite } => {
            let bundle = PatternBundle::read(&file)?;
            format_import_report(&import(&bundle, &store, overwrite)?, format)
        }
    }
}

fn show(store: &dyn PatternStore, name: &str, format: OutputFormat) -> Result<String, BreathError> {
    let (named, source) = patterns::resolve(name, store)?;
    let origin = match source {
        Source::Preset => "preset",
        Source::Saved => "saved",
        Source::Notation => "notation",
    };
    format_pattern(&named, origin, format)
}

fn save(
    store: &dyn PatternStore,
    name: &str,
    notation: &str,
    force: bool,
    format: OutputFormat,
) -> Result<String, BreathError> {
    let name = validate_name(name)?;
    if is_preset(name) {
        return Err(BreathError::NameConflict(format!(
            "Built-in preset '{name}'"
        )));
    }

    let pattern = Pattern::parse(notation)?;
    if force {
        store.replace_named(name, &pattern)?;
    } else {
        store.save_named(name, &pattern)?;
    }

    match format {
        OutputFormat::Json => to_json(&json!({
            "saved": name,
            "pattern": pattern,
            "notation": pattern.to_string(),
        })),
        OutputFormat::Pretty => Ok(format!(
            "{} {} ({})",
            "Saved".green(),
            name.bold(),
            pattern.to_string().cyan()
        )),
    }
}

fn delete(store: &dyn PatternStore, name: &str, format: OutputFormat) -> Result<String, BreathError> {
    if is_preset(name) {
        return Err(BreathError::InvalidPattern(format!(
            "'{}' is a built-in preset and cannot be deleted",
            name.trim()
        )));
    }

    store.delete(name)?;

    match format {
        OutputFormat::Json => to_json(&json!({ "deleted": name.trim() })),
        OutputFormat::Pretty => Ok(format!("{} {}", "Deleted".yellow(), name.trim().bold())),
    }
}

fn export(
    store: &dyn PatternStore,
    file: Option<&Path>,
    bundle_format: Option<BundleFormat>,
    format: OutputFormat,
) -> Result<String, BreathError> {
    let bundle = PatternBundle::from_store(store)?;
    let bundle_format = bundle_format
        .or_else(|| file.map(BundleFormat::from_path))
        .unwrap_or(BundleFormat::Yaml);
    let text = bundle.render(bundle_format)?;

    let Some(path) = file else {
        return Ok(text.trim_end().to_string());
    };

    std::fs::write(path, text)?;
    tracing::info!(path = %path.display(), count = bundle.patterns.len(), "exported patterns");

    match format {
        OutputFormat::Json => to_json(&json!({
            "exported": bundle.patterns.len(),
            "file": path.display().to_string(),
        })),
        OutputFormat::Pretty => Ok(format!(
            "Exported {} pattern{} to {}",
            bundle.patterns.len(),
            if bundle.patterns.len() == 1 { "" } else { "s" },
            path.display()
        )),
    }
}
