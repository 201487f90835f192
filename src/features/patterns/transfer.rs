//! Pattern import and export.
//!
//! Saved patterns travel as a bundle in YAML or JSON. The format is picked
//! from the file extension unless given explicitly.

use std::path::Path;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::{NamedPattern, PatternStore};
use crate::error::BreathError;

/// Current bundle format version.
pub const BUNDLE_VERSION: u32 = 1;

/// Serialization format for a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BundleFormat {
    /// YAML document
    Yaml,
    /// JSON document
    Json,
}

impl BundleFormat {
    /// Guess the format from a file extension; YAML when unknown.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// A set of exported patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternBundle {
    /// Bundle format version.
    pub version: u32,
    /// When the bundle was written.
    pub exported_at: DateTime<Utc>,
    /// The patterns.
    pub patterns: Vec<NamedPattern>,
}

impl PatternBundle {
    /// Bundle every pattern in `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn from_store(store: &dyn PatternStore) -> Result<Self, BreathError> {
        Ok(Self {
            version: BUNDLE_VERSION,
            exported_at: Utc::now(),
            patterns: store.list_all()?,
        })
    }

    /// Render the bundle.
    ///
    /// # Errors
    ///
    /// Returns `BreathError::Parse` if serialization fails.
    pub fn render(&self, format: BundleFormat) -> Result<String, BreathError> {
        Ok(match format {
            BundleFormat::Yaml => serde_yaml::to_string(self)?,
            BundleFormat::Json => serde_json::to_string_pretty(self)?,
        })
    }

    /// Parse a bundle.
    ///
    /// # Errors
    ///
    /// Returns `BreathError::Parse` if the text is not a bundle of a
    /// supported version.
    pub fn parse(text: &str, format: BundleFormat) -> Result<Self, BreathError> {
        let bundle: Self = match format {
            BundleFormat::Yaml => serde_yaml::from_str(text)?,
            BundleFormat::Json => serde_json::from_str(text)?,
        };

        if bundle.version > BUNDLE_VERSION {
            return Err(BreathError::Parse(format!(
                "bundle version {} is newer than supported version {BUNDLE_VERSION}",
                bundle.version
            )));
        }

        Ok(bundle)
    }

    /// Read a bundle from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn read(path: &Path) -> Result<Self, BreathError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text, BundleFormat::from_path(path))
    }
}

/// Outcome of an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Names newly added.
    pub added: Vec<String>,
    /// Names that overwrote an existing pattern.
    pub replaced: Vec<String>,
    /// Names left alone, with the reason.
    pub skipped: Vec<(String, String)>,
}

/// Add the bundle's patterns to `store`.
///
/// Existing names are skipped unless `overwrite` is set. Invalid entries are
/// skipped and reported rather than failing the whole import.
///
/// # Errors
///
/// Returns an error only if the store itself fails.
pub fn import(
    bundle: &PatternBundle,
    store: &dyn PatternStore,
    overwrite: bool,
) -> Result<ImportReport, BreathError> {
    let mut report = ImportReport::default();

    for named in &bundle.patterns {
        let name = named.name.trim().to_string();

        if super::is_preset(&name) {
            report
                .skipped
                .push((name, "name belongs to a built-in preset".to_string()));
            continue;
        }

        let result = if overwrite {
            let existed = store.load_named(&name).is_ok();
            store
                .replace_named(&name, &named.pattern)
                .map(|()| existed)
        } else {
            store.save_named(&name, &named.pattern).map(|()| false)
        };

        match result {
            Ok(true) => report.replaced.push(name),
            Ok(false) => report.added.push(name),
            Err(e) if e.is_recoverable() => report.skipped.push((name, e.to_string())),
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        added = report.added.len(),
        replaced = report.replaced.len(),
        skipped = report.skipped.len(),
        "imported patterns"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Pattern;
    use crate::features::patterns::PatternStorage;
    use crate::storage::Database;
    use tempfile::TempDir;

    fn storage() -> PatternStorage {
        PatternStorage::with_database(Database::open_in_memory().unwrap())
    }

    fn bundle(patterns: Vec<NamedPattern>) -> PatternBundle {
        PatternBundle {
            version: BUNDLE_VERSION,
            exported_at: Utc::now(),
            patterns,
        }
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(BundleFormat::from_path(Path::new("a.JSON")), BundleFormat::Json);
        assert_eq!(BundleFormat::from_path(Path::new("a.yml")), BundleFormat::Yaml);
        assert_eq!(BundleFormat::from_path(Path::new("patterns")), BundleFormat::Yaml);
    }

    #[test]
    fn test_yaml_layout() {
        let text = bundle(vec![NamedPattern::new("Calm", Pattern::new(4, 0, 6, 0))])
            .render(BundleFormat::Yaml)
            .unwrap();

        assert!(text.contains("version: 1"));
        assert!(text.contains("name: Calm"));
        assert!(text.contains("exhale: 6"));
    }

    #[test]
    fn test_export_then_import_into_empty_store() {
        let source = storage();
        source.save_named("Calm", &Pattern::new(4, 0, 6, 0)).unwrap();
        source.save_named("Walk", &Pattern::new(3, 0, 3, 0)).unwrap();

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("patterns.json");
        let text = PatternBundle::from_store(&source)
            .unwrap()
            .render(BundleFormat::Json)
            .unwrap();
        std::fs::write(&path, text).unwrap();

        let target = storage();
        let report = import(&PatternBundle::read(&path).unwrap(), &target, false).unwrap();

        assert_eq!(report.added, vec!["Calm", "Walk"]);
        assert_eq!(target.list_all().unwrap(), source.list_all().unwrap());
    }

    #[test]
    fn test_import_skips_conflicts_without_overwrite() {
        let store = storage();
        store.save_named("calm", &Pattern::new(4, 4, 4, 4)).unwrap();

        let incoming = bundle(vec![
            NamedPattern::new("Calm", Pattern::new(6, 0, 6, 0)),
            NamedPattern::new("Empty", Pattern::new(0, 0, 0, 0)),
            NamedPattern::new("Box", Pattern::new(1, 1, 1, 1)),
        ]);
        let report = import(&incoming, &store, false).unwrap();

        assert!(report.added.is_empty());
        assert_eq!(report.skipped.len(), 3);
        assert_eq!(store.load_named("calm").unwrap(), Pattern::new(4, 4, 4, 4));
    }

    #[test]
    fn test_import_overwrite() {
        let store = storage();
        store.save_named("calm", &Pattern::new(4, 4, 4, 4)).unwrap();

        let incoming = bundle(vec![
            NamedPattern::new("Calm", Pattern::new(6, 0, 6, 0)),
            NamedPattern::new("New", Pattern::new(2, 0, 2, 0)),
        ]);
        let report = import(&incoming, &store, true).unwrap();

        assert_eq!(report.replaced, vec!["Calm"]);
        assert_eq!(report.added, vec!["New"]);
        assert_eq!(store.load_named("calm").unwrap(), Pattern::new(6, 0, 6, 0));
    }

    #[test]
    fn test_newer_version_rejected() {
        let text = r#"{"version": 9, "exported_at": "2024-01-01T00:00:00Z", "patterns": []}"#;
        assert!(matches!(
            PatternBundle::parse(text, BundleFormat::Json),
            Err(BreathError::Parse(_))
        ));
    }
}
