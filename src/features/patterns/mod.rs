//! Named breathing patterns: presets, saved patterns, import and export.

mod presets;
mod storage;
mod transfer;

pub use presets::{find as find_preset, is_preset, resolve, Preset, Source, PRESETS};
pub use storage::{validate_name, PatternStorage};
pub use transfer::{import, BundleFormat, ImportReport, PatternBundle, BUNDLE_VERSION};
