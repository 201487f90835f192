//! Command implementations for breathbox.
//!
//! Every command returns the text to print; an empty string prints nothing.

mod completions;
mod pattern;
mod pick;
mod settings;
mod start;

pub use completions::completions;
pub use pattern::pattern;
pub use pick::pick;
pub use settings::settings;
pub use start::start;

use crate::cli::args::OutputFormat;
use crate::error::BreathError;
use crate::features::patterns::PRESETS;
use crate::output::format_presets;

/// Execute presets command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn presets(format: OutputFormat) -> Result<String, BreathError> {
    format_presets(&PRESETS, format)
}
