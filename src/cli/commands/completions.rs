//! Shell completions command.

use crate::cli::args::CompletionsArgs;
use crate::error::BreathError;
use crate::features::shell::{completion_install_instructions, generate_completions};

/// Print a completion script or its installation instructions.
///
/// # Errors
///
/// Returns an error if the script cannot be generated.
pub fn completions(args: &CompletionsArgs) -> Result<String, BreathError> {
    if args.install {
        Ok(completion_install_instructions(args.shell))
    } else {
        generate_completions(args.shell)
    }
}
