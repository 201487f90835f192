use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::core::ToneStyle;
use crate::features::patterns::BundleFormat;

#[derive(Parser)]
#[command(name = "breathbox")]
#[command(about = "A guided breathing timer for the terminal")]
#[command(long_about = "breathbox - A guided breathing timer for the terminal

Paces your breathing through timed phases (breathe in, hold, breathe out,
hold) with a visual countdown and a bell at the start of each phase.
Phases set to zero are skipped.

QUICK START:
  breathbox start                 Box breathing until you press q
  breathbox start relaxing -s 5m  4-7-8 breathing for five minutes
  breathbox start 5-0-5           Custom pattern: in 5, out 5
  breathbox pattern save calm 4-2-6-0
  breathbox presets               List built-in patterns

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  breathbox <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output,
    /// or 'json' for machine-readable output suitable for scripting.
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    ///
    /// BREATHBOX_LOG overrides this with a filter directive.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start a breathing session
    ///
    /// Runs the full-screen timer unless --plain is given. PATTERN is a
    /// preset name, a saved pattern, or notation such as 4-7-8-0
    /// (inhale-hold-exhale-hold, missing trailing phases are zero).
    /// The per-phase flags override individual phases of PATTERN.
    ///
    /// # Examples
    ///
    ///   breathbox start                     Default pattern (box)
    ///   breathbox start relaxing -s 10m     Stop after ten minutes
    ///   breathbox start --inhale 6 --exhale 6 --hold-in 0 --hold-out 0
    ///   breathbox start box --plain -s 90s  Line output, no full screen
    ///   breathbox run 4-4-6 --mute          No bell
    ///
    /// # Keys (full screen)
    ///
    ///   space   start / stop
    ///   1 2 3   box, relaxing, energizing
    ///   m       toggle cues
    ///   s       cycle tone style
    ///   t       toggle theme
    ///   q, Esc  quit
    #[command(alias = "run")]
    Start(StartArgs),

    /// List built-in patterns
    Presets,

    /// Manage saved patterns
    ///
    /// Names are unique ignoring case. Built-in preset names are reserved.
    ///
    /// # Examples
    ///
    ///   breathbox pattern list
    ///   breathbox pattern save evening 4-7-8-0
    ///   breathbox pattern export --file patterns.yaml
    ///   breathbox pattern import patterns.json --overwrite
    #[command(alias = "p")]
    Pattern(PatternArgs),

    /// View and change preferences
    ///
    /// Stored preferences override the config file.
    ///
    /// # Keys
    ///
    ///   cue.enabled     play a tone when each phase begins (true/false)
    ///   cue.style       tone style (low/medium/high)
    ///   music.enabled   play background music (true/false)
    ///   music.track     path of the background music file
    ///   music.volume    background music volume (0.0-1.0)
    ///   theme           color theme (dark/light)
    Settings(SettingsArgs),

    /// Fuzzy-pick a pattern and start it
    Pick(PickArgs),

    /// Generate shell completion scripts
    ///
    /// # Examples
    ///
    ///   breathbox completions bash > ~/.local/share/bash-completion/completions/breathbox
    ///   breathbox completions zsh --install
    Completions(CompletionsArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct StartArgs {
    /// Preset, saved pattern name, or notation like 4-7-8-0
    pub pattern: Option<String>,

    /// Inhale seconds
    #[arg(long, value_name = "SECS")]
    pub inhale: Option<u32>,

    /// Hold-after-inhale seconds
    #[arg(long, value_name = "SECS")]
    pub hold_in: Option<u32>,

    /// Exhale seconds
    #[arg(long, value_name = "SECS")]
    pub exhale: Option<u32>,

    /// Hold-after-exhale seconds
    #[arg(long, value_name = "SECS")]
    pub hold_out: Option<u32>,

    /// Stop after this long (e.g. 90s, 5m, 1h30m; bare numbers are minutes)
    #[arg(short, long, value_name = "DURATION")]
    pub session: Option<String>,

    /// Tone style for cues
    #[arg(long, value_enum)]
    pub style: Option<StyleArg>,

    /// Do not play cues
    #[arg(short, long)]
    pub mute: bool,

    /// Print lines instead of the full-screen timer
    #[arg(long)]
    pub plain: bool,
}

impl StartArgs {
    /// Whether any per-phase flag was given.
    #[must_use]
    pub const fn has_phase_overrides(&self) -> bool {
        self.inhale.is_some()
            || self.hold_in.is_some()
            || self.exhale.is_some()
            || self.hold_out.is_some()
    }
}

/// Tone style argument.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleArg {
    /// 110 Hz, longest ring
    Low,
    /// 220 Hz
    Medium,
    /// 440 Hz, shortest ring
    High,
}

impl From<StyleArg> for ToneStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Low => Self::Low,
            StyleArg::Medium => Self::Medium,
            StyleArg::High => Self::High,
        }
    }
}

#[derive(Args)]
pub struct PatternArgs {
    #[command(subcommand)]
    pub command: PatternCommands,
}

#[derive(Subcommand)]
pub enum PatternCommands {
    /// List saved patterns
    #[command(alias = "ls")]
    List,

    /// Show one pattern (preset, saved, or notation)
    Show {
        /// Pattern name or notation
        name: String,
    },

    /// Save a pattern under a name
    Save {
        /// Pattern name
        name: String,
        /// Notation like 4-7-8-0
        pattern: String,
        /// Overwrite an existing pattern with the same name
        #[arg(short, long)]
        force: bool,
    },

    /// Delete a saved pattern
    #[command(alias = "rm")]
    Delete {
        /// Pattern name
        name: String,
    },

    /// Export saved patterns
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Bundle format (defaults to the file extension, else yaml)
        #[arg(long, value_enum)]
        format: Option<BundleFormat>,
    },

    /// Import patterns from a file
    Import {
        /// Bundle file (.yaml, .yml or .json)
        file: PathBuf,
        /// Replace saved patterns with the same name
        #[arg(long)]
        overwrite: bool,
    },
}

#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommands,
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show every preference and where its value comes from
    #[command(alias = "ls")]
    List,

    /// Print one preference
    Get {
        /// Setting key
        key: String,
    },

    /// Store a preference
    Set {
        /// Setting key
        key: String,
        /// New value
        value: String,
    },

    /// Remove a stored preference, falling back to the config file
    #[command(alias = "reset")]
    Unset {
        /// Setting key
        key: String,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct PickArgs {
    /// Initial search query
    #[arg(short, long)]
    pub query: Option<String>,

    /// Show preview pane
    #[arg(long)]
    pub preview: bool,

    /// Stop after this long
    #[arg(short, long, value_name = "DURATION")]
    pub session: Option<String>,

    /// Print lines instead of the full-screen timer
    #[arg(long)]
    pub plain: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Print installation instructions instead of the script
    #[arg(long)]
    pub install: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_start() {
        let cli = Cli::parse_from([
            "breathbox", "run", "relaxing", "-s", "5m", "--style", "low", "--mute", "--plain",
        ]);

        let Commands::Start(args) = cli.command else {
            panic!("expected start");
        };
        assert_eq!(args.pattern.as_deref(), Some("relaxing"));
        assert_eq!(args.session.as_deref(), Some("5m"));
        assert_eq!(args.style, Some(StyleArg::Low));
        assert!(args.mute && args.plain);
        assert!(!args.has_phase_overrides());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["breathbox", "presets", "-o", "json", "-vv"]);
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_phase_overrides() {
        let cli = Cli::parse_from(["breathbox", "start", "--exhale", "8"]);
        let Commands::Start(args) = cli.command else {
            panic!("expected start");
        };
        assert!(args.has_phase_overrides());
        assert_eq!(args.exhale, Some(8));
    }
}
