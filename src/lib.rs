//! breathbox - A guided breathing timer for the terminal
//!
//! This crate paces breathing through timed phases (inhale, hold, exhale,
//! hold) with an optional overall session length. The sequencing core in
//! [`core`] is independent of the terminal; the CLI and TUI drive it.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::BreathError;
