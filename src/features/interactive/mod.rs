//! Interactive fuzzy finder for breathing patterns.
//!
//! This module provides an interactive terminal interface for browsing
//! presets and saved patterns using fuzzy search powered by skim.

mod picker;

pub use picker::{pick_pattern, PickOptions, PickOrigin};
