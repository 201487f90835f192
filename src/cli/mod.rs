//! Command-line interface: argument definitions, shared context and commands.

pub mod args;
pub mod commands;
mod context;
mod plan;

pub use context::Context;
pub use plan::{plan_session, SessionPlan};
