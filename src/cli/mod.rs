//! Command-line interface
//!
//! Argument parsing and command handlers for the `serpent-docs` binary.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands};
