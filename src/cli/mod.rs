//! CLI module for the countdown timer.
//!
//! Provides command-line interface parsing and command dispatch.

pub mod args;
pub mod commands;

pub use args::{Action, Cli};
