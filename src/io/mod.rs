//! Terminal output and process exit codes.
//!
//! This module provides:
//! - The in-place countdown line ([`StatusLine`]) and its formatting options
//! - Exit codes reported by the binary

pub mod exit_code;
pub mod status_line;

pub use exit_code::ExitCode;
pub use status_line::{
    CountdownBar, ProgressBarOptions, ProgressBarStyle, StatusLine, TimeFormat, format_frame,
};
