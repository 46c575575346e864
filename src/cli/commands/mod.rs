//! Command implementations for the CLI.

pub mod directories;
pub mod init;
pub mod timer;
