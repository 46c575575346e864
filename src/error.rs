//! Error types for duration validation and timer sessions.

use thiserror::Error;

/// Errors surfaced by the timer and its collaborators.
#[derive(Error, Debug)]
pub enum FruttaError {
    #[error("Invalid duration: {input} ({reason})")]
    InvalidDuration { input: String, reason: String },

    #[error("Terminal output failed: {0}")]
    UnexpectedInternal(#[from] std::io::Error),

    #[error("Failed to load configuration: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl FruttaError {
    pub fn invalid_duration(input: impl Into<String>, reason: impl Into<String>) -> Self {
        FruttaError::InvalidDuration {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// True when the error was caused by user input rather than the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(self, FruttaError::InvalidDuration { .. })
    }
}

pub type Result<T> = std::result::Result<T, FruttaError>;
