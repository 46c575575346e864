//! Process exit codes.

/// Exit status reported by the `frutta` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Timer ran to completion, or help/version was shown.
    Success = 0,
    /// Invalid arguments, invalid duration, or an unexpected internal failure.
    GeneralError = 1,
    /// Timer was interrupted before completing (128 + SIGINT).
    Interrupted = 130,
}

impl ExitCode {
    pub fn description(self) -> &'static str {
        match self {
            ExitCode::Success => "success",
            ExitCode::GeneralError => "error",
            ExitCode::Interrupted => "interrupted",
        }
    }

    pub fn is_success(self) -> bool {
        self == ExitCode::Success
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}
