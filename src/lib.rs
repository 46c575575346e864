//! Countdown timer for the command line.
//!
//! The core is [`timer::Scheduler`], which counts down from a single start
//! instant, draws one frame per elapsed second and corrects each wait against
//! the measured time so the display never drifts from the wall clock.

pub mod app_dirs;
pub mod cli;
pub mod config;
pub mod duration;
pub mod error;
pub mod io;
pub mod logging;
pub mod timer;

pub use config::Settings;
pub use duration::{TimerDuration, parse_duration};
pub use error::{FruttaError, Result};
pub use io::{ExitCode, StatusLine};
pub use timer::{CancelHandle, RenderFrame, Renderer, Scheduler, TerminationStatus};
