//! Countdown timer core.
//!
//! [`Scheduler`] owns the sleep/measure loop and hands [`RenderFrame`]s to a
//! [`Renderer`]. Everything runs on the caller's task; the only suspend points
//! are the scheduler's sleeps, which is also where cancellation is observed.

mod clock;
mod renderer;
mod scheduler;
mod session;

pub use clock::{Clock, TokioClock};
pub use renderer::{RenderFrame, Renderer};
pub use scheduler::{CancelHandle, DEFAULT_PROBE_INTERVAL, MAX_PROBE_INTERVAL, Scheduler, TerminationStatus};
pub use session::TimerSession;
