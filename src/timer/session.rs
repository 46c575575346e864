//! State of one countdown run.

use std::time::Duration;

use tokio::time::Instant;

use crate::duration::TimerDuration;
use crate::error::Result;
use crate::timer::RenderFrame;

const SECOND_MS: u64 = 1000;

/// A countdown from a fixed start instant to its total duration.
///
/// `last_signaled_second` only moves forward and always equals the whole
/// seconds of the last frame handed out by [`TimerSession::signal`].
#[derive(Debug, Clone)]
pub struct TimerSession {
    start: Instant,
    total: TimerDuration,
    last_signaled_second: u64,
}

impl TimerSession {
    /// Begin a session at `start`. Fails if `total_ms` is zero.
    pub fn begin(start: Instant, total_ms: u64) -> Result<Self> {
        let total = TimerDuration::from_millis(total_ms)?;
        Ok(Self {
            start,
            total,
            last_signaled_second: 0,
        })
    }

    pub fn total(&self) -> TimerDuration {
        self.total
    }

    pub fn last_signaled_second(&self) -> u64 {
        self.last_signaled_second
    }

    /// Frame drawn before the first wait.
    pub fn initial_frame(&self) -> RenderFrame {
        RenderFrame::new(0, self.total.as_millis())
    }

    /// Milliseconds of real time since the session began.
    pub fn elapsed_ms(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.start).as_millis() as u64
    }

    pub fn is_new_second(&self, elapsed_ms: u64) -> bool {
        elapsed_ms / SECOND_MS > self.last_signaled_second
    }

    pub fn is_finished(&self, elapsed_ms: u64) -> bool {
        elapsed_ms >= self.total.as_millis()
    }

    /// Record that a frame is being drawn at `elapsed_ms` and return it.
    pub fn signal(&mut self, elapsed_ms: u64) -> RenderFrame {
        self.last_signaled_second = self.last_signaled_second.max(elapsed_ms / SECOND_MS);
        RenderFrame::new(elapsed_ms, self.total.as_millis())
    }

    /// Time left until the second after the last signaled one begins.
    ///
    /// Derived from the true elapsed time on every call, so oversleeping or
    /// waking early never accumulates into the displayed seconds.
    pub fn delay_until_next_second(&self, elapsed_ms: u64) -> Duration {
        let into_second = elapsed_ms.saturating_sub(self.last_signaled_second * SECOND_MS);
        Duration::from_millis(SECOND_MS.saturating_sub(into_second))
    }
}
