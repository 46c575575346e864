//! Frames handed from the scheduler to a renderer.

use std::io;

/// One `(elapsed, total)` snapshot of a running timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderFrame {
    pub elapsed_ms: u64,
    pub total_ms: u64,
}

impl RenderFrame {
    pub fn new(elapsed_ms: u64, total_ms: u64) -> Self {
        Self {
            elapsed_ms,
            total_ms,
        }
    }

    /// Whole seconds that have passed.
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_ms / 1000
    }

    /// Whole seconds left, never below zero.
    pub fn remaining_seconds(&self) -> u64 {
        (self.total_ms / 1000).saturating_sub(self.elapsed_seconds())
    }

    /// Fraction of the timer that has run, clamped to `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.total_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms as f64 / self.total_ms as f64).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed_ms >= self.total_ms
    }
}

/// Draws frames for a single timer session.
///
/// `stop` is called once after the final frame; `abandon` is called instead
/// when the session is cancelled before completing.
pub trait Renderer {
    fn render(&mut self, frame: RenderFrame) -> io::Result<()>;

    fn stop(&mut self) -> io::Result<()>;

    fn abandon(&mut self) -> io::Result<()>;
}
