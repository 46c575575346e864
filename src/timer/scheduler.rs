//! Drift-corrected countdown scheduler.
//!
//! The scheduler captures one start instant and then alternates between sleeping
//! and measuring how much real time has passed. A frame is drawn whenever a new
//! whole second has elapsed, and each wait is recomputed from the measured time
//! so that late or early wake-ups do not add up over a long countdown.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::timer::{Clock, Renderer, TimerSession, TokioClock};
use crate::{debug_event, log_event};

/// Wait before the first check, before second-aligned waits take over.
pub const DEFAULT_PROBE_INTERVAL: Duration = Duration::from_millis(500);

/// Longest allowed first wait. Anything reaching a full second would skip frames.
pub const MAX_PROBE_INTERVAL: Duration = Duration::from_millis(999);

/// How a [`Scheduler::run`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationStatus {
    /// The full duration elapsed and the final frame was drawn.
    Completed,
    /// The session was cancelled before completing.
    Cancelled,
}

/// Cloneable hook that stops a running session at its next suspend point.
///
/// A handle cancels the next or current [`Scheduler::run`] only. Once that run
/// returns [`TerminationStatus::Cancelled`] the scheduler is re-armed and a fresh
/// handle is needed to cancel later runs.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(CancellationToken);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.is_cancelled()
    }
}

/// Runs one countdown at a time and feeds frames to a [`Renderer`].
pub struct Scheduler<R, C = TokioClock> {
    renderer: R,
    clock: C,
    probe_interval: Duration,
    cancel: CancellationToken,
}

impl<R: Renderer> Scheduler<R, TokioClock> {
    pub fn new(renderer: R) -> Self {
        Self::with_clock(renderer, TokioClock)
    }
}

impl<R: Renderer, C: Clock> Scheduler<R, C> {
    pub fn with_clock(renderer: R, clock: C) -> Self {
        Self {
            renderer,
            clock,
            probe_interval: DEFAULT_PROBE_INTERVAL,
            cancel: CancellationToken::new(),
        }
    }

    /// Override the first wait, clamped to `1ms..=MAX_PROBE_INTERVAL`.
    pub fn with_probe_interval(mut self, probe_interval: Duration) -> Self {
        self.probe_interval =
            probe_interval.clamp(Duration::from_millis(1), MAX_PROBE_INTERVAL);
        self
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(self.cancel.clone())
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Count down `total_ms` milliseconds, drawing one frame per elapsed second.
    ///
    /// The first frame is always `(0, total_ms)` and the last one is drawn at or
    /// after `total_ms`, followed by exactly one [`Renderer::stop`]. A cancelled
    /// session calls [`Renderer::abandon`] instead and draws nothing further.
    pub async fn run(&mut self, total_ms: u64) -> Result<TerminationStatus> {
        let mut session = TimerSession::begin(self.clock.now(), total_ms)?;

        if self.cancel.is_cancelled() {
            self.rearm();
            self.renderer.abandon()?;
            return Ok(TerminationStatus::Cancelled);
        }

        debug_event!("timer", "started", "{}", session.total());
        self.renderer.render(session.initial_frame())?;

        let mut wait = self.probe_interval;
        loop {
            if !self.suspend(wait).await {
                self.rearm();
                self.renderer.abandon()?;
                log_event!(
                    "timer",
                    "cancelled",
                    "at second {}",
                    session.last_signaled_second()
                );
                return Ok(TerminationStatus::Cancelled);
            }

            let elapsed_ms = session.elapsed_ms(self.clock.now());
            let finished = session.is_finished(elapsed_ms);

            // A duration shorter than the probe still gets its final frame
            if finished || session.is_new_second(elapsed_ms) {
                let frame = session.signal(elapsed_ms);
                self.renderer.render(frame)?;
            }

            if finished {
                self.renderer.stop()?;
                log_event!("timer", "completed", "{} in {elapsed_ms}ms", session.total());
                return Ok(TerminationStatus::Completed);
            }

            wait = session.delay_until_next_second(elapsed_ms);
            tracing::trace!(
                "[timer] woke at {elapsed_ms}ms, next check in {}ms",
                wait.as_millis()
            );
        }
    }

    fn rearm(&mut self) {
        self.cancel = CancellationToken::new();
    }

    /// Sleep for `wait`. Returns false if the session was cancelled meanwhile.
    async fn suspend(&self, wait: Duration) -> bool {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => false,
            _ = self.clock.sleep(wait) => !self.cancel.is_cancelled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FruttaError;
    use crate::timer::RenderFrame;
    use std::cell::{Cell, RefCell};
    use std::future::Future;
    use std::io;
    use tokio::time::Instant;

    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<RenderFrame>,
        stops: usize,
        abandons: usize,
    }

    impl Renderer for RecordingRenderer {
        fn render(&mut self, frame: RenderFrame) -> io::Result<()> {
            self.frames.push(frame);
            Ok(())
        }

        fn stop(&mut self) -> io::Result<()> {
            self.stops += 1;
            Ok(())
        }

        fn abandon(&mut self) -> io::Result<()> {
            self.abandons += 1;
            Ok(())
        }
    }

    /// Tokio clock that wakes early or late by a repeating pattern of offsets.
    struct JitterClock {
        offsets_ms: Vec<i64>,
        next: Cell<usize>,
        requested: RefCell<Vec<Duration>>,
    }

    impl JitterClock {
        fn new(offsets_ms: Vec<i64>) -> Self {
            Self {
                offsets_ms,
                next: Cell::new(0),
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    impl Clock for JitterClock {
        fn now(&self) -> Instant {
            Instant::now()
        }

        fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
            self.requested.borrow_mut().push(duration);
            let i = self.next.get();
            self.next.set(i + 1);
            let offset = self.offsets_ms[i % self.offsets_ms.len()];
            let base = duration.as_millis() as i64;
            let actual = (base + offset).max(0) as u64;
            tokio::time::sleep(Duration::from_millis(actual))
        }
    }

    fn assert_second_per_render(frames: &[RenderFrame]) {
        for (k, frame) in frames.iter().enumerate() {
            assert_eq!(frame.elapsed_seconds(), k as u64, "frame {k}: {frame:?}");
        }
    }

    fn assert_within_drift_bound(frames: &[RenderFrame]) {
        for frame in frames {
            let target = frame.elapsed_seconds() * 1000;
            let drift = frame.elapsed_ms - target;
            assert!(drift < 500, "second {} drawn {drift}ms late", frame.elapsed_seconds());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_second_countdown() {
        let mut scheduler = Scheduler::new(RecordingRenderer::default());
        let status = scheduler.run(3_000).await.unwrap();
        assert_eq!(status, TerminationStatus::Completed);

        let renderer = scheduler.into_renderer();
        assert_eq!(renderer.frames.len(), 4);
        assert_eq!(renderer.frames[0], RenderFrame::new(0, 3_000));
        assert_second_per_render(&renderer.frames);
        let remaining: Vec<u64> = renderer
            .frames
            .iter()
            .map(|f| f.remaining_seconds())
            .collect();
        assert_eq!(remaining, vec![3, 2, 1, 0]);
        assert!(renderer.frames.last().unwrap().is_complete());
        assert_eq!(renderer.stops, 1);
        assert_eq!(renderer.abandons, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_duration_shorter_than_probe_still_renders_final_frame() {
        let mut scheduler = Scheduler::new(RecordingRenderer::default());
        let status = scheduler.run(300).await.unwrap();
        assert_eq!(status, TerminationStatus::Completed);

        let renderer = scheduler.into_renderer();
        assert_eq!(renderer.frames.len(), 2);
        assert_eq!(renderer.frames[0], RenderFrame::new(0, 300));
        assert!(renderer.frames[1].is_complete());
        assert_eq!(renderer.frames[1].progress(), 1.0);
        assert_eq!(renderer.stops, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_jitter_does_not_accumulate() {
        // Early and late wake-ups, including one that lands a third of a second short
        let clock = JitterClock::new(vec![-120, 80, -300, 45, 0, 199, -1, 310]);
        let mut scheduler = Scheduler::with_clock(RecordingRenderer::default(), clock);
        let total_ms = 120_000;
        let status = scheduler.run(total_ms).await.unwrap();
        assert_eq!(status, TerminationStatus::Completed);

        let requested = scheduler.clock.requested.borrow().clone();
        assert!(requested.iter().all(|d| *d <= Duration::from_secs(1)));

        let renderer = scheduler.into_renderer();
        assert_eq!(renderer.frames.len(), 121);
        assert_second_per_render(&renderer.frames);
        assert_within_drift_bound(&renderer.frames);
        assert!(renderer.frames.last().unwrap().elapsed_ms >= total_ms);
        assert_eq!(renderer.stops, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_frames_are_ordered() {
        let clock = JitterClock::new(vec![30, -250, 490, -499]);
        let mut scheduler = Scheduler::with_clock(RecordingRenderer::default(), clock);
        scheduler.run(10_000).await.unwrap();

        let frames = &scheduler.renderer().frames;
        for pair in frames.windows(2) {
            assert!(pair[0].elapsed_ms <= pair[1].elapsed_ms);
            assert!(pair[0].elapsed_seconds() < pair[1].elapsed_seconds());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_probe_interval() {
        let clock = JitterClock::new(vec![0]);
        let mut scheduler = Scheduler::with_clock(RecordingRenderer::default(), clock)
            .with_probe_interval(Duration::from_millis(200));
        scheduler.run(2_000).await.unwrap();

        let requested = scheduler.clock.requested.borrow();
        assert_eq!(requested[0], Duration::from_millis(200));
        // Remainder of the first second, give or take the timer's 1ms resolution
        let second_wait = requested[1].as_millis();
        assert!((799..=800).contains(&second_wait), "{second_wait}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_long_probe_interval_skips_no_second() {
        let mut scheduler = Scheduler::new(RecordingRenderer::default())
            .with_probe_interval(Duration::from_millis(2_500));
        assert_eq!(scheduler.probe_interval, MAX_PROBE_INTERVAL);

        let status = scheduler.run(5_000).await.unwrap();
        assert_eq!(status, TerminationStatus::Completed);

        let seconds: Vec<u64> = scheduler
            .renderer()
            .frames
            .iter()
            .map(|f| f.elapsed_seconds())
            .collect();
        assert_eq!(seconds, vec![0, 1, 2, 3, 4, 5]);
        assert_within_drift_bound(&scheduler.renderer().frames);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_mid_run() {
        let mut scheduler = Scheduler::new(RecordingRenderer::default());
        let handle = scheduler.cancel_handle();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(2_500)).await;
            handle.cancel();
        });

        let status = scheduler.run(10_000).await.unwrap();
        assert_eq!(status, TerminationStatus::Cancelled);

        let renderer = scheduler.into_renderer();
        assert_eq!(renderer.frames.len(), 3);
        assert!(!renderer.frames.iter().any(|f| f.is_complete()));
        assert_eq!(renderer.stops, 0);
        assert_eq!(renderer.abandons, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_run_draws_nothing() {
        let mut scheduler = Scheduler::new(RecordingRenderer::default());
        scheduler.cancel_handle().cancel();

        let status = scheduler.run(5_000).await.unwrap();
        assert_eq!(status, TerminationStatus::Cancelled);
        assert!(scheduler.renderer().frames.is_empty());
        assert_eq!(scheduler.renderer().stops, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduler_is_reusable_after_cancel() {
        let mut scheduler = Scheduler::new(RecordingRenderer::default());
        let spent = scheduler.cancel_handle();
        spent.cancel();
        assert_eq!(scheduler.run(2_000).await.unwrap(), TerminationStatus::Cancelled);

        // The spent handle no longer affects the next run
        assert_eq!(scheduler.run(2_000).await.unwrap(), TerminationStatus::Completed);
        assert_eq!(scheduler.renderer().frames.len(), 3);

        scheduler.cancel_handle().cancel();
        assert_eq!(scheduler.run(2_000).await.unwrap(), TerminationStatus::Cancelled);
        assert_eq!(scheduler.renderer().abandons, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_fails_before_rendering() {
        let mut scheduler = Scheduler::new(RecordingRenderer::default());
        let err = scheduler.run(0).await.unwrap_err();
        assert!(matches!(err, FruttaError::InvalidDuration { .. }));
        assert!(scheduler.renderer().frames.is_empty());
        assert_eq!(scheduler.renderer().abandons, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_output_failure_is_internal_error() {
        struct BrokenPipe;

        impl Renderer for BrokenPipe {
            fn render(&mut self, _frame: RenderFrame) -> io::Result<()> {
                Err(io::Error::from(io::ErrorKind::BrokenPipe))
            }

            fn stop(&mut self) -> io::Result<()> {
                Ok(())
            }

            fn abandon(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut scheduler = Scheduler::new(BrokenPipe);
        let err = scheduler.run(1_000).await.unwrap_err();
        assert!(matches!(err, FruttaError::UnexpectedInternal(_)));
    }
}
