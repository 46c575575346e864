//! Run a countdown with the progress line on stderr.

use console::style;

use crate::config::Settings;
use crate::duration::{TimerDuration, parse_duration};
use crate::error::Result;
use crate::io::{ExitCode, StatusLine};
use crate::log_event;
use crate::timer::{Clock, Renderer, Scheduler, TerminationStatus};

/// Parse `input`, count down and report how the session ended.
///
/// Ctrl-C cancels the session; the line is left as drawn and the cursor
/// restored.
pub async fn run_timer(input: &str, settings: &Settings) -> Result<ExitCode> {
    let duration = parse_duration(input)?;
    log_event!("cli", "timer", "{duration}");

    let status_line = StatusLine::stderr(
        settings.progress_bar_options(),
        settings.status_line_options(),
    );
    let mut scheduler =
        Scheduler::new(status_line).with_probe_interval(settings.probe_interval());

    let cancel = scheduler.cancel_handle();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let code = countdown(&mut scheduler, duration).await;
    interrupt.abort();
    code
}

/// Run `scheduler` for `duration` and map how it ended to an exit code.
pub async fn countdown<R: Renderer, C: Clock>(
    scheduler: &mut Scheduler<R, C>,
    duration: TimerDuration,
) -> Result<ExitCode> {
    match scheduler.run(duration.as_millis()).await? {
        TerminationStatus::Completed => {
            let message = format!("Timer finished ({duration})");
            eprintln!("{}", style(message).for_stderr().green());
            Ok(ExitCode::Success)
        }
        TerminationStatus::Cancelled => {
            eprintln!("{}", style("Timer interrupted").for_stderr().dim());
            Ok(ExitCode::Interrupted)
        }
    }
}
