//! Single-line countdown display with cursor hiding support.
//!
//! The line is redrawn in place on interactive terminals: the cursor is hidden while
//! the timer runs, each frame returns to column 0 and erases the previous contents,
//! and the cursor is shown again once the timer stops or is abandoned.
//!
//! ## Formatting
//! [`format_frame`] is a pure function of a [`RenderFrame`] and [`ProgressBarOptions`]:
//!
//! ```text
//! ████████████░░░░░░░░░░░░ | 00:05:00 passed | 00:05:00 remaining
//! ```
//!
//! ## Non-interactive output
//! When ANSI escapes are disabled (standard error redirected to a file or pipe) frames
//! are written as plain lines, at most one every `plain_interval_secs` seconds, plus the
//! first and the final frame.

use std::fmt::{self, Display};
use std::io::{self, Write};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::timer::{RenderFrame, Renderer};

pub const DEFAULT_PROGRESS_BAR_WIDTH: usize = 40;

const CURSOR_HIDE: &str = "\x1b[?25l";
const CURSOR_SHOW: &str = "\x1b[?25h";
const ERASE_LINE: &str = "\x1b[2K";
const CURSOR_LEFT: &str = "\r";
const BELL: &str = "\x07";

/// Glyph palettes for the countdown bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ProgressBarStyle {
    /// Full block (`█`) cells with light empty fill (`░`).
    #[default]
    FullBlock,
    /// Dark shade (`▓`) cells with light empty fill (`░`).
    Shade,
    /// Dense braille wall, good for compact displays.
    Braille,
    /// Plain ASCII `#` and `-` for terminals without box drawing glyphs.
    Classic,
    /// Black parallelogram (`▰`) on white parallelogram (`▱`).
    Parallelogram,
}

impl ProgressBarStyle {
    /// Glyph used for filled segments of the bar.
    pub fn filled_cell(self) -> &'static str {
        match self {
            ProgressBarStyle::FullBlock => "█",
            ProgressBarStyle::Shade => "▓",
            ProgressBarStyle::Braille => "⣿",
            ProgressBarStyle::Classic => "#",
            ProgressBarStyle::Parallelogram => "▰",
        }
    }

    /// Glyph used for empty segments of the bar.
    pub fn empty_cell(self) -> &'static str {
        match self {
            ProgressBarStyle::FullBlock | ProgressBarStyle::Shade => "░",
            ProgressBarStyle::Braille => " ",
            ProgressBarStyle::Classic => "-",
            ProgressBarStyle::Parallelogram => "▱",
        }
    }
}

/// How the passed/remaining labels are written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeFormat {
    /// `HH:MM:SS`
    #[default]
    Clock,
    /// `1h2m`, `5m3s`, `45s`
    Compact,
}

impl TimeFormat {
    pub fn format(self, seconds: u64) -> String {
        let (h, m, s) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);
        match self {
            TimeFormat::Clock => format!("{h:02}:{m:02}:{s:02}"),
            TimeFormat::Compact if h > 0 => format!("{h}h{m}m"),
            TimeFormat::Compact if m > 0 => format!("{m}m{s}s"),
            TimeFormat::Compact => format!("{s}s"),
        }
    }
}

/// Configuration options for the countdown bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressBarOptions {
    pub style: ProgressBarStyle,
    pub width: usize,
    pub time_format: TimeFormat,
}

impl ProgressBarOptions {
    pub fn new(style: ProgressBarStyle, width: usize) -> Self {
        Self {
            style,
            width: width.max(1),
            time_format: TimeFormat::default(),
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn with_time_format(mut self, time_format: TimeFormat) -> Self {
        self.time_format = time_format;
        self
    }
}

impl Default for ProgressBarOptions {
    fn default() -> Self {
        Self::new(ProgressBarStyle::default(), DEFAULT_PROGRESS_BAR_WIDTH)
    }
}

/// Display adapter pairing a frame with its formatting options.
pub struct CountdownBar<'a> {
    frame: RenderFrame,
    options: &'a ProgressBarOptions,
}

impl<'a> CountdownBar<'a> {
    pub fn new(frame: RenderFrame, options: &'a ProgressBarOptions) -> Self {
        Self { frame, options }
    }
}

impl Display for CountdownBar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.options.width.max(1);
        let filled = (self.frame.progress() * width as f64).round() as usize;
        let filled = filled.min(width);
        let empty = width - filled;

        let passed = self.options.time_format.format(self.frame.elapsed_seconds());
        let remaining = self
            .options
            .time_format
            .format(self.frame.remaining_seconds());

        write!(
            f,
            "{}{} | {passed} passed | {remaining} remaining",
            self.options.style.filled_cell().repeat(filled),
            self.options.style.empty_cell().repeat(empty),
        )
    }
}

/// Format a frame into the line that would be drawn for it.
pub fn format_frame(frame: RenderFrame, options: &ProgressBarOptions) -> String {
    CountdownBar::new(frame, options).to_string()
}

/// Options controlling how the status line is written.
#[derive(Clone, Copy, Debug)]
pub struct Options {
    /// Set to true to redraw the line in place using ANSI escape codes.
    /// By default set to true if the standard error is a TTY.
    pub enable_ansi_escapes: bool,

    /// Minimum spacing, in timer seconds, between plain lines when ANSI escapes
    /// are disabled.
    pub plain_interval_secs: u64,

    /// Ring the terminal bell when the timer completes.
    pub bell: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            enable_ansi_escapes: is_terminal::is_terminal(std::io::stderr()),
            plain_interval_secs: 60,
            bell: false,
        }
    }
}

/// Terminal sink that keeps the countdown on a single line.
pub struct StatusLine<W: Write> {
    out: W,
    bar: ProgressBarOptions,
    options: Options,
    last_line: Option<String>,
    last_plain_second: Option<u64>,
    cursor_hidden: bool,
    finished: bool,
}

impl StatusLine<io::Stderr> {
    /// Status line on standard error with TTY-detected options.
    pub fn stderr(bar: ProgressBarOptions, options: Options) -> Self {
        Self::with_writer(io::stderr(), bar, options)
    }
}

impl<W: Write> StatusLine<W> {
    pub fn with_writer(out: W, bar: ProgressBarOptions, options: Options) -> Self {
        Self {
            out,
            bar,
            options,
            last_line: None,
            last_plain_second: None,
            cursor_hidden: false,
            finished: false,
        }
    }

    /// The most recently formatted line, if any frame was rendered.
    pub fn last_line(&self) -> Option<&str> {
        self.last_line.as_deref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn redraw(&mut self, line: &str) -> io::Result<()> {
        write!(self.out, "{CURSOR_HIDE}{CURSOR_LEFT}{ERASE_LINE}{line}")?;
        self.cursor_hidden = true;
        self.out.flush()
    }

    fn plain_due(&self, frame: &RenderFrame) -> bool {
        match self.last_plain_second {
            None => true,
            Some(_) if frame.is_complete() => true,
            Some(last) => {
                frame.elapsed_seconds() >= last + self.options.plain_interval_secs.max(1)
            }
        }
    }

    fn release(&mut self) -> io::Result<()> {
        self.finished = true;
        if self.options.enable_ansi_escapes && self.last_line.is_some() {
            writeln!(self.out)?;
        }
        if self.cursor_hidden {
            write!(self.out, "{CURSOR_SHOW}")?;
            self.cursor_hidden = false;
        }
        self.out.flush()
    }
}

impl<W: Write> Renderer for StatusLine<W> {
    fn render(&mut self, frame: RenderFrame) -> io::Result<()> {
        if self.finished {
            return Ok(());
        }
        let line = format_frame(frame, &self.bar);
        if self.options.enable_ansi_escapes {
            self.redraw(&line)?;
        } else if self.plain_due(&frame) {
            writeln!(self.out, "{line}")?;
            self.out.flush()?;
            self.last_plain_second = Some(frame.elapsed_seconds());
        }
        self.last_line = Some(line);
        Ok(())
    }

    fn stop(&mut self) -> io::Result<()> {
        if self.finished {
            return Ok(());
        }
        self.release()?;
        if self.options.bell {
            write!(self.out, "{BELL}")?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn abandon(&mut self) -> io::Result<()> {
        if self.finished {
            return Ok(());
        }
        self.release()
    }
}

impl<W: Write> Drop for StatusLine<W> {
    fn drop(&mut self) {
        if self.cursor_hidden {
            let _ = write!(self.out, "{CURSOR_SHOW}");
            let _ = self.out.flush();
        }
    }
}
