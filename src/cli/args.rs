//! CLI argument parsing using clap.

use clap::{
    ArgAction, Parser,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

use crate::config::Settings;
use crate::io::ProgressBarStyle;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

const DURATION_HELP: &str = "\
<DURATION> - duration of the timer with optional units:
  h: hours
  m: minutes (default)
  s: seconds

Examples:
  frutta 60    # 60 minute timer
  frutta 10m   # 10 minute timer
  frutta 90s   # 90 second timer
  frutta 1h --style classic --width 30";

/// Pomodoro style timer for the command line with a progress bar
#[derive(Parser, Debug)]
#[command(
    name = "frutta",
    version = concat!("version ", env!("CARGO_PKG_VERSION")),
    about = "Pomodoro style timer for the command line with a progress bar",
    disable_version_flag = true,
    styles = clap_cargo_style(),
    after_help = DURATION_HELP
)]
pub struct Cli {
    /// Timer length, e.g. 25, 10m, 90s, 1h
    #[arg(value_name = "DURATION")]
    pub duration: Option<String>,

    /// Display version information and exit
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,

    /// Path to custom settings.toml file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Bar glyph style (overrides settings)
    #[arg(long, value_enum)]
    pub style: Option<ProgressBarStyle>,

    /// Bar width in cells (overrides settings)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub width: Option<u16>,

    /// Print the configuration, data and cache directories and exit
    #[arg(long, conflicts_with_all = ["duration", "init_config", "show_config"])]
    pub show_dirs: bool,

    /// Print the active configuration and exit
    #[arg(long, conflicts_with_all = ["duration", "init_config"])]
    pub show_config: bool,

    /// Write a default settings file and exit
    #[arg(long, conflicts_with = "duration")]
    pub init_config: bool,

    /// Overwrite an existing settings file with --init-config
    #[arg(short, long, requires = "init_config")]
    pub force: bool,
}

/// What the process should do once arguments are parsed.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    ShowHelp,
    ShowDirs,
    ShowConfig,
    InitConfig { force: bool },
    StartTimer { duration: String },
}

impl Cli {
    pub fn action(&self) -> Action {
        if self.show_dirs {
            Action::ShowDirs
        } else if self.init_config {
            Action::InitConfig { force: self.force }
        } else if self.show_config {
            Action::ShowConfig
        } else if let Some(duration) = &self.duration {
            Action::StartTimer {
                duration: duration.clone(),
            }
        } else {
            Action::ShowHelp
        }
    }

    /// Apply display flags on top of file and environment settings.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(style) = self.style {
            settings.display.style = style;
        }
        if let Some(width) = self.width {
            settings.display.width = width as usize;
        }
    }
}
