//! Configuration module for the countdown timer.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file (`<config dir>/settings.toml` or `--config <path>`)
//! - Environment variable overrides
//! - CLI argument overrides (applied by the caller)
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `FRUTTA_` and use double underscores
//! to separate nested levels:
//! - `FRUTTA_DISPLAY__WIDTH=30` sets `display.width`
//! - `FRUTTA_DISPLAY__STYLE=classic` sets `display.style`
//! - `FRUTTA_TIMER__PROBE_INTERVAL_MS=250` sets `timer.probe_interval_ms`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_dirs::AppDirs;
use crate::io::status_line::{self, DEFAULT_PROGRESS_BAR_WIDTH, ProgressBarOptions};
use crate::io::{ProgressBarStyle, TimeFormat};
use crate::timer::{DEFAULT_PROBE_INTERVAL, MAX_PROBE_INTERVAL};

pub const APP_NAME: &str = "frutta";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Progress bar appearance
    #[serde(default)]
    pub display: DisplayConfig,

    /// Scheduler tuning
    #[serde(default)]
    pub timer: TimerConfig,

    /// Log levels
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DisplayConfig {
    /// Glyph palette for the bar
    #[serde(default)]
    pub style: ProgressBarStyle,

    /// Bar width in cells
    #[serde(default = "default_width")]
    pub width: usize,

    /// Label format for passed/remaining time
    #[serde(default)]
    pub time_format: TimeFormat,

    /// Seconds between lines when output is not a terminal
    #[serde(default = "default_plain_interval_secs")]
    pub plain_interval_secs: u64,

    /// Ring the terminal bell when the timer completes
    #[serde(default = "default_false")]
    pub bell: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TimerConfig {
    /// First wait before second-aligned checks begin, 1..=999 ms
    #[serde(default = "default_probe_interval_ms")]
    pub probe_interval_ms: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default level for all modules
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-module overrides, e.g. `frutta::timer = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

// Default value functions
fn default_version() -> u32 { 1 }
fn default_width() -> usize { DEFAULT_PROGRESS_BAR_WIDTH }
fn default_plain_interval_secs() -> u64 { 60 }
fn default_false() -> bool { false }
fn default_probe_interval_ms() -> u64 { DEFAULT_PROBE_INTERVAL.as_millis() as u64 }
fn default_log_level() -> String { "warn".to_string() }

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            display: DisplayConfig::default(),
            timer: TimerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            style: ProgressBarStyle::default(),
            width: default_width(),
            time_format: TimeFormat::default(),
            plain_interval_secs: default_plain_interval_secs(),
            bell: false,
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            probe_interval_ms: default_probe_interval_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources, reading the settings file from the
    /// user config directory.
    pub fn load() -> Result<Self, Box<figment::Error>> {
        match Self::default_config_path() {
            Some(path) => Self::load_from(path),
            None => Self::extract(Self::figment(None)),
        }
    }

    /// Load configuration using a specific settings file.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Self::extract(Self::figment(Some(path.as_ref())))
    }

    fn extract(figment: Figment) -> Result<Self, Box<figment::Error>> {
        let settings: Settings = figment.extract().map_err(Box::new)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the timer cannot honour.
    pub fn validate(&self) -> Result<(), Box<figment::Error>> {
        let probe = self.timer.probe_interval_ms;
        let max = MAX_PROBE_INTERVAL.as_millis() as u64;
        if probe == 0 || probe > max {
            return Err(Box::new(figment::Error::from(format!(
                "timer.probe_interval_ms must be between 1 and {max}, got {probe}"
            ))));
        }
        if self.display.width == 0 {
            return Err(Box::new(figment::Error::from(
                "display.width must be at least 1".to_string(),
            )));
        }
        Ok(())
    }

    fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()));

        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }

        // Double underscore (__) separates nested levels, single underscore stays
        figment.merge(Env::prefixed("FRUTTA_").map(|key| {
            key.as_str()
                .to_lowercase()
                .replace("__", ".")
                .into()
        }))
    }

    /// Settings file in the user config directory, if a home directory exists.
    pub fn default_config_path() -> Option<PathBuf> {
        AppDirs::for_app(APP_NAME).map(|dirs| dirs.settings_file())
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Write a default settings file to `path`.
    pub fn init_config_file(path: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
        if !force && path.exists() {
            return Err(format!(
                "Configuration file already exists at {}. Use --force to overwrite",
                path.display()
            )
            .into());
        }

        Settings::default().save(path)
    }

    pub fn progress_bar_options(&self) -> ProgressBarOptions {
        ProgressBarOptions::new(self.display.style, self.display.width)
            .with_time_format(self.display.time_format)
    }

    /// Status line options; ANSI redraw is enabled only when stderr is a terminal.
    pub fn status_line_options(&self) -> status_line::Options {
        status_line::Options {
            plain_interval_secs: self.display.plain_interval_secs,
            bell: self.display.bell,
            ..Default::default()
        }
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_millis(self.timer.probe_interval_ms)
    }
}
