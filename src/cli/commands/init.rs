//! Settings file commands: `--init-config` and `--show-config`.

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::io::ExitCode;

/// Write a default settings file to `path`, or to the user config directory.
pub fn run_init_config(path: Option<&Path>, force: bool) -> ExitCode {
    let Some(config_path) = path
        .map(Path::to_path_buf)
        .or_else(Settings::default_config_path)
    else {
        eprintln!("Error: could not determine the home directory, pass --config <PATH>");
        return ExitCode::GeneralError;
    };

    match Settings::init_config_file(&config_path, force) {
        Ok(()) => {
            println!("Created configuration file at: {}", config_path.display());
            println!("Edit this file to customize your settings.");
            ExitCode::Success
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::GeneralError
        }
    }
}

/// Print the merged configuration as TOML.
pub fn run_show_config(settings: &Settings, source: Option<PathBuf>) -> ExitCode {
    if let Some(path) = source {
        println!("# Settings file: {}", path.display());
    }
    match toml::to_string_pretty(settings) {
        Ok(toml_str) => {
            println!("{toml_str}");
            ExitCode::Success
        }
        Err(e) => {
            eprintln!("Error displaying config: {e}");
            ExitCode::GeneralError
        }
    }
}
