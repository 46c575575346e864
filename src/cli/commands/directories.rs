//! `--show-dirs`: print where frutta looks for its files.

use console::style;

use crate::app_dirs::AppDirs;
use crate::config::APP_NAME;
use crate::io::ExitCode;

pub fn run_show_dirs() -> ExitCode {
    let Some(dirs) = AppDirs::for_app(APP_NAME) else {
        eprintln!("Error: could not determine the home directory");
        return ExitCode::GeneralError;
    };

    println!("{}", style(format!("Directories ({})", dirs.convention)).bold());
    println!("  config:   {}", dirs.config.display());
    println!("  data:     {}", dirs.data.display());
    println!("  cache:    {}", dirs.cache.display());
    println!("  settings: {}", dirs.settings_file().display());
    ExitCode::Success
}
