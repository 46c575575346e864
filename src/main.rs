use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use frutta::cli::commands::{directories, init, timer};
use frutta::cli::{Action, Cli};
use frutta::{ExitCode, FruttaError, Settings, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::process::ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::Success,
                _ => ExitCode::GeneralError,
            };
            e.print().ok();
            return code.into();
        }
    };

    match run(cli).await {
        Ok(code) => code.into(),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::GeneralError.into()
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    // Commands that must work even with a broken settings file
    let duration = match cli.action() {
        Action::ShowHelp => {
            Cli::command().print_help()?;
            return Ok(ExitCode::Success);
        }
        Action::ShowDirs => return Ok(directories::run_show_dirs()),
        Action::InitConfig { force } => {
            return Ok(init::run_init_config(cli.config.as_deref(), force));
        }
        Action::ShowConfig => None,
        Action::StartTimer { duration } => Some(duration),
    };

    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .map_err(FruttaError::from)?;
    cli.apply_overrides(&mut settings);

    logging::init_with_config(&settings.logging);

    let Some(duration) = duration else {
        let source = cli.config.clone().or_else(Settings::default_config_path);
        return Ok(init::run_show_config(&settings, source));
    };

    match timer::run_timer(&duration, &settings).await {
        Ok(code) => Ok(code),
        Err(e) if e.is_user_error() => {
            eprintln!("Error: {e}");
            Ok(ExitCode::GeneralError)
        }
        Err(e) => Err(e.into()),
    }
}
