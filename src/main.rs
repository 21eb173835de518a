use std::process::ExitCode;

use anyhow::{Error, Result};
use clap::{CommandFactory, Parser};
use sendgrid_export::{
    cli::Cli,
    config::{Config, EnvOverrides},
    error::ExportError,
    utils::{init_tracing, run_export},
};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<ExportError>() {
            Some(ExportError::FlagInvalid(message)) => {
                println!("Error: {}", message);
                let _ = Cli::command().print_help();
                ExitCode::from(2)
            }
            Some(export_error) => {
                error!(error = %e, "Export aborted");
                ExitCode::from(export_error.exit_code())
            }
            None => {
                error!(error = %e, "Export aborted");
                ExitCode::FAILURE
            }
        },
    }
}

async fn run(cli: &Cli) -> Result<(), Error> {
    let env = EnvOverrides::load();
    init_tracing(env.as_ref().map(EnvOverrides::log_format).unwrap_or_default());

    let config = Config::from_cli(cli, env?)?;
    run_export(&config).await?;

    Ok(())
}
