use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod banner;
mod commands;
mod output;
mod prompt;
pub mod ux_error;

use commands::{Cli, Commands};
use ux_error::UxError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init(args) => commands::init::run(args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<UxError>() {
                Some(ux) => ux.display(),
                None => output::error(&format!("{err:#}")),
            }
            ExitCode::FAILURE
        }
    }
}
