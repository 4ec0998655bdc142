mod api_client;
mod cli;
mod commands;
mod csv_report;
mod stats_store;
mod terminal;

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use crate::cli::{CliArgs, Command};
use crate::terminal::Terminal;

#[tokio::main]
async fn main() -> ExitCode {
    stockroom_core::config::load_dotenv();
    let args = CliArgs::parse();

    // wait-for-api reports its progress through tracing.
    let default_filter = match args.command {
        Command::WaitForApi { .. } => "info",
        _ => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = stockroom_core::Config::from_env();
    let api_url = args
        .api_url
        .clone()
        .unwrap_or_else(|| config.dashboard.api_url.clone());
    let terminal = Terminal::new();

    match commands::run(args.command, &api_url, &config, &terminal).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "command failed");
            if let Err(print_err) = terminal.print_error(&format!("{:#}", e)) {
                eprintln!("Error: {:#} ({})", e, print_err);
            }
            ExitCode::FAILURE
        }
    }
}
