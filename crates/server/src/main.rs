mod api;
mod cli;
mod db;
mod router;
mod startup;
mod state;
mod store;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::{Cli, Command, ProbeArgs};

fn load_config() -> stockroom_core::Config {
    stockroom_core::config::load_dotenv();
    stockroom_core::Config::from_env()
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = load_config();
    config.log_summary();

    match cli.command.unwrap_or(Command::Serve {
        skip_wait: false,
        probe: ProbeArgs::default(),
    }) {
        Command::Serve { skip_wait, probe } => {
            let probe_config = probe.resolve(&config.probe)?;
            startup::serve(&config, skip_wait, &probe_config).await
        }
        Command::WaitForDb { probe } => {
            let probe_config = probe.resolve(&config.probe)?;
            let outcome = startup::wait_for_db(&config, &probe_config).await;
            Ok(ExitCode::from(outcome.exit_status()))
        }
    }
}
