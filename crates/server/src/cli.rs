//! CLI argument parsing.

use clap::{Args, Parser, Subcommand};

use stockroom_core::config::ProbeSettings;
use stockroom_probe::{ProbeConfig, ProbeError};

/// Items REST API backed by MySQL.
#[derive(Parser, Debug)]
#[command(name = "stockroom-server", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Wait for MySQL, apply migrations, and serve the HTTP API (default).
    Serve {
        /// Start serving without waiting for MySQL to accept connections.
        #[arg(long)]
        skip_wait: bool,

        #[command(flatten)]
        probe: ProbeArgs,
    },
    /// Wait until MySQL accepts connections. Exits 0 when reachable, 1 otherwise.
    WaitForDb {
        #[command(flatten)]
        probe: ProbeArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProbeArgs {
    /// Maximum connection attempts (default: PROBE_MAX_RETRIES or 30)
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Seconds between attempts (default: PROBE_INTERVAL_SECS or 2)
    #[arg(long)]
    pub interval: Option<f64>,
}

impl ProbeArgs {
    pub fn resolve(&self, settings: &ProbeSettings) -> Result<ProbeConfig, ProbeError> {
        let merged = settings.with_overrides(self.max_retries, self.interval);
        ProbeConfig::try_from(&merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["stockroom-server"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_wait_for_db_flags() {
        let cli = Cli::try_parse_from([
            "stockroom-server",
            "wait-for-db",
            "--max-retries",
            "5",
            "--interval",
            "0.25",
        ])
        .unwrap();
        let Some(Command::WaitForDb { probe }) = cli.command else {
            panic!("expected wait-for-db");
        };
        let config = probe.resolve(&ProbeSettings::default()).unwrap();
        assert_eq!(config.max_retries(), 5);
        assert_eq!(config.interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_zero_retries_rejected() {
        let args = ProbeArgs {
            max_retries: Some(0),
            interval: None,
        };
        assert!(args.resolve(&ProbeSettings::default()).is_err());
    }

    #[test]
    fn test_serve_skip_wait() {
        let cli = Cli::try_parse_from(["stockroom-server", "serve", "--skip-wait"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Serve { skip_wait: true, .. })));
    }
}
