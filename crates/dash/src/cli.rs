use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use stockroom_core::config::ProbeSettings;
use stockroom_core::{ItemId, DEFAULT_PAGE_LIMIT};
use stockroom_probe::{ProbeConfig, ProbeError};

/// Terminal dashboard for the items API.
///
/// Shows API and database health, manages items, and summarizes CSV files.
#[derive(Parser, Debug)]
#[command(name = "stockroom-dash", version, about)]
pub struct CliArgs {
    /// API base URL
    #[arg(long, global = true, env = "FASTAPI_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Wait until the API answers /health with 200. Exits 0 when up, 1 otherwise.
    WaitForApi {
        #[command(flatten)]
        probe: ProbeArgs,
    },
    /// Show API and database status.
    Health,
    /// Manage items.
    Items {
        #[command(subcommand)]
        action: ItemsCommand,
    },
    /// Summarize the numeric columns of a CSV file.
    Csv {
        file: PathBuf,

        /// Only summarize this column (default: every float column)
        #[arg(long)]
        column: Option<String>,

        /// Number of data rows to preview
        #[arg(long, default_value_t = 5)]
        head: usize,

        /// Number of histogram buckets
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..=200))]
        bins: u16,

        /// Store mean, std, min and max of each summarized column in MySQL
        #[arg(long)]
        save: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ItemsCommand {
    /// List items.
    List {
        #[arg(long, default_value_t = 0)]
        skip: u32,

        #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
        limit: u32,
    },
    /// Create an item.
    Add { name: String, description: String },
    /// Show one item.
    Get { id: ItemId },
    /// Delete one item.
    Delete { id: ItemId },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProbeArgs {
    /// Maximum attempts (default: PROBE_MAX_RETRIES or 30)
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
