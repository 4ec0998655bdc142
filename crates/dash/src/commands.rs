//! Subcommand handlers.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};

use stockroom_core::{Config, NewItem, Page};
use stockroom_probe::{wait_for, HttpHealthProbe, Prober};

use crate::api_client::ApiClient;
use crate::cli::{Command, ItemsCommand};
use crate::csv_report::{CsvReport, Histogram};
use crate::stats_store::{self, ColumnStatistics};
use crate::terminal::Terminal;

pub async fn run(
    command: Command,
    api_url: &str,
    config: &Config,
    terminal: &Terminal,
) -> Result<ExitCode> {
    match command {
        Command::WaitForApi { probe } => {
            let probe_config = probe.resolve(&config.probe)?;
            let probe = HttpHealthProbe::new(api_url)?;
            let outcome = wait_for(&Prober::new(), &probe, &probe_config).await;
            Ok(ExitCode::from(outcome.exit_status()))
        }
        Command::Health => {
            let client = ApiClient::new(api_url)?;
            let health = client.health().await?;
            terminal.print_info(&format!("API: {}", client.base_url()))?;
            terminal.print_health(&health)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Items { action } => {
            let client = ApiClient::new(api_url)?;
            items(&client, action, terminal).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Csv {
            file,
            column,
            head,
            bins,
            save,
        } => {
            let options = CsvOptions {
                column: column.as_deref(),
                head,
                bins: bins as usize,
                save,
            };
            csv(&file, &options, config, terminal).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn items(client: &ApiClient, action: ItemsCommand, terminal: &Terminal) -> Result<()> {
    match action {
        ItemsCommand::List { skip, limit } => {
            let items = client.list_items(Page { skip, limit }).await?;
            terminal.print_items(&items)?;
        }
        ItemsCommand::Add { name, description } => {
            if name.trim().is_empty() {
                bail!("item name must not be empty");
            }
            let new_item = NewItem::new(name, description);
            new_item.validate()?;
            let item = client.create_item(&new_item).await?;
            terminal.print_info(&format!("Created item #{}", item.id))?;
            terminal.print_item(&item)?;
        }
        ItemsCommand::Get { id } => match client.get_item(id).await? {
            Some(item) => terminal.print_item(&item)?,
            None => bail!("item {} not found", id),
        },
        ItemsCommand::Delete { id } => {
            let message = client.delete_item(id).await?;
            terminal.print_info(&message)?;
        }
    }
    Ok(())
}

struct CsvOptions<'a> {
    column: Option<&'a str>,
    head: usize,
    bins: usize,
    save: bool,
}

async fn csv(
    file: &Path,
    options: &CsvOptions<'_>,
    config: &Config,
    terminal: &Terminal,
) -> Result<()> {
    let report = CsvReport::load(file)?;
    terminal.print_csv_report(&report, options.head)?;

    let columns: Vec<&str> = match options.column {
        Some(name) => vec![name],
        None => report.float_columns(),
    };

    for name in columns {
        let summary = report.summary(name)?;
        terminal.print_summary(name, &summary)?;
        let values = report.numeric_values(name)?;
        terminal.print_histogram(&Histogram::new(&values, options.bins))?;

        if options.save {
            let stats = ColumnStatistics::from_summary(name, &summary);
            let id = stats_store::save(&config.database, &stats)
                .await
                .with_context(|| format!("failed to save statistics for '{}'", name))?;
            terminal.print_info(&format!("Saved statistics for {} (row {})", name, id))?;
        }
    }
    Ok(())
}
