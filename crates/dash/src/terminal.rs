use anyhow::Result;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{self, Write};

use stockroom_core::{HealthStatus, Item};

use crate::csv_report::{ColumnKind, CsvReport, Histogram, Summary};

/// Color scheme for terminal output.
struct Colors;

impl Colors {
    const OK: Color = Color::Green;
    const WARN: Color = Color::Yellow;
    const ERROR: Color = Color::Red;
    const DIM: Color = Color::DarkGrey;
    const HEADER: Color = Color::Magenta;
    const BAR: Color = Color::Cyan;
}

/// Width of the longest histogram bar, in characters.
const BAR_WIDTH: usize = 40;

/// Renders dashboard output to stdout.
pub struct Terminal;

impl Terminal {
    pub fn new() -> Self {
        Self
    }

    /// One-line API/database status banner.
    pub fn print_health(&self, health: &HealthStatus) -> Result<()> {
        let mut stdout = io::stdout();
        if health.dependency_connected() {
            execute!(
                stdout,
                SetForegroundColor(Colors::OK),
                Print("API connected, database connected\n"),
                ResetColor,
            )?;
        } else {
            execute!(
                stdout,
                SetForegroundColor(Colors::WARN),
                Print(format!(
                    "API connected, database unavailable: {}\n",
                    health.error.as_deref().unwrap_or("unknown error")
                )),
                ResetColor,
            )?;
        }
        stdout.flush()?;
        Ok(())
    }

    /// Print an item listing.
    pub fn print_items(&self, items: &[Item]) -> Result<()> {
        let mut stdout = io::stdout();
        if items.is_empty() {
            execute!(
                stdout,
                SetForegroundColor(Colors::DIM),
                Print("No items found. Add one with `items add <name> <description>`.\n"),
                ResetColor,
            )?;
            return Ok(());
        }

        execute!(
            stdout,
            SetForegroundColor(Colors::HEADER),
            Print("Items:\n"),
            SetForegroundColor(Colors::DIM),
            Print(format!("{:<8} {:<30} {}\n", "ID", "NAME", "DESCRIPTION")),
            Print(format!("{}\n", "-".repeat(80))),
            ResetColor,
        )?;

        for item in items {
            execute!(
                stdout,
                Print(format!(
                    "{:<8} {:<30} {}\n",
                    item.id,
                    truncate(&item.name, 30),
                    item.description
                )),
            )?;
        }

        stdout.flush()?;
        Ok(())
    }

    pub fn print_item(&self, item: &Item) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(Colors::HEADER),
            Print(format!("#{} {}\n", item.id, item.name)),
            ResetColor,
            Print(format!("{}\n", item.description)),
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Preview of the first rows, dataset overview, and inferred column types.
    pub fn print_csv_report(&self, report: &CsvReport, head: usize) -> Result<()> {
        let mut stdout = io::stdout();
        let preview = report.head(head);
        if !preview.is_empty() {
            let header: Vec<String> = report
                .columns()
                .iter()
                .map(|c| format!("{:<16}", truncate(&c.name, 16)))
                .collect();
            execute!(
                stdout,
                SetForegroundColor(Colors::HEADER),
                Print(format!("First {} row(s)\n", preview.len())),
                SetForegroundColor(Colors::DIM),
                Print(format!("  {}\n", header.join(" "))),
                ResetColor,
            )?;
            for row in preview {
                let cells: Vec<String> = row
                    .iter()
                    .map(|cell| format!("{:<16}", truncate(cell, 16)))
                    .collect();
                execute!(stdout, Print(format!("  {}\n", cells.join(" "))))?;
            }
        }
        execute!(
            stdout,
            SetForegroundColor(Colors::HEADER),
            Print("Dataset\n"),
            ResetColor,
            Print(format!("  rows:    {}\n", report.row_count())),
            Print(format!("  columns: {}\n", report.columns().len())),
            SetForegroundColor(Colors::HEADER),
            Print("Column types\n"),
            ResetColor,
        )?;
        for column in report.columns() {
            execute!(
                stdout,
                Print(format!("  {:<30} {}\n", truncate(&column.name, 30), column.kind)),
            )?;
        }

        if !report.columns().iter().any(|c| c.kind == ColumnKind::Float) {
            execute!(
                stdout,
                SetForegroundColor(Colors::WARN),
                Print("No float column found in the file.\n"),
                ResetColor,
            )?;
        }
        stdout.flush()?;
        Ok(())
    }

    pub fn print_summary(&self, column: &str, summary: &Summary) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(Colors::HEADER),
            Print(format!("Statistics for {}\n", column)),
            ResetColor,
        )?;
        let rows = [
            ("count", summary.count as f64),
            ("mean", summary.mean),
            ("std", summary.std),
            ("min", summary.min),
            ("25%", summary.q1),
            ("50%", summary.median),
            ("75%", summary.q3),
            ("max", summary.max),
        ];
        for (label, value) in rows {
            execute!(stdout, Print(format!("  {:<6} {:>14.6}\n", label, value)))?;
        }
        stdout.flush()?;
        Ok(())
    }

    pub fn print_histogram(&self, histogram: &Histogram) -> Result<()> {
        let mut stdout = io::stdout();
        let peak = histogram.counts.iter().copied().max().unwrap_or(0).max(1);
        for (i, count) in histogram.counts.iter().enumerate() {
            let (lo, hi) = histogram.bucket_bounds(i);
            let width = count * BAR_WIDTH / peak;
            execute!(
                stdout,
                SetForegroundColor(Colors::DIM),
                Print(format!("  [{:>12.4}, {:>12.4}) ", lo, hi)),
                SetForegroundColor(Colors::BAR),
                Print("#".repeat(width)),
                ResetColor,
                Print(format!(" {}\n", count)),
            )?;
        }
        stdout.flush()?;
        Ok(())
    }

    /// Print an error message.
    pub fn print_error(&self, msg: &str) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(Colors::ERROR),
            Print(format!("Error: {}\n", msg)),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Print an info message.
    pub fn print_info(&self, msg: &str) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(Colors::DIM),
            Print(format!("{}\n", msg)),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("short", 30), "short");
        assert_eq!(truncate("ééééééééé", 6), "ééé...");
    }
}
