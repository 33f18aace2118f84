//! History command implementation.
//!
//! Lists, saves, edits and deletes the snapshots stored in a scenario file.
//! Snapshot indices are positions in save order, as stored in the file.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use effrate_analytics::reconcile::reconcile;
use effrate_core::types::{Date, DerivedMetrics};

use crate::cli::OutputFormat;
use crate::commands::config::Settings;
use crate::commands::{load_scenario, parse_date, save_scenario};
use crate::output::{
    format_amount, format_rate, format_raw_rate, print_header, print_json_value, print_output,
    print_success,
};

/// Arguments for the history command.
#[derive(Args, Debug)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: HistoryCommand,
}

/// History subcommands.
#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// List snapshots with metrics reconciled against the current ledger
    Show(ShowArgs),

    /// Save the file's current valuation as a new snapshot
    Save(SaveArgs),

    /// Change the valuation date and value of a snapshot
    Edit(EditArgs),

    /// Delete a snapshot
    Delete(DeleteArgs),
}

/// Arguments for show subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Scenario file (JSON)
    pub file: PathBuf,
}

/// Arguments for save subcommand.
#[derive(Args, Debug)]
pub struct SaveArgs {
    /// Scenario file (JSON)
    pub file: PathBuf,

    /// Valuation date (YYYY-MM-DD). Overrides the file.
    #[arg(short = 'd', long)]
    pub valuation_date: Option<String>,

    /// Current fund value. Overrides the file.
    #[arg(long)]
    pub value: Option<f64>,
}

/// Arguments for edit subcommand.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Scenario file (JSON)
    pub file: PathBuf,

    /// Snapshot index (as listed by `history show`)
    pub index: usize,

    /// New valuation date (YYYY-MM-DD)
    #[arg(short = 'd', long)]
    pub valuation_date: String,

    /// New fund value
    #[arg(long)]
    pub value: f64,
}

/// Arguments for delete subcommand.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Scenario file (JSON)
    pub file: PathBuf,

    /// Snapshot index (as listed by `history show`)
    pub index: usize,
}

/// Execute the history command.
pub fn execute(args: HistoryArgs, settings: &Settings) -> Result<()> {
    match args.command {
        HistoryCommand::Show(show_args) => execute_show(&show_args, settings),
        HistoryCommand::Save(save_args) => execute_save(&save_args),
        HistoryCommand::Edit(edit_args) => execute_edit(&edit_args),
        HistoryCommand::Delete(delete_args) => execute_delete(&delete_args),
    }
}

#[derive(Debug, Serialize, Tabled)]
struct HistoryRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Valuation Date")]
    valuation_date: String,
    #[tabled(rename = "Value")]
    current_value: String,
    #[tabled(rename = "Net Invested")]
    net_invested: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "IRR")]
    irr: String,
    #[tabled(rename = "Simple Rate")]
    simple_rate: String,
    #[tabled(rename = "Net Invested Source")]
    source: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HistoryEntry {
    index: usize,
    calculation_date_time: DateTime<Utc>,
    valuation_date: Date,
    current_value: f64,
    #[serde(flatten)]
    metrics: DerivedMetrics,
}

/// List snapshots, ordered by valuation date.
fn execute_show(args: &ShowArgs, settings: &Settings) -> Result<()> {
    let scenario = load_scenario(&args.file)?;

    let mut indexed: Vec<_> = scenario.history.snapshots().iter().enumerate().collect();
    indexed.sort_by_key(|(_, snapshot)| snapshot.valuation_date);

    let mut entries = Vec::with_capacity(indexed.len());
    for (index, snapshot) in indexed {
        entries.push(HistoryEntry {
            index,
            calculation_date_time: snapshot.calculation_timestamp,
            valuation_date: snapshot.valuation_date,
            current_value: snapshot.current_value,
            metrics: reconcile(snapshot, &scenario.cash_flows)?,
        });
    }

    let precision = settings.precision;
    match settings.format {
        OutputFormat::Table | OutputFormat::Csv => {
            let rows: Vec<HistoryRow> = entries
                .iter()
                .map(|entry| HistoryRow {
                    index: entry.index,
                    valuation_date: entry.valuation_date.to_string(),
                    current_value: format_amount(entry.current_value, precision),
                    net_invested: format_amount(entry.metrics.net_invested, precision),
                    profit: format_amount(entry.metrics.profit, precision),
                    irr: format_rate(entry.metrics.irr, precision),
                    simple_rate: format_rate(entry.metrics.simple_rate, precision),
                    source: if entry.metrics.net_invested_was_persisted {
                        "saved".to_string()
                    } else {
                        "ledger".to_string()
                    },
                })
                .collect();
            if settings.format == OutputFormat::Table {
                print_header(&format!(
                    "History: {}",
                    scenario.display_name().unwrap_or("unnamed fund")
                ));
            }
            print_output(&rows, settings.format)?;
        }
        OutputFormat::Json => print_json_value(&entries)?,
        OutputFormat::Minimal => {
            for entry in &entries {
                println!(
                    "{} {} {}",
                    entry.valuation_date,
                    format_raw_rate(entry.metrics.irr, precision),
                    format_raw_rate(entry.metrics.simple_rate, precision)
                );
            }
        }
    }

    Ok(())
}

/// Save the current valuation as a snapshot.
fn execute_save(args: &SaveArgs) -> Result<()> {
    let mut scenario = load_scenario(&args.file)?;

    let valuation_date = match args.valuation_date {
        Some(ref s) => Some(parse_date(s)?),
        None => scenario.valuation_date,
    };
    let current_value = args.value.or(scenario.current_value);

    let snapshot = scenario
        .history
        .save(&scenario.cash_flows, valuation_date, current_value, Utc::now())?;
    let message = format!(
        "Saved snapshot for {} (value {})",
        snapshot.valuation_date, snapshot.current_value
    );

    save_scenario(&args.file, &scenario)?;
    print_success(&message);
    Ok(())
}

/// Edit a snapshot.
fn execute_edit(args: &EditArgs) -> Result<()> {
    let mut scenario = load_scenario(&args.file)?;
    let valuation_date = parse_date(&args.valuation_date)?;

    scenario.history.edit(args.index, valuation_date, args.value)?;

    save_scenario(&args.file, &scenario)?;
    print_success(&format!(
        "Updated snapshot {} (net invested now follows the ledger)",
        args.index
    ));
    Ok(())
}

/// Delete a snapshot.
fn execute_delete(args: &DeleteArgs) -> Result<()> {
    let mut scenario = load_scenario(&args.file)?;

    let removed = scenario.history.delete(args.index)?;

    save_scenario(&args.file, &scenario)?;
    print_success(&format!(
        "Deleted snapshot {} ({})",
        args.index, removed.valuation_date
    ));
    Ok(())
}
