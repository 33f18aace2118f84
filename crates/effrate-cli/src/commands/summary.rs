//! Summary command implementation.
//!
//! Compares the latest rates of several funds, one scenario file per fund.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use effrate_analytics::summary::{FundSet, FundSummary};

use crate::cli::OutputFormat;
use crate::commands::config::Settings;
use crate::commands::load_scenario;
use crate::error::CliError;
use crate::output::{
    format_amount, format_rate, format_raw_rate, print_header, print_json_value, print_output,
    print_warning,
};

/// Arguments for the summary command.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Scenario files (JSON), each with a fund name and at least one snapshot
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Also list every snapshot of every fund
    #[arg(long)]
    pub detailed: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct FundRow {
    #[tabled(rename = "Fund")]
    fund: String,
    #[tabled(rename = "Snapshots")]
    snapshots: usize,
    #[tabled(rename = "Latest Valuation")]
    latest_valuation: String,
    #[tabled(rename = "Latest Value")]
    latest_value: String,
    #[tabled(rename = "IRR")]
    irr: String,
    #[tabled(rename = "Simple Rate")]
    simple_rate: String,
}

#[derive(Debug, Serialize, Tabled)]
struct SnapshotLine {
    #[tabled(rename = "Fund")]
    fund: String,
    #[tabled(rename = "Valuation Date")]
    valuation_date: String,
    #[tabled(rename = "Value")]
    current_value: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "IRR")]
    irr: String,
    #[tabled(rename = "Simple Rate")]
    simple_rate: String,
}

/// Execute the summary command.
pub fn execute(args: SummaryArgs, settings: &Settings) -> Result<()> {
    let mut funds = FundSet::new();
    for path in &args.files {
        let scenario = load_scenario(path)?;
        let fund = FundSummary::from_scenario(scenario).map_err(|source| CliError::ScenarioFile {
            path: path.clone(),
            source,
        })?;
        if let Some(replaced) = funds.add_or_replace(fund) {
            print_warning(&format!(
                "{} replaces an earlier file for fund {}",
                path.display(),
                replaced.fund_name
            ));
        }
    }

    let comparison = funds.comparison()?;
    let precision = settings.precision;

    match settings.format {
        OutputFormat::Table | OutputFormat::Csv => {
            let rows: Vec<FundRow> = comparison
                .iter()
                .map(|fund| {
                    let latest = fund.snapshots.last();
                    FundRow {
                        fund: fund.fund_name.clone(),
                        snapshots: fund.snapshots.len(),
                        latest_valuation: latest
                            .map_or_else(|| "-".to_string(), |row| row.valuation_date.to_string()),
                        latest_value: latest.map_or_else(
                            || "-".to_string(),
                            |row| format_amount(row.current_value, precision),
                        ),
                        irr: format_rate(fund.latest_irr, precision),
                        simple_rate: format_rate(fund.latest_simple_rate, precision),
                    }
                })
                .collect();
            if settings.format == OutputFormat::Table {
                print_header("Fund Comparison");
            }
            print_output(&rows, settings.format)?;

            if args.detailed {
                let lines: Vec<SnapshotLine> = comparison
                    .iter()
                    .flat_map(|fund| {
                        fund.snapshots.iter().map(move |row| SnapshotLine {
                            fund: fund.fund_name.clone(),
                            valuation_date: row.valuation_date.to_string(),
                            current_value: format_amount(row.current_value, precision),
                            profit: format_amount(row.metrics.profit, precision),
                            irr: format_rate(row.metrics.irr, precision),
                            simple_rate: format_rate(row.metrics.simple_rate, precision),
                        })
                    })
                    .collect();
                if settings.format == OutputFormat::Table {
                    print_header("Snapshots");
                }
                print_output(&lines, settings.format)?;
            }
        }
        OutputFormat::Json => print_json_value(&comparison)?,
        OutputFormat::Minimal => {
            for fund in &comparison {
                println!(
                    "{}: {} {}",
                    fund.fund_name,
                    format_raw_rate(fund.latest_irr, precision),
                    format_raw_rate(fund.latest_simple_rate, precision)
                );
            }
        }
    }

    Ok(())
}
