//! Metrics command implementation.
//!
//! Calculates net invested, profit, IRR and simple rate for a scenario file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use effrate_analytics::calculator::{live_metrics, LiveMetrics};
use effrate_core::types::Date;

use crate::cli::OutputFormat;
use crate::commands::config::Settings;
use crate::commands::{load_scenario, parse_date};
use crate::output::{
    format_amount, format_rate, format_raw_rate, print_header, print_json_value, print_output,
    KeyValue,
};

/// Arguments for the metrics command.
#[derive(Args, Debug)]
pub struct MetricsArgs {
    /// Scenario file (JSON)
    pub file: PathBuf,

    /// Valuation date (YYYY-MM-DD). Overrides the file.
    #[arg(short = 'd', long)]
    pub valuation_date: Option<String>,

    /// Current fund value. Overrides the file.
    #[arg(long)]
    pub value: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MetricsReport<'a> {
    fund_name: Option<&'a str>,
    valuation_date: Option<Date>,
    current_value: Option<f64>,
    #[serde(flatten)]
    metrics: LiveMetrics,
}

/// Execute the metrics command.
pub fn execute(args: MetricsArgs, settings: &Settings) -> Result<()> {
    let scenario = load_scenario(&args.file)?;

    let valuation_date = match args.valuation_date {
        Some(ref s) => Some(parse_date(s)?),
        None => scenario.valuation_date,
    };
    let current_value = args.value.or(scenario.current_value);

    let metrics = live_metrics(&scenario.cash_flows, valuation_date, current_value)?;
    tracing::debug!("metrics for {}: {:?}", args.file.display(), metrics);

    let report = MetricsReport {
        fund_name: scenario.display_name(),
        valuation_date,
        current_value,
        metrics,
    };
    let precision = settings.precision;

    match settings.format {
        OutputFormat::Table | OutputFormat::Csv => {
            let results = vec![
                KeyValue::new("Fund", report.fund_name.unwrap_or("-")),
                KeyValue::new(
                    "Valuation Date",
                    valuation_date.map_or_else(|| "-".to_string(), |d| d.to_string()),
                ),
                KeyValue::new(
                    "Current Value",
                    current_value.map_or_else(|| "-".to_string(), |v| format_amount(v, precision)),
                ),
                KeyValue::new("Net Invested", format_amount(metrics.net_invested, precision)),
                KeyValue::new("Profit", format_amount(metrics.profit, precision)),
                KeyValue::new("IRR (annual)", format_rate(metrics.irr, precision)),
                KeyValue::new("Simple Rate (annual)", format_rate(metrics.simple_rate, precision)),
            ];
            if settings.format == OutputFormat::Table {
                print_header("Return Metrics");
            }
            print_output(&results, settings.format)?;
        }
        OutputFormat::Json => print_json_value(&report)?,
        OutputFormat::Minimal => {
            println!(
                "IRR: {}, Simple rate: {}",
                format_raw_rate(metrics.irr, precision),
                format_raw_rate(metrics.simple_rate, precision)
            );
        }
    }

    Ok(())
}
