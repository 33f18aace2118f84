//! IRR command implementation.
//!
//! Solves the IRR of flows given on the command line. Amounts are signed from
//! the investor's side: money paid in is negative, money received positive.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use effrate_analytics::irr::{npv, solve_irr_with_config, IrrConfig};
use effrate_core::types::SignedFlow;

use crate::cli::OutputFormat;
use crate::commands::config::Settings;
use crate::commands::parse_flow;
use crate::output::{format_rate, format_raw_rate, print_header, print_json_value, print_output, KeyValue};

/// Arguments for the irr command.
#[derive(Args, Debug)]
pub struct IrrArgs {
    /// A dated flow as DATE:AMOUNT (repeatable), e.g. 2024-01-01:-1000
    #[arg(long = "flow", required = true, allow_hyphen_values = true)]
    pub flows: Vec<String>,

    /// Newton starting rate (as decimal)
    #[arg(long, default_value = "0.1", allow_hyphen_values = true)]
    pub guess: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IrrReport {
    flows: usize,
    irr: Option<f64>,
    npv_at_irr: Option<f64>,
}

/// Execute the irr command.
pub fn execute(args: IrrArgs, settings: &Settings) -> Result<()> {
    let flows = args
        .flows
        .iter()
        .map(|s| parse_flow(s))
        .collect::<Result<Vec<SignedFlow>, _>>()?;

    let config = IrrConfig::default().with_initial_guess(args.guess);
    let irr = solve_irr_with_config(&flows, &config)?;
    let report = IrrReport {
        flows: flows.len(),
        irr,
        npv_at_irr: irr.map(|rate| npv(&flows, rate)),
    };

    let precision = settings.precision;
    match settings.format {
        OutputFormat::Table | OutputFormat::Csv => {
            let results = vec![
                KeyValue::new("Flows", report.flows.to_string()),
                KeyValue::new("IRR (annual)", format_rate(report.irr, precision)),
                KeyValue::new(
                    "NPV at IRR",
                    report
                        .npv_at_irr
                        .map_or_else(|| "-".to_string(), |v| format!("{v:.2e}")),
                ),
            ];
            if settings.format == OutputFormat::Table {
                print_header("Internal Rate of Return");
            }
            print_output(&results, settings.format)?;
        }
        OutputFormat::Json => print_json_value(&report)?,
        OutputFormat::Minimal => println!("{}", format_raw_rate(report.irr, precision)),
    }

    Ok(())
}
