//! effrate CLI - Command-line interface for investment return calculations.
//!
//! # Usage
//!
//! ```bash
//! # Metrics for the valuation stored in a scenario file
//! effrate metrics fund.json
//!
//! # Save the current valuation as a snapshot and list the history
//! effrate history save fund.json
//! effrate history show fund.json
//!
//! # Compare several funds
//! effrate summary alpha.json beta.json
//!
//! # IRR of an ad-hoc set of flows
//! effrate irr --flow 2024-01-01:-1000 --flow 2024-12-31:1100
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::config::Settings;

const DEFAULT_FILTER: &str =
    "warn,effrate_cli=info,effrate_analytics=info,effrate_core=info,effrate_math=info";
const VERBOSE_FILTER: &str =
    "warn,effrate_cli=debug,effrate_analytics=debug,effrate_core=debug,effrate_math=debug";

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Library crates log through `log`; the subscriber bridges those records.
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(VERBOSE_FILTER))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = Settings::load(cli.config.as_deref())
        .unwrap_or_else(|err| {
            output::print_warning(&format!("{err}; using default settings"));
            Settings::default()
        })
        .with_format(cli.format);
    settings.apply_color_preference();
    tracing::debug!("settings: {:?}", settings);

    match cli.command {
        Commands::Metrics(args) => commands::metrics::execute(args, &settings)?,
        Commands::History(args) => commands::history::execute(args, &settings)?,
        Commands::Summary(args) => commands::summary::execute(args, &settings)?,
        Commands::Irr(args) => commands::irr::execute(args, &settings)?,
        Commands::Config(args) => commands::config::execute(args, &settings, cli.config.as_deref())?,
    }

    Ok(())
}
