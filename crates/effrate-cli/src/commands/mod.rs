//! CLI command implementations.

pub mod config;
pub mod history;
pub mod irr;
pub mod metrics;
pub mod summary;

// Re-export submodules for convenience
pub use config::ConfigArgs;
pub use history::HistoryArgs;
pub use irr::IrrArgs;
pub use metrics::MetricsArgs;
pub use summary::SummaryArgs;

use std::path::Path;

use effrate_core::scenario::Scenario;
use effrate_core::types::{Date, SignedFlow};

use crate::error::{CliError, CliResult};

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Parses a `DATE:AMOUNT` flow, e.g. `2024-01-01:-1000`.
pub fn parse_flow(s: &str) -> CliResult<SignedFlow> {
    let (date, amount) = s
        .split_once(':')
        .ok_or_else(|| CliError::InvalidFlow(s.to_string()))?;
    let date = parse_date(date)?;
    let amount: f64 = amount
        .trim()
        .parse()
        .map_err(|_| CliError::InvalidFlow(s.to_string()))?;
    Ok(SignedFlow::new(date, amount))
}

/// Reads and checks a scenario file.
pub fn load_scenario(path: &Path) -> CliResult<Scenario> {
    let content = std::fs::read_to_string(path)?;
    Scenario::from_json(&content).map_err(|source| CliError::ScenarioFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a scenario file as pretty JSON.
pub fn save_scenario(path: &Path, scenario: &Scenario) -> CliResult<()> {
    let content = scenario.to_json_pretty().map_err(|source| CliError::ScenarioFile {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, content)?;
    tracing::debug!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flow() {
        let flow = parse_flow("2024-01-01:-1000.5").unwrap();

        assert_eq!(flow.date, Date::from_ymd(2024, 1, 1).unwrap());
        assert_eq!(flow.amount, -1000.5);
    }

    #[test]
    fn test_parse_flow_rejects_garbage() {
        assert!(matches!(parse_flow("2024-01-01"), Err(CliError::InvalidFlow(_))));
        assert!(matches!(parse_flow("2024-01-01:abc"), Err(CliError::InvalidFlow(_))));
        assert!(matches!(parse_flow("2024-13-01:5"), Err(CliError::InvalidDate(_))));
    }
}
