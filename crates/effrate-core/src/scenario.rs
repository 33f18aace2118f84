//! The persisted scenario file.
//!
//! A scenario is everything needed to reproduce one fund's calculations: the
//! ledger, the current valuation inputs, and the snapshot history.
//!
//! ```json
//! {
//!   "version": 1,
//!   "fundName": "Global Index",
//!   "cashFlows": [{ "date": "2024-01-01", "amount": 1000, "direction": "deposit" }],
//!   "valuationDate": "2025-01-01",
//!   "currentValue": 1100,
//!   "history": [{ "calculationDateTime": "2025-01-01T12:00:00Z",
//!                 "valuationDate": "2025-01-01", "currentValue": 1100,
//!                 "netInvested": 1000 }]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, EffRateError, EffRateResult};
use crate::history::History;
use crate::ledger;
use crate::types::{CashMovement, Date, ValuationPoint};

/// File format version written and accepted by this library.
pub const SCENARIO_VERSION: u32 = 1;

/// One fund's ledger, valuation inputs, and history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// File format version.
    pub version: u32,
    /// Optional display name of the fund.
    #[serde(default)]
    pub fund_name: Option<String>,
    /// Deposits and withdrawals.
    pub cash_flows: Vec<CashMovement>,
    /// Valuation date, if set.
    #[serde(default)]
    pub valuation_date: Option<Date>,
    /// Fund value on the valuation date, if set.
    #[serde(default)]
    pub current_value: Option<f64>,
    /// Saved calculations.
    #[serde(default)]
    pub history: History,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            version: SCENARIO_VERSION,
            fund_name: None,
            cash_flows: Vec::new(),
            valuation_date: None,
            current_value: None,
            history: History::new(),
        }
    }
}

impl Scenario {
    /// Creates an empty scenario.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and checks a scenario from JSON.
    ///
    /// # Errors
    ///
    /// `EffRateError::Serialization` for malformed JSON,
    /// `EffRateError::UnsupportedVersion` for any version other than 1, and
    /// the ledger validation errors for non-finite or negative numbers.
    pub fn from_json(json: &str) -> EffRateResult<Self> {
        let scenario: Scenario = serde_json::from_str(json)?;
        scenario.check()?;
        Ok(scenario)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> EffRateResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The valuation point, when both date and value are set.
    #[must_use]
    pub fn valuation(&self) -> Option<ValuationPoint> {
        match (self.valuation_date, self.current_value) {
            (Some(date), Some(value)) => Some(ValuationPoint::new(date, value)),
            _ => None,
        }
    }

    /// The trimmed fund name, if present and non-blank.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.fund_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    fn check(&self) -> EffRateResult<()> {
        if self.version != SCENARIO_VERSION {
            return Err(EffRateError::UnsupportedVersion {
                found: self.version,
                expected: SCENARIO_VERSION,
            });
        }
        ledger::validate(&self.cash_flows)?;
        if let Some(value) = self.current_value {
            ensure_finite("current value", value)?;
        }
        for (index, snapshot) in self.history.snapshots().iter().enumerate() {
            ensure_finite(&format!("current value of snapshot {index}"), snapshot.current_value)?;
            if let Some(net) = snapshot.net_invested {
                ensure_finite(&format!("net invested of snapshot {index}"), net)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "version": 1,
        "fundName": "  Global Index ",
        "cashFlows": [
            { "date": "2024-01-01", "amount": 1000, "direction": "deposit" },
            { "date": "2024-06-01", "amount": 100, "direction": "withdrawal" }
        ],
        "valuationDate": "2025-01-01",
        "currentValue": 1100,
        "history": [
            { "calculationDateTime": "2025-01-01T12:00:00Z", "valuationDate": "2025-01-01",
              "currentValue": 1100, "netInvested": 900, "irr": 0.2, "profit": 200 }
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let scenario = Scenario::from_json(SAMPLE).unwrap();

        assert_eq!(scenario.cash_flows.len(), 2);
        assert_eq!(scenario.display_name(), Some("Global Index"));
        assert_eq!(scenario.history.len(), 1);
        assert_eq!(scenario.history.get(0).unwrap().net_invested, Some(900.0));
        assert_eq!(
            scenario.valuation(),
            Some(ValuationPoint::new(Date::parse("2025-01-01").unwrap(), 1100.0))
        );
    }

    #[test]
    fn test_optional_fields_default() {
        let scenario = Scenario::from_json(r#"{"version":1,"cashFlows":[]}"#).unwrap();

        assert_eq!(scenario.fund_name, None);
        assert_eq!(scenario.valuation(), None);
        assert!(scenario.history.is_empty());
    }

    #[test]
    fn test_rejects_other_versions() {
        let err = Scenario::from_json(r#"{"version":2,"cashFlows":[]}"#).unwrap_err();

        assert_eq!(
            err,
            EffRateError::UnsupportedVersion {
                found: 2,
                expected: 1
            }
        );
    }

    #[test]
    fn test_rejects_bad_direction() {
        let json = r#"{"version":1,"cashFlows":[{"date":"2024-01-01","amount":1,"direction":"gift"}]}"#;

        assert!(matches!(
            Scenario::from_json(json),
            Err(EffRateError::Serialization { .. })
        ));
    }

    #[test]
    fn test_rejects_negative_amount() {
        let json = r#"{"version":1,"cashFlows":[{"date":"2024-01-01","amount":-1,"direction":"deposit"}]}"#;

        assert!(matches!(
            Scenario::from_json(json),
            Err(EffRateError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_written_file_drops_legacy_fields() {
        let scenario = Scenario::from_json(SAMPLE).unwrap();

        let written = scenario.to_json_pretty().unwrap();

        assert!(written.contains("\"netInvested\": 900.0"));
        assert!(!written.contains("\"irr\""));
        assert!(!written.contains("\"profit\""));
        assert!(!written.contains("\"id\""));
        assert_eq!(Scenario::from_json(&written).unwrap().history, scenario.history);
    }

    #[test]
    fn test_blank_fund_name_has_no_display_name() {
        let scenario = Scenario {
            fund_name: Some("   ".to_string()),
            ..Scenario::new()
        };

        assert_eq!(scenario.display_name(), None);
    }
}
