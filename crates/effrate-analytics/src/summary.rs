//! Multi-fund comparison.
//!
//! A [`FundSet`] holds several named funds loaded from scenario files and
//! produces, for each, its reconciled snapshot history and latest rates.

use serde::Serialize;

use effrate_core::error::{EffRateError, EffRateResult};
use effrate_core::history::History;
use effrate_core::scenario::Scenario;
use effrate_core::types::{CashMovement, Date, DerivedMetrics};

use crate::reconcile::reconcile;

/// One fund as shown on the summary page.
#[derive(Debug, Clone, PartialEq)]
pub struct FundSummary {
    /// Trimmed, non-empty fund name.
    pub fund_name: String,
    /// The fund's ledger.
    pub cash_flows: Vec<CashMovement>,
    /// Saved snapshots, at least one.
    pub history: History,
}

impl FundSummary {
    /// Builds a summary entry from a loaded scenario.
    ///
    /// # Errors
    ///
    /// `EffRateError::InvalidScenario` when the fund name is missing or blank,
    /// or the history is empty.
    pub fn from_scenario(scenario: Scenario) -> EffRateResult<Self> {
        let Some(fund_name) = scenario.display_name().map(str::to_string) else {
            return Err(EffRateError::invalid_scenario(
                "fund name is required and cannot be empty",
            ));
        };
        if scenario.history.is_empty() {
            return Err(EffRateError::invalid_scenario(
                "history cannot be empty; at least one snapshot is required",
            ));
        }

        Ok(Self {
            fund_name,
            cash_flows: scenario.cash_flows,
            history: scenario.history,
        })
    }

    /// Parses a scenario file and builds a summary entry from it.
    pub fn from_json(json: &str) -> EffRateResult<Self> {
        Self::from_scenario(Scenario::from_json(json)?)
    }

    /// Reconciled metrics for every snapshot, by valuation date.
    pub fn snapshot_rows(&self) -> EffRateResult<Vec<SnapshotRow>> {
        self.history
            .sorted_by_valuation_date()
            .into_iter()
            .map(|snapshot| {
                Ok(SnapshotRow {
                    valuation_date: snapshot.valuation_date,
                    current_value: snapshot.current_value,
                    metrics: reconcile(snapshot, &self.cash_flows)?,
                })
            })
            .collect()
    }
}

/// A snapshot with its reconciled metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRow {
    /// Valuation date of the snapshot.
    pub valuation_date: Date,
    /// Fund value on that date.
    pub current_value: f64,
    /// Derived metrics.
    #[serde(flatten)]
    pub metrics: DerivedMetrics,
}

/// One fund's column in the comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundComparison {
    /// Fund name.
    pub fund_name: String,
    /// Snapshot rows, by valuation date.
    pub snapshots: Vec<SnapshotRow>,
    /// IRR of the latest snapshot.
    pub latest_irr: Option<f64>,
    /// Simple rate of the latest snapshot.
    pub latest_simple_rate: Option<f64>,
}

/// An ordered collection of funds with unique (case-insensitive) names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FundSet {
    funds: Vec<FundSummary>,
}

impl FundSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fund, replacing any fund whose name matches ignoring case.
    ///
    /// The added fund always goes to the end. Returns the replaced fund.
    pub fn add_or_replace(&mut self, fund: FundSummary) -> Option<FundSummary> {
        let key = fund.fund_name.to_lowercase();
        let position = self
            .funds
            .iter()
            .position(|existing| existing.fund_name.to_lowercase() == key);
        let replaced = position.map(|index| self.funds.remove(index));
        if replaced.is_some() {
            log::debug!("replacing fund {}", fund.fund_name);
        }
        self.funds.push(fund);
        replaced
    }

    /// Removes the fund with exactly this name.
    pub fn remove(&mut self, fund_name: &str) -> Option<FundSummary> {
        let index = self.funds.iter().position(|f| f.fund_name == fund_name)?;
        Some(self.funds.remove(index))
    }

    /// Removes every fund.
    pub fn clear(&mut self) {
        self.funds.clear();
    }

    /// Funds in insertion order.
    #[must_use]
    pub fn funds(&self) -> &[FundSummary] {
        &self.funds
    }

    /// Number of funds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.funds.len()
    }

    /// True when no fund is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.funds.is_empty()
    }

    /// Builds the comparison for every fund, in insertion order.
    pub fn comparison(&self) -> EffRateResult<Vec<FundComparison>> {
        self.funds
            .iter()
            .map(|fund| {
                let snapshots = fund.snapshot_rows()?;
                let latest = snapshots.last().map(|row| row.metrics);
                Ok(FundComparison {
                    fund_name: fund.fund_name.clone(),
                    latest_irr: latest.and_then(|m| m.irr),
                    latest_simple_rate: latest.and_then(|m| m.simple_rate),
                    snapshots,
                })
            })
            .collect()
    }
}
