//! Calculation snapshots and derived metrics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Date, ValuationPoint};

/// A saved calculation.
///
/// Only the valuation inputs and, optionally, the net invested figure at save
/// time are persisted. When `net_invested` is present it is authoritative for
/// this snapshot's profit; when absent (older files, or after an edit) it is
/// recomputed from the live ledger.
///
/// Rates and profit are never stored. Legacy `irr`, `simpleRate` and `profit`
/// fields in older files are accepted and dropped on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// When the calculation was saved.
    #[serde(rename = "calculationDateTime", default = "Utc::now")]
    pub calculation_timestamp: DateTime<Utc>,
    /// Valuation date used for the calculation.
    pub valuation_date: Date,
    /// Fund value on the valuation date.
    pub current_value: f64,
    /// Net invested captured at save time, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_invested: Option<f64>,
}

impl Snapshot {
    /// Creates a snapshot without a persisted net invested figure.
    #[must_use]
    pub fn new(calculation_timestamp: DateTime<Utc>, valuation_date: Date, current_value: f64) -> Self {
        Self {
            calculation_timestamp,
            valuation_date,
            current_value,
            net_invested: None,
        }
    }

    /// Locks in a net invested figure.
    #[must_use]
    pub fn with_net_invested(mut self, net_invested: f64) -> Self {
        self.net_invested = Some(net_invested);
        self
    }

    /// The snapshot's valuation point.
    #[must_use]
    pub fn valuation(&self) -> ValuationPoint {
        ValuationPoint::new(self.valuation_date, self.current_value)
    }
}

/// The four derived numbers, plus where net invested came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    /// Deposits minus withdrawals.
    pub net_invested: f64,
    /// Current value minus net invested.
    pub profit: f64,
    /// Annualized internal rate of return, if defined.
    pub irr: Option<f64>,
    /// Balance-weighted simple annual rate, if defined.
    pub simple_rate: Option<f64>,
    /// True when `net_invested` came from a persisted snapshot.
    pub net_invested_was_persisted: bool,
}
