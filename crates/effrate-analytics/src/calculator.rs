//! Metrics for the inputs currently being edited.
//!
//! Unlike [`crate::reconcile`], nothing here is persisted: the ledger is the
//! only source of net invested, and the valuation inputs may still be
//! missing.

use serde::Serialize;

use effrate_core::error::{ensure_finite, EffRateResult};
use effrate_core::ledger;
use effrate_core::types::{CashMovement, Date, ValuationPoint};

use crate::irr::solve_irr;
use crate::simple_rate::solve_simple_rate;

/// Live results panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveMetrics {
    /// Deposits minus withdrawals.
    pub net_invested: f64,
    /// Current value (0 when not entered) minus net invested.
    pub profit: f64,
    /// Annualized IRR, when computable.
    pub irr: Option<f64>,
    /// Simple annual rate, when computable.
    pub simple_rate: Option<f64>,
}

/// Computes the live metrics.
///
/// Rates are only attempted when the ledger is non-empty and both the
/// valuation date and current value are present.
pub fn live_metrics(
    entries: &[CashMovement],
    valuation_date: Option<Date>,
    current_value: Option<f64>,
) -> EffRateResult<LiveMetrics> {
    ledger::validate(entries)?;
    if let Some(value) = current_value {
        ensure_finite("current value", value)?;
    }

    let net_invested = ledger::net_invested(entries);
    let profit = current_value.unwrap_or(0.0) - net_invested;

    let (irr, simple_rate) = match (valuation_date, current_value) {
        (Some(date), Some(value)) if !entries.is_empty() => {
            let sorted = ledger::sort_chronologically(entries);
            let flows = ledger::to_signed_flows(&sorted, Some(ValuationPoint::new(date, value)));
            (solve_irr(&flows)?, solve_simple_rate(&sorted, date, value)?)
        }
        _ => (None, None),
    };

    Ok(LiveMetrics {
        net_invested,
        profit,
        irr,
        simple_rate,
    })
}
