//! Derived metrics for a saved snapshot.

use effrate_core::error::{ensure_finite, EffRateResult};
use effrate_core::ledger;
use effrate_core::types::{CashMovement, DerivedMetrics, Snapshot};

use crate::irr::solve_irr;
use crate::simple_rate::solve_simple_rate;

/// Recomputes a snapshot's metrics against the live ledger.
///
/// Net invested comes from the snapshot when it was persisted at save time,
/// otherwise from `live_ledger`. Both rates always use `live_ledger` plus the
/// snapshot's valuation, and are `None` when the live ledger is empty.
///
/// # Errors
///
/// Propagates non-finite or negative amounts in the ledger and a non-finite
/// snapshot value or persisted net invested.
pub fn reconcile(snapshot: &Snapshot, live_ledger: &[CashMovement]) -> EffRateResult<DerivedMetrics> {
    ledger::validate(live_ledger)?;
    let current_value = ensure_finite("current value", snapshot.current_value)?;

    let (net_invested, net_invested_was_persisted) = match snapshot.net_invested {
        Some(persisted) => (ensure_finite("net invested", persisted)?, true),
        None => (ledger::net_invested(live_ledger), false),
    };

    let (irr, simple_rate) = if live_ledger.is_empty() {
        (None, None)
    } else {
        let sorted = ledger::sort_chronologically(live_ledger);
        let flows = ledger::to_signed_flows(&sorted, Some(snapshot.valuation()));
        (
            solve_irr(&flows)?,
            solve_simple_rate(&sorted, snapshot.valuation_date, current_value)?,
        )
    };

    Ok(DerivedMetrics {
        net_invested,
        profit: current_value - net_invested,
        irr,
        simple_rate,
        net_invested_was_persisted,
    })
}
