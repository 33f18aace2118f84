//! Cash-flow ledger utilities.
//!
//! Pure functions over a borrowed slice of [`CashMovement`]s. None of them
//! mutate or retain the caller's ledger.

use crate::error::{ensure_finite, EffRateError, EffRateResult};
use crate::types::{CashMovement, SignedFlow, ValuationPoint};

/// Returns a copy of the ledger sorted by ascending date.
///
/// The sort is stable: entries sharing a date keep their original relative
/// order, which fixes the order same-day deposits and withdrawals are applied
/// in when accumulating balances.
#[must_use]
pub fn sort_chronologically(entries: &[CashMovement]) -> Vec<CashMovement> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|entry| entry.date);
    sorted
}

/// Sum of deposits minus sum of withdrawals. Zero for an empty ledger.
#[must_use]
pub fn net_invested(entries: &[CashMovement]) -> f64 {
    entries.iter().map(CashMovement::balance_effect).sum()
}

/// Maps movements to investor-perspective flows and appends the valuation.
///
/// Deposits become negative, withdrawals positive, and the valuation (when
/// given) a final positive inflow on its date.
#[must_use]
pub fn to_signed_flows(entries: &[CashMovement], valuation: Option<ValuationPoint>) -> Vec<SignedFlow> {
    entries
        .iter()
        .map(SignedFlow::from)
        .chain(valuation.as_ref().map(ValuationPoint::as_flow))
        .collect()
}

/// Checks that every amount is finite and non-negative.
///
/// # Errors
///
/// `EffRateError::NonFiniteInput` for NaN or infinite amounts,
/// `EffRateError::InvalidAmount` for negative magnitudes.
pub fn validate(entries: &[CashMovement]) -> EffRateResult<()> {
    for (index, entry) in entries.iter().enumerate() {
        ensure_finite(&format!("amount of cash flow {index}"), entry.amount)?;
        if entry.amount < 0.0 {
            return Err(EffRateError::invalid_amount(
                entry.amount,
                format!("cash flow {index} must not be negative; use the direction for sign"),
            ));
        }
    }
    Ok(())
}
