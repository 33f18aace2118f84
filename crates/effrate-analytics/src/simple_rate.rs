//! Balance-weighted simple annual rate.
//!
//! $$X = \frac{\text{profit} \times 365}{\sum_j B_j \cdot \text{days}_j}$$
//!
//! where `B_j` is the invested balance held over interval `j`. Intervals run
//! between consecutive distinct flow dates and from the last flow to the
//! valuation date. Flows sharing a date are applied together.

use effrate_core::daycount::DAYS_PER_YEAR;
use effrate_core::error::{ensure_finite, EffRateResult};
use effrate_core::ledger;
use effrate_core::types::{CashMovement, Date};

/// Computes the simple annual rate of a ledger valued at `current_value`.
///
/// Returns `Ok(None)` when the ledger is empty, when the balance × days sum
/// is not positive (for instance a valuation on or before every flow), or
/// when the running balance is negative at the start of any interval of
/// positive length. The last case aborts immediately, even if later deposits
/// would bring the balance back above zero.
///
/// # Errors
///
/// `EffRateError::NonFiniteInput` or `EffRateError::InvalidAmount` for a bad
/// ledger amount, and `EffRateError::NonFiniteInput` for a non-finite
/// `current_value`.
pub fn solve_simple_rate(
    entries: &[CashMovement],
    valuation_date: Date,
    current_value: f64,
) -> EffRateResult<Option<f64>> {
    ledger::validate(entries)?;
    ensure_finite("current value", current_value)?;

    let sorted = ledger::sort_chronologically(entries);
    let Some(first) = sorted.first() else {
        return Ok(None);
    };

    let mut weighted = 0.0;
    let mut balance = 0.0;
    let mut last_date = first.date;

    for entry in &sorted {
        let days = last_date.days_between(&entry.date);
        if days > 0 {
            if balance < 0.0 {
                log::debug!("simple rate undefined: balance {balance} before {}", entry.date);
                return Ok(None);
            }
            weighted += balance * days as f64;
        }
        balance += entry.balance_effect();
        last_date = entry.date;
    }

    let final_days = last_date.days_between(&valuation_date);
    if final_days > 0 {
        if balance < 0.0 {
            log::debug!("simple rate undefined: balance {balance} before valuation");
            return Ok(None);
        }
        weighted += balance * final_days as f64;
    }

    if weighted <= 0.0 {
        return Ok(None);
    }

    let profit = current_value - ledger::net_invested(&sorted);
    Ok(Some(profit * DAYS_PER_YEAR / weighted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use effrate_core::EffRateError;

    fn date(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    #[test]
    fn test_single_deposit_one_year() {
        let ledger = [CashMovement::deposit(date("2024-01-01"), 1000.0)];

        let rate = solve_simple_rate(&ledger, date("2024-12-31"), 1100.0)
            .unwrap()
            .unwrap();

        assert_relative_eq!(rate, 0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_two_deposits() {
        let ledger = [
            CashMovement::deposit(date("2024-01-01"), 1000.0),
            CashMovement::deposit(date("2024-04-01"), 1000.0),
        ];

        let rate = solve_simple_rate(&ledger, date("2025-01-01"), 2200.0)
            .unwrap()
            .unwrap();

        // 1000 x 91 days + 2000 x 275 days
        assert_relative_eq!(rate, 200.0 * 365.0 / 641_000.0, epsilon = 1e-12);
    }

    #[test]
    fn test_same_day_flows_apply_together() {
        let ledger = [
            CashMovement::deposit(date("2024-01-01"), 1000.0),
            CashMovement::withdrawal(date("2024-01-01"), 400.0),
        ];

        let rate = solve_simple_rate(&ledger, date("2024-12-31"), 660.0)
            .unwrap()
            .unwrap();

        assert_relative_eq!(rate, 0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_ledger() {
        assert_eq!(solve_simple_rate(&[], date("2025-01-01"), 100.0).unwrap(), None);
    }

    #[test]
    fn test_valuation_on_or_before_flows() {
        let ledger = [
            CashMovement::deposit(date("2024-06-01"), 1000.0),
            CashMovement::deposit(date("2024-06-01"), 500.0),
        ];

        for valuation in ["2024-06-01", "2024-01-01"] {
            assert_eq!(
                solve_simple_rate(&ledger, date(valuation), 1600.0).unwrap(),
                None
            );
        }
    }

    #[test]
    fn test_over_withdrawal_is_undefined() {
        let ledger = [
            CashMovement::deposit(date("2024-01-01"), 1000.0),
            CashMovement::withdrawal(date("2024-02-01"), 1200.0),
        ];

        assert_eq!(solve_simple_rate(&ledger, date("2024-06-01"), 0.0).unwrap(), None);
    }

    #[test]
    fn test_non_finite_value() {
        let ledger = [CashMovement::deposit(date("2024-01-01"), 1000.0)];

        assert!(matches!(
            solve_simple_rate(&ledger, date("2025-01-01"), f64::INFINITY),
            Err(EffRateError::NonFiniteInput { .. })
        ));
    }
}
