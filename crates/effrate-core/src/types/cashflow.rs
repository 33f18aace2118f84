//! Cash movement types.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Date;

/// Direction of a cash movement, seen from the fund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Money paid into the fund.
    Deposit,
    /// Money taken out of the fund.
    Withdrawal,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Deposit => "deposit",
            Direction::Withdrawal => "withdrawal",
        };
        write!(f, "{name}")
    }
}

fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// A dated deposit or withdrawal.
///
/// `amount` is a magnitude; `direction` carries the sign. A zero amount is a
/// valid no-op entry. The `id` only identifies the entry for editing and is
/// ignored by every calculation. It is not written to scenario files and a
/// fresh one is generated when an entry is read without one.
///
/// # Example
///
/// ```rust
/// use effrate_core::types::{CashMovement, Date, Direction};
///
/// let cf = CashMovement::deposit(Date::from_ymd(2025, 6, 15).unwrap(), 250.0);
/// assert_eq!(cf.direction, Direction::Deposit);
/// assert_eq!(cf.balance_effect(), 250.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashMovement {
    /// Client-side identity of the entry.
    #[serde(default = "generate_id", skip_serializing)]
    pub id: String,
    /// Date the money moved.
    pub date: Date,
    /// Non-negative magnitude.
    pub amount: f64,
    /// Deposit or withdrawal.
    pub direction: Direction,
}

impl CashMovement {
    /// Creates a cash movement with a freshly generated id.
    #[must_use]
    pub fn new(date: Date, amount: f64, direction: Direction) -> Self {
        Self {
            id: generate_id(),
            date,
            amount,
            direction,
        }
    }

    /// Creates a deposit.
    #[must_use]
    pub fn deposit(date: Date, amount: f64) -> Self {
        Self::new(date, amount, Direction::Deposit)
    }

    /// Creates a withdrawal.
    #[must_use]
    pub fn withdrawal(date: Date, amount: f64) -> Self {
        Self::new(date, amount, Direction::Withdrawal)
    }

    /// Sets an explicit id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Effect on the invested balance: `+amount` for deposits, `-amount` for
    /// withdrawals.
    #[must_use]
    pub fn balance_effect(&self) -> f64 {
        match self.direction {
            Direction::Deposit => self.amount,
            Direction::Withdrawal => -self.amount,
        }
    }
}

/// A dated cash flow from the investor's point of view.
///
/// Deposits are negative (money leaves the investor), withdrawals and the
/// terminal valuation are positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignedFlow {
    /// Flow date.
    pub date: Date,
    /// Signed amount.
    pub amount: f64,
}

impl SignedFlow {
    /// Creates a signed flow.
    #[must_use]
    pub fn new(date: Date, amount: f64) -> Self {
        Self { date, amount }
    }
}

impl From<&CashMovement> for SignedFlow {
    fn from(movement: &CashMovement) -> Self {
        Self {
            date: movement.date,
            amount: -movement.balance_effect(),
        }
    }
}

/// The fund value observed on a valuation date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationPoint {
    /// Valuation date.
    pub date: Date,
    /// Fund value on that date.
    pub value: f64,
}

impl ValuationPoint {
    /// Creates a valuation point.
    #[must_use]
    pub fn new(date: Date, value: f64) -> Self {
        Self { date, value }
    }

    /// The valuation as a terminal positive inflow.
    #[must_use]
    pub fn as_flow(&self) -> SignedFlow {
        SignedFlow::new(self.date, self.value)
    }
}
