//! Domain types for effrate.

mod cashflow;
mod date;
mod snapshot;

pub use cashflow::{CashMovement, Direction, SignedFlow, ValuationPoint};
pub use date::Date;
pub use snapshot::{DerivedMetrics, Snapshot};
