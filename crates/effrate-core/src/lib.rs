//! # effrate Core
//!
//! Core types and ledger utilities for the effrate investment-return calculator.
//!
//! This crate provides the foundational building blocks used throughout effrate:
//!
//! - **Types**: `Date`, `CashMovement`, `SignedFlow`, `ValuationPoint`,
//!   `Snapshot`, `DerivedMetrics`
//! - **Ledger**: Chronological sorting, net-invested summation, and the
//!   mapping of movements to signed flows
//! - **Day Count**: Actual/365 Fixed year fractions
//! - **History**: Saving, editing, and deleting calculation snapshots
//! - **Scenario**: The versioned JSON file a fund is persisted as
//!
//! ## Example
//!
//! ```rust
//! use effrate_core::prelude::*;
//!
//! let ledger = vec![
//!     CashMovement::deposit(Date::from_ymd(2024, 1, 1).unwrap(), 1000.0),
//!     CashMovement::withdrawal(Date::from_ymd(2024, 6, 1).unwrap(), 200.0),
//! ];
//!
//! assert_eq!(ledger::net_invested(&ledger), 800.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]

pub mod daycount;
pub mod error;
pub mod history;
pub mod ledger;
pub mod scenario;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycount::{Act365Fixed, DAYS_PER_YEAR};
    pub use crate::error::{EffRateError, EffRateResult};
    pub use crate::history::History;
    pub use crate::ledger;
    pub use crate::scenario::Scenario;
    pub use crate::types::{
        CashMovement, Date, DerivedMetrics, Direction, SignedFlow, Snapshot, ValuationPoint,
    };
}

// Re-export commonly used types at crate root
pub use error::{EffRateError, EffRateResult};
pub use types::{CashMovement, Date, DerivedMetrics, Direction, SignedFlow, Snapshot, ValuationPoint};
