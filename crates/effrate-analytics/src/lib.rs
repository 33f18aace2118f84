//! # effrate Analytics
//!
//! Return calculations over a cash-flow ledger:
//!
//! - **IRR**: Annualized money-weighted return, solved with Newton-Raphson
//!   and a bisection fallback ([`irr`])
//! - **Simple rate**: Profit over the balance × days integral ([`simple_rate`])
//! - **Reconciliation**: Derived metrics for a saved snapshot against the
//!   live ledger ([`reconcile`])
//! - **Calculator**: Metrics for the values currently being edited
//!   ([`calculator`])
//! - **Summary**: Side-by-side comparison of several funds ([`summary`])
//!
//! A rate that cannot be determined is `Ok(None)`. Errors are reserved for
//! malformed input such as NaN amounts.
//!
//! ## Example
//!
//! ```rust
//! use effrate_analytics::prelude::*;
//! use effrate_core::prelude::*;
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let flows = vec![
//!     SignedFlow::new(start, -1000.0),
//!     SignedFlow::new(start.add_days(365), 1100.0),
//! ];
//!
//! let irr = solve_irr(&flows).unwrap().unwrap();
//! assert!((irr - 0.10).abs() < 1e-6);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

pub mod calculator;
pub mod irr;
pub mod reconcile;
pub mod simple_rate;
pub mod summary;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calculator::{live_metrics, LiveMetrics};
    pub use crate::irr::{npv, npv_derivative, solve_irr, solve_irr_with_config, IrrConfig};
    pub use crate::reconcile::reconcile;
    pub use crate::simple_rate::solve_simple_rate;
    pub use crate::summary::{FundComparison, FundSet, FundSummary, SnapshotRow};
}

pub use calculator::live_metrics;
pub use irr::{solve_irr, IrrConfig};
pub use reconcile::reconcile;
pub use simple_rate::solve_simple_rate;
