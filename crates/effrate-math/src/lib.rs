//! # effrate Math
//!
//! Numerical building blocks for the effrate return calculator.
//!
//! This crate provides:
//!
//! - **Solvers**: Root-finding algorithms (Newton-Raphson, Bisection, and a
//!   domain-bounded Newton with bisection fallback)
//!
//! ## Design Philosophy
//!
//! - **No guessing**: a solver either converges within its tolerance or
//!   reports an error; an unconverged iterate is never returned
//! - **Bounded work**: every loop is capped by [`solvers::SolverConfig`]
//! - **Non-finite aware**: NaN and infinity are treated as failures, never
//!   as convergence

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{
        bisection, hybrid, newton_raphson, SolverConfig, SolverResult,
    };
}

pub use error::{MathError, MathResult};
