//! Root-finding algorithms.
//!
//! This module provides numerical solvers for finding roots of equations:
//!
//! - [`newton_raphson`]: Fast quadratic convergence when derivative is available,
//!   optionally confined to an open domain
//! - [`bisection`]: Simple and reliable bracketing method
//! - [`hybrid`]: Domain-bounded Newton-Raphson with bisection fallback
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Newton-Raphson | Fastest (quadratic) | May diverge | Derivative |
//! | Bisection | Slow (linear) | Guaranteed | Bracket |
//! | Hybrid | Fast | Guaranteed* | Initial guess + domain |
//!
//! *When the function changes sign across the domain.
//!
//! All solvers converge on the residual `|f(x)| < tolerance` only. Hitting the
//! iteration cap is an error, never a best-effort answer.
//!
//! # Example: Rate of a single-period investment
//!
//! ```rust
//! use effrate_math::solvers::{hybrid, SolverConfig};
//!
//! // Invest 1000, receive 1100 one year later.
//! let npv = |r: f64| -1000.0 + 1100.0 / (1.0 + r);
//! let d_npv = |r: f64| -1100.0 / (1.0 + r).powi(2);
//!
//! let config = SolverConfig::default().with_tolerance(1e-7);
//! let result = hybrid(npv, d_npv, 0.05, (-0.9999, 10.0), &config, &config).unwrap();
//! assert!((result.root - 0.10).abs() < 1e-6);
//! ```

mod bisection;
mod hybrid;
mod newton;

pub use bisection::bisection;
pub use hybrid::hybrid;
pub use newton::newton_raphson;

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Tolerance on the absolute residual.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default()
            .with_tolerance(1e-8)
            .with_max_iterations(50);

        assert!((config.tolerance - 1e-8).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 50);
    }

    // ============ Rate-of-return style tests ============

    /// Present value of a deposit at t=0 and a payoff after `years`.
    fn npv(rate: f64, deposit: f64, payoff: f64, years: f64) -> f64 {
        -deposit + payoff * (1.0 + rate).powf(-years)
    }

    fn d_npv(rate: f64, payoff: f64, years: f64) -> f64 {
        -years * payoff * (1.0 + rate).powf(-years - 1.0)
    }

    #[test]
    fn test_all_solvers_agree() {
        let f = |r: f64| npv(r, 1000.0, 1500.0, 3.5);
        let df = |r: f64| d_npv(r, 1500.0, 3.5);
        let config = SolverConfig::default();

        let newton_result = newton_raphson(f, df, 0.1, None, &config).unwrap();
        let bisection_result = bisection(f, -0.9, 1.0, &config).unwrap();
        let hybrid_result = hybrid(f, df, 0.1, (-0.9999, 10.0), &config, &config).unwrap();

        assert_relative_eq!(newton_result.root, bisection_result.root, epsilon = 1e-8);
        assert_relative_eq!(newton_result.root, hybrid_result.root, epsilon = 1e-8);
    }

    #[test]
    fn test_closed_form_rate() {
        // 1000 -> 1500 over 3.5 years: r = 1.5^(1/3.5) - 1
        let f = |r: f64| npv(r, 1000.0, 1500.0, 3.5);
        let df = |r: f64| d_npv(r, 1500.0, 3.5);

        let result = newton_raphson(f, df, 0.1, None, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 1.5_f64.powf(1.0 / 3.5) - 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_loss_rate() {
        let f = |r: f64| npv(r, 1000.0, 800.0, 1.0);
        let df = |r: f64| d_npv(r, 800.0, 1.0);

        let result = hybrid(f, df, 0.1, (-0.9999, 10.0), &SolverConfig::default(), &SolverConfig::default())
            .unwrap();

        assert_relative_eq!(result.root, -0.2, epsilon = 1e-9);
    }

    #[test]
    fn test_newton_converges_faster_than_bisection() {
        let f = |r: f64| npv(r, 1000.0, 1210.0, 2.0);
        let df = |r: f64| d_npv(r, 1210.0, 2.0);
        let config = SolverConfig::default();

        let newton_result = newton_raphson(f, df, 0.05, None, &config).unwrap();
        let bisection_result = bisection(f, -0.5, 1.0, &config).unwrap();

        assert!(newton_result.iterations <= bisection_result.iterations);
    }
}
