//! Hybrid root-finding algorithm.
//!
//! Combines domain-bounded Newton-Raphson with bisection over the same domain.

use crate::error::{MathError, MathResult};
use crate::solvers::{bisection, newton_raphson, SolverConfig, SolverResult};

/// Hybrid root-finding algorithm.
///
/// Starts with Newton-Raphson for fast quadratic convergence, confined to the
/// open interval `domain`. Newton is abandoned in favour of bisection over the
/// closed `domain` when:
///
/// 1. the derivative is zero or not finite,
/// 2. an iterate is not finite or leaves the domain,
/// 3. Newton runs out of iterations.
///
/// The bisection phase fails when the domain endpoints do not bracket a sign
/// change or bisection itself exhausts its iterations.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `df` - The derivative of the function
/// * `initial_guess` - Starting point for Newton iteration
/// * `domain` - Admissible interval `(min, max)`
/// * `newton_config` - Configuration of the Newton phase
/// * `bisection_config` - Configuration of the bisection fallback
///
/// # Example
///
/// ```rust
/// use effrate_math::solvers::{hybrid, SolverConfig};
///
/// // Find root of x^3 - x - 2
/// let f = |x: f64| x * x * x - x - 2.0;
/// let df = |x: f64| 3.0 * x * x - 1.0;
///
/// let config = SolverConfig::default();
/// let result = hybrid(f, df, 1.5, (1.0, 2.0), &config, &config).unwrap();
/// assert!((f(result.root)).abs() < 1e-10);
/// ```
pub fn hybrid<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    domain: (f64, f64),
    newton_config: &SolverConfig,
    bisection_config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let (min, max) = domain;
    if min.is_nan() || max.is_nan() || min >= max {
        return Err(MathError::invalid_input(format!(
            "domain lower bound {min} must be below upper bound {max}"
        )));
    }

    match newton_raphson(&f, &df, initial_guess, Some(domain), newton_config) {
        Ok(result) => Ok(result),
        Err(err) => {
            log::debug!("Newton-Raphson abandoned ({err}), falling back to bisection");
            bisection(&f, min, max, bisection_config)
        }
    }
}
