//! Error types for mathematical operations.

use thiserror::Error;

/// A specialized Result type for mathematical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during root finding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Root-finding algorithm failed to converge.
    #[error("Convergence failed after {iterations} iterations (residual: {residual:.2e})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Final residual value.
        residual: f64,
    },

    /// Invalid bracket for root-finding.
    #[error("Invalid bracket: f({a}) = {fa:.2e} and f({b}) = {fb:.2e} have same sign")]
    InvalidBracket {
        /// Lower bound of bracket.
        a: f64,
        /// Upper bound of bracket.
        b: f64,
        /// Function value at a.
        fa: f64,
        /// Function value at b.
        fb: f64,
    },

    /// Derivative vanished or was not finite.
    #[error("Degenerate derivative: {value:.2e}")]
    DegenerateDerivative {
        /// The offending derivative value.
        value: f64,
    },

    /// An iterate left the admissible domain.
    #[error("Iterate {x} left the domain ({min}, {max})")]
    OutOfDomain {
        /// The rejected iterate.
        x: f64,
        /// Lower domain bound (exclusive).
        min: f64,
        /// Upper domain bound (exclusive).
        max: f64,
    },

    /// A function evaluation produced NaN or infinity.
    #[error("Non-finite function value at x = {x}")]
    NonFinite {
        /// Point at which the function was evaluated.
        x: f64,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates a convergence failed error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Returns true when the error means "no root could be located", as
    /// opposed to a malformed call.
    #[must_use]
    pub fn is_no_solution(&self) -> bool {
        !matches!(self, Self::InvalidInput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::convergence_failed(100, 1e-6);
        assert!(err.to_string().contains("100 iterations"));
    }

    #[test]
    fn test_no_solution_classification() {
        assert!(MathError::convergence_failed(10, 1.0).is_no_solution());
        assert!(MathError::NonFinite { x: 1.0 }.is_no_solution());
        assert!(!MathError::invalid_input("bad bracket").is_no_solution());
    }
}
