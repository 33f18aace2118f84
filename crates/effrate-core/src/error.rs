//! Error types for the effrate library.
//!
//! "Not computable" outcomes (an undefined rate) are not errors: they are
//! `Ok(None)` results. The variants here cover malformed input and rejected
//! history operations.

use thiserror::Error;

/// A specialized Result type for effrate operations.
pub type EffRateResult<T> = Result<T, EffRateError>;

/// The main error type for effrate operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EffRateError {
    /// Error in date parsing or an invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// An amount or value is NaN or infinite.
    #[error("Non-finite {field}: {value}")]
    NonFiniteInput {
        /// Which input carried the value.
        field: String,
        /// The offending value.
        value: f64,
    },

    /// An amount is finite but not acceptable (e.g. negative magnitude).
    #[error("Invalid amount {value}: {reason}")]
    InvalidAmount {
        /// The rejected amount.
        value: f64,
        /// Reason for invalidity.
        reason: String,
    },

    /// A snapshot could not be saved.
    #[error("Snapshot rejected: {reason}")]
    SnapshotRejected {
        /// User-facing reason.
        reason: String,
    },

    /// A snapshot index does not exist.
    #[error("Snapshot {index} not found (history has {len} entries)")]
    SnapshotNotFound {
        /// Requested index.
        index: usize,
        /// Current history length.
        len: usize,
    },

    /// A scenario file declares a version this library cannot read.
    #[error("Unsupported scenario version {found}, expected {expected}")]
    UnsupportedVersion {
        /// Version found in the file.
        found: u32,
        /// Version this library reads and writes.
        expected: u32,
    },

    /// Scenario content is structurally invalid.
    #[error("Invalid scenario: {reason}")]
    InvalidScenario {
        /// Description of the problem.
        reason: String,
    },

    /// Calculation parameters are inconsistent.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {reason}")]
    Serialization {
        /// Underlying serde error message.
        reason: String,
    },
}

impl EffRateError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates a non-finite input error.
    #[must_use]
    pub fn non_finite(field: impl Into<String>, value: f64) -> Self {
        Self::NonFiniteInput {
            field: field.into(),
            value,
        }
    }

    /// Creates an invalid amount error.
    #[must_use]
    pub fn invalid_amount(value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidAmount {
            value,
            reason: reason.into(),
        }
    }

    /// Creates a snapshot rejection error.
    #[must_use]
    pub fn snapshot_rejected(reason: impl Into<String>) -> Self {
        Self::SnapshotRejected {
            reason: reason.into(),
        }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Creates an invalid scenario error.
    #[must_use]
    pub fn invalid_scenario(reason: impl Into<String>) -> Self {
        Self::InvalidScenario {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for EffRateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}

/// Fails with [`EffRateError::NonFiniteInput`] unless `value` is finite.
pub fn ensure_finite(field: &str, value: f64) -> EffRateResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EffRateError::non_finite(field, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EffRateError::invalid_date("2024-02-30 is not a valid date");
        assert!(err.to_string().contains("Invalid date"));
    }

    #[test]
    fn test_non_finite_display() {
        let err = EffRateError::non_finite("amount", f64::NAN);
        assert_eq!(err.to_string(), "Non-finite amount: NaN");
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("value", 12.5), Ok(12.5));
        assert!(matches!(
            ensure_finite("value", f64::INFINITY),
            Err(EffRateError::NonFiniteInput { .. })
        ));
    }
}
