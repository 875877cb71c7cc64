//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic value failures (parsing, ranges).
/// Record-level and run-level failures wrap it in the crates that own them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A part identifier was empty or otherwise unusable.
    #[error("invalid part id: {0}")]
    InvalidPartId(String),

    /// A date or month could not be parsed or normalized.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// A numeric value was outside its allowed range (negative, NaN, ...).
    #[error("out of range: {0}")]
    OutOfRange(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_part_id(msg: impl Into<String>) -> Self {
        Self::InvalidPartId(msg.into())
    }

    pub fn invalid_date(msg: impl Into<String>) -> Self {
        Self::InvalidDate(msg.into())
    }

    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange(msg.into())
    }

    /// Reject NaN/infinite and negative values for a named field.
    pub fn ensure_non_negative(field: &str, value: f64) -> DomainResult<f64> {
        if !value.is_finite() {
            return Err(Self::out_of_range(format!("{field} must be finite (got {value})")));
        }
        if value < 0.0 {
            return Err(Self::out_of_range(format!("{field} cannot be negative (got {value})")));
        }
        Ok(value)
    }
}
