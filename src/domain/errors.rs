// ============================================================================
// Money Errors
// Failure categories for money construction, arithmetic and allocation
// ============================================================================

use crate::numeric::NumericError;
use thiserror::Error;

/// Errors raised by money factories and operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Currency code is not registered with the lookup in use
    #[error("unknown currency: {0}")]
    UnknownCurrency(String),

    /// Text did not match the expected pattern
    #[error("failed to parse money at position {position}: {detail}")]
    ParseFailure { detail: String, position: usize },

    /// Binary operation between two different currencies
    #[error("currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: String, right: String },

    /// Ratio list or target count cannot be allocated
    #[error("invalid allocation: {0}")]
    InvalidAllocation(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("invalid scale {scale}: must be between 0 and {max}")]
    InvalidScale { scale: u32, max: u32 },

    /// Numeric source value is unusable (NaN, malformed text, ...)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Display pattern is malformed
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

/// Result type alias for money operations
pub type MoneyResult<T> = Result<T, MoneyError>;

impl From<NumericError> for MoneyError {
    fn from(err: NumericError) -> Self {
        match err {
            NumericError::DivisionByZero => MoneyError::DivisionByZero,
            NumericError::InvalidScale { scale, max } => MoneyError::InvalidScale { scale, max },
            NumericError::InvalidInput(detail) => MoneyError::InvalidInput(detail),
            // Money arithmetic aligns scales before delegating, so these only
            // surface from conversions at the API boundary.
            other @ (NumericError::ScaleMismatch { .. } | NumericError::Overflow) => {
                MoneyError::InvalidInput(other.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MoneyError::CurrencyMismatch {
            left: "AUD".to_string(),
            right: "USD".to_string(),
        };
        assert_eq!(err.to_string(), "currency mismatch: AUD vs USD");

        let err = MoneyError::ParseFailure {
            detail: "expected digit".to_string(),
            position: 3,
        };
        assert_eq!(
            err.to_string(),
            "failed to parse money at position 3: expected digit"
        );
    }

    #[test]
    fn test_from_numeric_error() {
        assert_eq!(
            MoneyError::from(NumericError::DivisionByZero),
            MoneyError::DivisionByZero
        );
        assert_eq!(
            MoneyError::from(NumericError::InvalidScale { scale: 70, max: 64 }),
            MoneyError::InvalidScale { scale: 70, max: 64 }
        );
        assert!(matches!(
            MoneyError::from(NumericError::Overflow),
            MoneyError::InvalidInput(_)
        ));
    }
}
