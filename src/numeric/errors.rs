// ============================================================================
// Numeric Errors
// Error types for fixed-point arithmetic operations
// ============================================================================

use thiserror::Error;

/// Errors that can occur during fixed-point arithmetic operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum NumericError {
    /// Attempted division (or remainder) by zero
    #[error("division by zero")]
    DivisionByZero,

    /// Requested scale is outside the supported range
    #[error("invalid scale {scale}: must be between 0 and {max}")]
    InvalidScale { scale: u32, max: u32 },

    /// Operands of an exact operation carry different scales
    #[error("scale mismatch between operands: {left} vs {right}")]
    ScaleMismatch { left: u32, right: u32 },

    /// Input string or value is invalid
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Value does not fit the requested target representation
    #[error("arithmetic overflow: value does not fit the target type")]
    Overflow,
}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(NumericError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            NumericError::InvalidScale { scale: 99, max: 64 }.to_string(),
            "invalid scale 99: must be between 0 and 64"
        );
        assert_eq!(
            NumericError::ScaleMismatch { left: 2, right: 4 }.to_string(),
            "scale mismatch between operands: 2 vs 4"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(NumericError::Overflow, NumericError::Overflow);
        assert_ne!(NumericError::Overflow, NumericError::DivisionByZero);
    }
}
