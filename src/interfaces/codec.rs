// ============================================================================
// Codec Interfaces
// Contracts for converting money to and from external representations
// ============================================================================

use crate::domain::{Currency, MoneyResult};
use crate::numeric::FixedDecimal;
use std::sync::Arc;

/// The raw parts of a money value as exchanged with codecs.
#[derive(Debug, Clone, PartialEq)]
pub struct MoneyData {
    pub amount: FixedDecimal,
    pub currency: Arc<Currency>,
}

impl MoneyData {
    pub fn new(amount: FixedDecimal, currency: Arc<Currency>) -> Self {
        Self { amount, currency }
    }
}

/// Maps money to an arbitrary external type (JSON value, database row, ...)
pub trait MoneyEncoder<T> {
    fn encode(&self, data: &MoneyData) -> T;
}

/// Maps an arbitrary external type back to money parts
pub trait MoneyDecoder<T> {
    fn decode(&self, value: &T) -> MoneyResult<MoneyData>;
}

/// Decodes human readable text according to a display pattern
pub trait PatternDecoder: Send + Sync {
    /// # Errors
    /// Text that does not match `pattern` fails with `ParseFailure`
    fn decode(&self, text: &str, pattern: &str, currency: &Arc<Currency>)
        -> MoneyResult<MoneyData>;
}

/// Renders money as human readable text according to a display pattern
pub trait PatternEncoder: Send + Sync {
    fn encode(&self, data: &MoneyData, pattern: &str) -> MoneyResult<String>;
}
