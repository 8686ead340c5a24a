// ============================================================================
// Exchange Rate Interface
// Converts money from one currency into another
// ============================================================================

use crate::domain::{Money, MoneyResult};

/// Exchange-rate service; `Money::exchange_to` passes straight through to it.
/// Implementations: ExchangeRate (a fixed rate between two currencies).
pub trait ExchangeRateSource: Send + Sync {
    /// Produce the equivalent amount in the target currency
    fn apply_rate(&self, money: &Money) -> MoneyResult<Money>;
}
