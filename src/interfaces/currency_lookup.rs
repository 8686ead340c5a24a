// ============================================================================
// Currency Lookup Interface
// Resolves currency codes to shared currency descriptors
// ============================================================================

use crate::domain::{Currency, MoneyError, MoneyResult};
use std::sync::Arc;

/// Lookup service consulted by the code-based money factories.
/// Implementations: CurrencyRegistry, or any external currency table.
pub trait CurrencyLookup: Send + Sync {
    /// Find the currency registered under `code`
    fn find(&self, code: &str) -> Option<Arc<Currency>>;

    /// Like `find`, but an unregistered code is an `UnknownCurrency` error
    fn resolve(&self, code: &str) -> MoneyResult<Arc<Currency>> {
        self.find(code).ok_or_else(|| {
            tracing::debug!(code, "currency code did not resolve");
            MoneyError::UnknownCurrency(code.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SingleCurrency(Arc<Currency>);

    impl CurrencyLookup for SingleCurrency {
        fn find(&self, code: &str) -> Option<Arc<Currency>> {
            (self.0.code() == code).then(|| Arc::clone(&self.0))
        }
    }

    #[test]
    fn test_resolve_default_method() {
        let lookup = SingleCurrency(Arc::new(Currency::new("AUD", 2).unwrap()));

        assert_eq!(lookup.resolve("AUD").unwrap().code(), "AUD");
        assert_eq!(
            lookup.resolve("XYZ").unwrap_err(),
            MoneyError::UnknownCurrency("XYZ".to_string())
        );
    }
}
