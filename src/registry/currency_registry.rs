// ============================================================================
// Currency Registry
// Thread-safe code -> currency table backing the code-based factories
// ============================================================================

use super::common::common_currencies;
use crate::domain::{Currency, MoneyResult};
use crate::interfaces::CurrencyLookup;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

#[cfg(feature = "serde")]
use crate::domain::currency::CurrencyDefinition;
#[cfg(feature = "serde")]
use crate::domain::MoneyError;

/// Default `CurrencyLookup` implementation.
///
/// Reads take a shared lock; registration takes the write lock briefly.
/// Share it behind an `Arc` across threads.
///
/// # Example
/// ```
/// use fixed_money::prelude::*;
///
/// let registry = CurrencyRegistry::with_common_currencies();
/// registry.register(Currency::new("XAU", 4)?.with_symbol("oz "))?;
/// let gold = Money::from_int_with_code(12_500, "XAU", &registry)?;
/// assert_eq!(gold.to_string(), "oz 1.2500");
/// # Ok::<(), MoneyError>(())
/// ```
pub struct CurrencyRegistry {
    currencies: RwLock<HashMap<String, Arc<Currency>>>,
}

impl CurrencyRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            currencies: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry seeded with the common currency presets
    pub fn with_common_currencies() -> Self {
        let currencies = common_currencies()
            .map(|c| (c.code().to_string(), Arc::new(c)))
            .collect();
        Self {
            currencies: RwLock::new(currencies),
        }
    }

    /// Validate and register a currency, replacing any currency already
    /// registered under the same code.
    ///
    /// # Errors
    /// Returns the validation error; the registry is left unchanged.
    pub fn register(&self, currency: Currency) -> MoneyResult<Arc<Currency>> {
        currency.validate()?;

        let currency = Arc::new(currency);
        let previous = self
            .currencies
            .write()
            .insert(currency.code().to_string(), Arc::clone(&currency));

        tracing::debug!(
            code = currency.code(),
            scale = currency.scale(),
            replaced = previous.is_some(),
            "registered currency"
        );

        Ok(currency)
    }

    /// Register several currencies, stopping at the first invalid one.
    pub fn register_all(&self, currencies: impl IntoIterator<Item = Currency>) -> MoneyResult<()> {
        for currency in currencies {
            self.register(currency)?;
        }
        Ok(())
    }

    pub fn is_registered(&self, code: &str) -> bool {
        self.currencies.read().contains_key(code)
    }

    /// Registered codes in ascending order
    pub fn codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.currencies.read().keys().cloned().collect();
        codes.sort_unstable();
        codes
    }

    pub fn len(&self) -> usize {
        self.currencies.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.read().is_empty()
    }
}

impl Default for CurrencyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CurrencyLookup for CurrencyRegistry {
    fn find(&self, code: &str) -> Option<Arc<Currency>> {
        self.currencies.read().get(code).cloned()
    }
}

// ============================================================================
// JSON Currency Tables
// ============================================================================

#[cfg(feature = "serde")]
impl CurrencyRegistry {
    /// Register every currency in a JSON array such as
    /// `[{"code": "XAU", "scale": 4, "symbol": "oz "}]`.
    ///
    /// Only `code` and `scale` are required. Returns the number registered.
    pub fn register_from_json(&self, json: &str) -> MoneyResult<usize> {
        let definitions: Vec<CurrencyDefinition> = serde_json::from_str(json)
            .map_err(|e| MoneyError::InvalidInput(format!("invalid currency table: {e}")))?;

        let count = definitions.len();
        for definition in definitions {
            self.register(Currency::try_from(definition)?)?;
        }
        Ok(count)
    }
}
