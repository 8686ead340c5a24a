// ============================================================================
// Currency Descriptor
// Immutable currency identity plus formatting metadata
// ============================================================================

use super::errors::{MoneyError, MoneyResult};
use crate::codec::CompiledPattern;
use crate::numeric::check_scale;
use std::fmt;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Symbol used when a currency is created without one.
pub const DEFAULT_SYMBOL: &str = "$";

/// A currency: a code, the number of minor-unit digits, and how amounts in
/// it are displayed.
///
/// Two currencies are the same currency when their code and scale match;
/// symbol, name and pattern are presentation only.
///
/// # Example
/// ```
/// use fixed_money::domain::{Currency, MoneyError};
///
/// let aud = Currency::new("AUD", 2)?
///     .with_symbol("$")
///     .with_name("Australian Dollar");
/// assert_eq!(aud.identity(), "AUD/2");
/// # Ok::<(), MoneyError>(())
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CurrencyDefinition"))]
pub struct Currency {
    /// Unique identifier (e.g., "AUD", "BTC")
    code: String,

    /// Number of minor-unit digits (2 for cents, 0 for JPY, 8 for satoshi)
    scale: u32,

    /// Display symbol substituted for `S` in patterns
    symbol: String,

    /// Display pattern (e.g., "S0.00", "CCC #,##0.00")
    pattern: String,

    /// Human readable name
    name: String,

    /// Swap the roles of '.' and ',' in patterns and text (e.g., "1.234,56")
    invert_separators: bool,
}

/// Wire form of a currency. Only `code` and `scale` are required; the
/// rest fall back to the `Currency::new` defaults.
#[cfg(feature = "serde")]
#[derive(Debug, Deserialize)]
pub(crate) struct CurrencyDefinition {
    code: String,
    scale: u32,
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    pattern: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    invert_separators: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<CurrencyDefinition> for Currency {
    type Error = MoneyError;

    /// Build and validate; deserialized currencies obey the same limits
    /// as constructed ones.
    fn try_from(definition: CurrencyDefinition) -> MoneyResult<Self> {
        let mut currency = Currency::new(definition.code, definition.scale)?
            .with_invert_separators(definition.invert_separators);
        if let Some(symbol) = definition.symbol {
            currency = currency.with_symbol(symbol);
        }
        if let Some(pattern) = definition.pattern {
            currency = currency.with_pattern(pattern);
        }
        if let Some(name) = definition.name {
            currency = currency.with_name(name);
        }
        currency.validate()?;
        Ok(currency)
    }
}

/// `S0` for scale 0, otherwise `S0.` followed by `scale` zeros.
pub fn default_pattern(scale: u32) -> String {
    if scale == 0 {
        "S0".to_string()
    } else {
        format!("S0.{}", "0".repeat(scale as usize))
    }
}

impl Currency {
    /// Create a currency with the default symbol and pattern.
    ///
    /// # Errors
    /// Returns `InvalidScale` if `scale` exceeds the supported maximum.
    pub fn new(code: impl Into<String>, scale: u32) -> MoneyResult<Self> {
        check_scale(scale)?;
        let code = code.into();
        Ok(Self {
            name: code.clone(),
            code,
            scale,
            symbol: DEFAULT_SYMBOL.to_string(),
            pattern: default_pattern(scale),
            invert_separators: false,
        })
    }

    /// Builder method: Set the display symbol
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Builder method: Set the default display pattern
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Builder method: Set the human readable name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder method: Use ',' as the decimal separator and '.' for grouping
    pub fn with_invert_separators(mut self, invert: bool) -> Self {
        self.invert_separators = invert;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> MoneyResult<()> {
        if self.code.trim().is_empty() {
            return Err(MoneyError::InvalidInput(
                "currency code cannot be empty".to_string(),
            ));
        }

        check_scale(self.scale)?;
        CompiledPattern::compile(&self.pattern, self.invert_separators)?;

        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn invert_separators(&self) -> bool {
        self.invert_separators
    }

    /// Code and scale, the part of a currency that takes part in equality.
    /// Used in diagnostics such as currency-mismatch errors.
    pub fn identity(&self) -> String {
        format!("{}/{}", self.code, self.scale)
    }
}

impl PartialEq for Currency {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.scale == other.scale
    }
}

impl Eq for Currency {}

impl Hash for Currency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
        self.scale.hash(state);
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let aud = Currency::new("AUD", 2).unwrap();
        assert_eq!(aud.code(), "AUD");
        assert_eq!(aud.scale(), 2);
        assert_eq!(aud.symbol(), "$");
        assert_eq!(aud.pattern(), "S0.00");
        assert_eq!(aud.name(), "AUD");
        assert!(!aud.invert_separators());
        assert!(aud.validate().is_ok());
    }

    #[test]
    fn test_default_pattern() {
        assert_eq!(default_pattern(0), "S0");
        assert_eq!(default_pattern(3), "S0.000");
    }

    #[test]
    fn test_builder_methods() {
        let eur = Currency::new("EUR", 2)
            .unwrap()
            .with_symbol("€")
            .with_name("Euro")
            .with_pattern("S0,00")
            .with_invert_separators(true);

        assert_eq!(eur.symbol(), "€");
        assert_eq!(eur.name(), "Euro");
        assert!(eur.invert_separators());
        assert!(eur.validate().is_ok());
    }

    #[test]
    fn test_invalid_scale() {
        assert!(matches!(
            Currency::new("XXX", 1000),
            Err(MoneyError::InvalidScale { scale: 1000, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_config() {
        let empty = Currency::new("  ", 2).unwrap();
        assert!(matches!(empty.validate(), Err(MoneyError::InvalidInput(_))));

        let no_digits = Currency::new("AUD", 2).unwrap().with_pattern("S");
        assert!(matches!(
            no_digits.validate(),
            Err(MoneyError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_equality_by_code_and_scale() {
        let a = Currency::new("AUD", 2).unwrap().with_symbol("A$");
        let b = Currency::new("AUD", 2).unwrap();
        let c = Currency::new("AUD", 4).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.identity(), "AUD/2");
        assert_eq!(a.to_string(), "AUD");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let eur = Currency::new("EUR", 2)
            .unwrap()
            .with_symbol("€")
            .with_pattern("S#.##0,00")
            .with_invert_separators(true);
        let json = serde_json::to_string(&eur).unwrap();
        let back: Currency = serde_json::from_str(&json).unwrap();

        assert_eq!(back, eur);
        assert_eq!(back.symbol(), "€");
        assert!(back.invert_separators());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_validates() {
        let minimal: Currency = serde_json::from_str(r#"{"code":"JPY","scale":0}"#).unwrap();
        assert_eq!(minimal.pattern(), "S0");

        for bad in [
            r#"{"code":"AUD","scale":4000000000}"#,
            r#"{"code":"AUD","scale":2,"pattern":"no digits"}"#,
            r#"{"code":" ","scale":2}"#,
        ] {
            assert!(serde_json::from_str::<Currency>(bad).is_err(), "{bad} accepted");
        }
    }
}
