// ============================================================================
// Exchange Rate
// Fixed conversion factor between two currencies
// ============================================================================

use super::currency::Currency;
use super::errors::{MoneyError, MoneyResult};
use super::money::Money;
use crate::interfaces::{CurrencyLookup, ExchangeRateSource};
use crate::numeric::{check_scale, FixedDecimal};
use std::fmt;
use std::sync::Arc;

/// Converts money from one currency into another at a fixed rate.
///
/// One unit of `from` buys `rate` units of `to`. The converted amount is
/// rounded half away from zero to `to_scale` when set, otherwise to the
/// target currency's scale.
#[derive(Debug, Clone)]
pub struct ExchangeRate {
    from: Arc<Currency>,
    to: Arc<Currency>,
    rate: FixedDecimal,
    to_scale: Option<u32>,
}

impl ExchangeRate {
    pub fn new(from: Arc<Currency>, to: Arc<Currency>, rate: impl Into<FixedDecimal>) -> Self {
        Self {
            from,
            to,
            rate: rate.into(),
            to_scale: None,
        }
    }

    /// Build a rate between two registered currencies.
    pub fn from_codes(
        from: &str,
        to: &str,
        rate: impl Into<FixedDecimal>,
        lookup: &dyn CurrencyLookup,
    ) -> MoneyResult<Self> {
        Ok(Self::new(lookup.resolve(from)?, lookup.resolve(to)?, rate))
    }

    /// Builder method: Round converted amounts to `scale` instead of the
    /// target currency's scale
    pub fn with_to_scale(mut self, scale: u32) -> MoneyResult<Self> {
        check_scale(scale)?;
        self.to_scale = Some(scale);
        Ok(self)
    }

    pub fn from(&self) -> &Arc<Currency> {
        &self.from
    }

    pub fn to(&self) -> &Arc<Currency> {
        &self.to
    }

    pub fn rate(&self) -> &FixedDecimal {
        &self.rate
    }

    pub fn to_scale(&self) -> Option<u32> {
        self.to_scale
    }

    /// The reverse conversion, with the rate computed to `precision` digits.
    ///
    /// # Errors
    /// Returns `DivisionByZero` for a zero rate.
    pub fn inverse(&self, precision: u32) -> MoneyResult<Self> {
        let rate = FixedDecimal::from(1).checked_div(&self.rate, precision)?;
        Ok(Self::new(Arc::clone(&self.to), Arc::clone(&self.from), rate))
    }
}

impl ExchangeRateSource for ExchangeRate {
    fn apply_rate(&self, money: &Money) -> MoneyResult<Money> {
        if money.currency() != &self.from {
            return Err(MoneyError::CurrencyMismatch {
                left: money.currency().identity(),
                right: self.from.identity(),
            });
        }

        let scale = self.to_scale.unwrap_or(self.to.scale());
        let converted = money.amount().checked_mul(&self.rate, scale)?;

        tracing::trace!(
            from = %self.from.identity(),
            to = %self.to.identity(),
            rate = %self.rate,
            "converted money"
        );

        Money::from_fixed_with_scale(converted, &self.to, scale)
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} {}", self.from.code(), self.to.code(), self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CurrencyRegistry;
    use num_bigint::BigInt;
    use rust_decimal_macros::dec;

    fn aud() -> Arc<Currency> {
        Arc::new(Currency::new("AUD", 2).unwrap())
    }

    fn jpy() -> Arc<Currency> {
        Arc::new(Currency::new("JPY", 0).unwrap())
    }

    #[test]
    fn test_converts_and_rounds_to_target_scale() {
        let rate = ExchangeRate::new(aud(), jpy(), dec!(97.555));
        let yen = Money::from_int(1000, &aud()).exchange_to(&rate).unwrap();

        assert_eq!(yen.currency().code(), "JPY");
        assert_eq!(yen.scale(), 0);
        // 10.00 * 97.555 = 975.55
        assert_eq!(yen.minor_units(), &BigInt::from(976));
    }

    #[test]
    fn test_to_scale_override() {
        let rate = ExchangeRate::new(aud(), jpy(), dec!(97.555))
            .with_to_scale(2)
            .unwrap();
        let yen = rate.apply_rate(&Money::from_int(1000, &aud())).unwrap();

        assert_eq!(yen.scale(), 2);
        assert_eq!(yen.minor_units(), &BigInt::from(97_555));
        assert!(ExchangeRate::new(aud(), jpy(), 1).with_to_scale(99).is_err());
    }

    #[test]
    fn test_rejects_wrong_source_currency() {
        let rate = ExchangeRate::new(aud(), jpy(), 97);
        let err = rate.apply_rate(&Money::from_int(100, &jpy())).unwrap_err();
        assert_eq!(
            err,
            MoneyError::CurrencyMismatch {
                left: "JPY/0".to_string(),
                right: "AUD/2".to_string(),
            }
        );
    }

    #[test]
    fn test_inverse() {
        let rate = ExchangeRate::new(aud(), jpy(), 4);
        let back = rate.inverse(6).unwrap();

        assert_eq!(back.from().code(), "JPY");
        assert_eq!(back.to().code(), "AUD");
        assert_eq!(back.rate(), &"0.25".parse::<FixedDecimal>().unwrap());
        assert_eq!(
            ExchangeRate::new(aud(), jpy(), 0).inverse(6).unwrap_err(),
            MoneyError::DivisionByZero
        );
    }

    #[test]
    fn test_from_codes() {
        let registry = CurrencyRegistry::with_common_currencies();
        let rate = ExchangeRate::from_codes("USD", "EUR", dec!(0.92), &registry).unwrap();
        assert_eq!(rate.to_string(), "USD/EUR 0.92");

        assert_eq!(
            ExchangeRate::from_codes("USD", "XYZ", 1, &registry).unwrap_err(),
            MoneyError::UnknownCurrency("XYZ".to_string())
        );
    }
}
