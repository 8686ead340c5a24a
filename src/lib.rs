// ============================================================================
// Fixed Money Library
// Currency-safe monetary amounts on arbitrary-precision fixed-point numbers
// ============================================================================

//! # Fixed Money
//!
//! Immutable money values with exact fixed-point arithmetic.
//!
//! ## Features
//!
//! - **Arbitrary precision** amounts stored as a `BigInt` of minor units
//! - **Currency safety**: mixing currencies is an error, never a silent bug
//! - **Deterministic rounding**: half away from zero, everywhere
//! - **Lossless allocation**: splits always sum back to the original amount
//! - **Pluggable collaborators** for currency lookup, text codecs,
//!   serialization and exchange rates
//!
//! ## Example
//!
//! ```rust
//! use fixed_money::prelude::*;
//! use rust_decimal::Decimal;
//!
//! let registry = CurrencyRegistry::with_common_currencies();
//!
//! // $10.00 plus 10% tax
//! let price = Money::from_int_with_code(1000, "AUD", &registry).unwrap();
//! let taxed = price.multiply(Decimal::new(11, 1));
//! assert_eq!(taxed.format().unwrap(), "$11.00");
//!
//! // Three-way split never loses a cent
//! let parts = taxed.allocate_to(3).unwrap();
//! let shown: Vec<String> = parts.iter().map(|p| p.to_string()).collect();
//! assert_eq!(shown, ["$3.67", "$3.67", "$3.66"]);
//!
//! // Currencies never mix
//! let usd = Money::from_int_with_code(1000, "USD", &registry).unwrap();
//! assert!(price.checked_add(&usd).is_err());
//! ```

pub mod codec;
pub mod domain;
pub mod interfaces;
pub mod numeric;
pub mod registry;
pub mod utils;

// Re-exports for convenience
pub mod prelude {
    #[cfg(feature = "serde")]
    pub use crate::codec::JsonCodec;
    pub use crate::codec::PatternCodec;
    pub use crate::domain::{Currency, ExchangeRate, Money, MoneyError, MoneyResult};
    pub use crate::interfaces::{
        CurrencyLookup, ExchangeRateSource, MoneyData, MoneyDecoder, MoneyEncoder,
        PatternDecoder, PatternEncoder,
    };
    pub use crate::numeric::{FixedDecimal, NumericError};
    pub use crate::registry::CurrencyRegistry;
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use num_bigint::BigInt;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    #[test]
    fn test_end_to_end_invoice() {
        let registry = CurrencyRegistry::with_common_currencies();

        let lines = [
            Money::parse_with_code("$19.99", "USD", &registry).unwrap(),
            Money::parse_with_code("$5.01", "USD", &registry).unwrap(),
            Money::from_num_with_code(75.0, "USD", &registry).unwrap(),
        ];

        let subtotal = lines
            .iter()
            .try_fold(Money::zero(&registry.resolve("USD").unwrap()), |acc, line| {
                acc.checked_add(line)
            })
            .unwrap();
        assert_eq!(subtotal.format().unwrap(), "$100.00");

        let total = subtotal.multiply(dec!(1.0825));
        assert_eq!(total.format_with("CCC #,##0.00").unwrap(), "USD 108.25");

        // Split between three payers, 50/30/20
        let shares = total.allocate(&[50, 30, 20]).unwrap();
        let shown: Vec<String> = shares.iter().map(|s| s.to_string()).collect();
        assert_eq!(shown, ["$54.13", "$32.47", "$21.65"]);

        let recombined = shares
            .iter()
            .try_fold(Money::zero(total.currency()), |acc, s| acc.checked_add(s))
            .unwrap();
        assert_eq!(recombined, total);
    }

    #[test]
    fn test_currency_conversion_round_trip() {
        let registry = CurrencyRegistry::with_common_currencies();
        let to_yen = ExchangeRate::from_codes("AUD", "JPY", dec!(97.5), &registry).unwrap();
        let to_aud = to_yen.inverse(10).unwrap();

        let aud = Money::from_int_with_code(10_000, "AUD", &registry).unwrap();
        let yen = aud.exchange_to(&to_yen).unwrap();
        assert_eq!(yen.minor_units(), &BigInt::from(9750));
        assert_eq!(yen.format().unwrap(), "¥9750");

        let back = yen.exchange_to(&to_aud).unwrap();
        assert_eq!(back, aud);

        assert!(matches!(
            aud.exchange_to(&to_aud),
            Err(MoneyError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_euro_text_round_trip() {
        let registry = CurrencyRegistry::with_common_currencies();
        let eur = registry.resolve("EUR").unwrap();

        let money = Money::parse("€1.234.567,89", &eur).unwrap();
        assert_eq!(money.minor_units(), &BigInt::from(123_456_789));
        assert_eq!(money.to_string(), "€1.234.567,89");
        assert_eq!((-money).to_string(), "-€1.234.567,89");
    }

    #[test]
    fn test_custom_currency_and_lookup() {
        let registry = Arc::new(CurrencyRegistry::new());
        registry
            .register(
                Currency::new("XAU", 4)
                    .unwrap()
                    .with_symbol("oz ")
                    .with_pattern("S0.0000"),
            )
            .unwrap();

        let lookup: Arc<dyn CurrencyLookup> = registry.clone();
        let gold = Money::from_int_with_code(12_500, "XAU", lookup.as_ref()).unwrap();
        assert_eq!(gold.to_string(), "oz 1.2500");
        assert!(Money::try_parse("oz 2.5", "XAU", lookup.as_ref()).is_some());
        assert!(Money::try_parse("oz 2.5", "XAG", lookup.as_ref()).is_none());
    }

    #[test]
    fn test_big_amounts_stay_exact() {
        let registry = CurrencyRegistry::with_common_currencies();
        let minor: BigInt = "123456789012345678901234567890".parse().unwrap();
        let eth = Money::from_big_int(minor.clone(), &registry.resolve("ETH").unwrap());

        let doubled = eth.checked_add(&eth).unwrap();
        assert_eq!(doubled.minor_units(), &(minor * 2));
        assert_eq!(doubled.divide(2).unwrap(), eth);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_round_trip_through_registry() {
        let registry = Arc::new(CurrencyRegistry::with_common_currencies());
        let codec = JsonCodec::new(registry.clone());

        let money = Money::from_int_with_code(-4_250, "GBP", registry.as_ref()).unwrap();
        let value = money.encoded_by(&codec);
        assert_eq!(Money::decoded_by(&value, &codec).unwrap(), money);
    }
}
