// ============================================================================
// Money Domain Model
// Immutable amount bound to a currency, with currency-safe arithmetic
// ============================================================================

use super::allocation::{allocate, allocate_evenly};
use super::currency::Currency;
use super::errors::{MoneyError, MoneyResult};
use crate::codec::PatternCodec;
use crate::interfaces::{
    CurrencyLookup, ExchangeRateSource, MoneyData, MoneyDecoder, MoneyEncoder, PatternDecoder,
    PatternEncoder,
};
use crate::numeric::{check_scale, FixedDecimal};
use num_bigint::BigInt;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Neg;
use std::sync::Arc;

/// Scale used when dividing one amount by another to produce a ratio.
const RATIO_SCALE: u32 = 18;

/// An amount of money in a specific currency.
///
/// Values are created only through the named factories, which all settle on
/// the currency's scale unless a scale override is given. Every binary
/// operation checks that both sides are in the same currency before doing
/// any arithmetic.
///
/// There is no `PartialOrd`; ordering goes through [`Money::checked_cmp`]
/// and the `is_*` comparisons, which fail on a currency mismatch.
///
/// # Example
/// ```
/// use fixed_money::prelude::*;
/// use rust_decimal::Decimal;
/// use std::sync::Arc;
///
/// let aud = Arc::new(Currency::new("AUD", 2)?);
/// let price = Money::from_int(1000, &aud);              // $10.00
/// let taxed = price.multiply(Decimal::new(11, 1));      // $11.00
/// let split = taxed.allocate_to(3)?;                    // $3.67, $3.67, $3.66
/// assert_eq!(split[2].to_string(), "$3.66");
/// # Ok::<(), MoneyError>(())
/// ```
#[derive(Clone)]
pub struct Money {
    amount: FixedDecimal,
    currency: Arc<Currency>,
}

impl Money {
    fn bind(amount: FixedDecimal, currency: &Arc<Currency>) -> Self {
        Self {
            amount,
            currency: Arc::clone(currency),
        }
    }

    // ========================================================================
    // Factories
    // ========================================================================

    /// Zero in the given currency.
    pub fn zero(currency: &Arc<Currency>) -> Self {
        Self::from_big_int(BigInt::from(0), currency)
    }

    /// Create from a count of minor units (cents for AUD, satoshi for BTC).
    ///
    /// `Money::from_int(1050, &aud)` is `$10.50`.
    pub fn from_int(minor_units: i64, currency: &Arc<Currency>) -> Self {
        Self::from_big_int(BigInt::from(minor_units), currency)
    }

    /// Create from an arbitrary-precision count of minor units.
    pub fn from_big_int(minor_units: BigInt, currency: &Arc<Currency>) -> Self {
        let amount = FixedDecimal::from_raw_parts(minor_units, currency.scale());
        Self::bind(amount, currency)
    }

    /// Create from minor units at an explicit scale instead of the
    /// currency's default.
    pub fn from_int_with_scale(
        minor_units: impl Into<BigInt>,
        currency: &Arc<Currency>,
        scale: u32,
    ) -> MoneyResult<Self> {
        let amount = FixedDecimal::new(minor_units, scale)?;
        Ok(Self::bind(amount, currency))
    }

    /// Create from minor units, resolving the currency by code.
    pub fn from_int_with_code(
        minor_units: impl Into<BigInt>,
        code: &str,
        lookup: &dyn CurrencyLookup,
    ) -> MoneyResult<Self> {
        let currency = lookup.resolve(code)?;
        Ok(Self::from_big_int(minor_units.into(), &currency))
    }

    /// Create from a number in major units, rounded to the currency's scale.
    ///
    /// `Money::from_num(10.5, &aud)` is `$10.50`.
    pub fn from_num(value: f64, currency: &Arc<Currency>) -> MoneyResult<Self> {
        Self::from_num_with_scale(value, currency, currency.scale())
    }

    pub fn from_num_with_scale(
        value: f64,
        currency: &Arc<Currency>,
        scale: u32,
    ) -> MoneyResult<Self> {
        let amount = FixedDecimal::from_f64(value, scale)?;
        Ok(Self::bind(amount, currency))
    }

    pub fn from_num_with_code(
        value: f64,
        code: &str,
        lookup: &dyn CurrencyLookup,
    ) -> MoneyResult<Self> {
        let currency = lookup.resolve(code)?;
        Self::from_num(value, &currency)
    }

    /// Create from a decimal in major units, rounded to the currency's scale.
    pub fn from_decimal(value: Decimal, currency: &Arc<Currency>) -> Self {
        Self::from_fixed(FixedDecimal::from(value), currency)
    }

    /// Create from a fixed-point amount in major units, rounded to the
    /// currency's scale.
    pub fn from_fixed(amount: FixedDecimal, currency: &Arc<Currency>) -> Self {
        let amount = amount.rescaled_unchecked(currency.scale());
        Self::bind(amount, currency)
    }

    pub fn from_fixed_with_scale(
        amount: FixedDecimal,
        currency: &Arc<Currency>,
        scale: u32,
    ) -> MoneyResult<Self> {
        let amount = amount.rescale(scale)?;
        Ok(Self::bind(amount, currency))
    }

    pub fn from_fixed_with_code(
        amount: FixedDecimal,
        code: &str,
        lookup: &dyn CurrencyLookup,
    ) -> MoneyResult<Self> {
        let currency = lookup.resolve(code)?;
        Ok(Self::from_fixed(amount, &currency))
    }

    /// Parse text using the currency's default pattern.
    ///
    /// # Errors
    /// Returns `ParseFailure` when the text does not match the pattern.
    pub fn parse(text: &str, currency: &Arc<Currency>) -> MoneyResult<Self> {
        Self::parse_with_pattern(text, currency, currency.pattern())
    }

    pub fn parse_with_pattern(
        text: &str,
        currency: &Arc<Currency>,
        pattern: &str,
    ) -> MoneyResult<Self> {
        Self::parse_with_decoder(text, currency, pattern, &PatternCodec)
    }

    /// Parse text with a caller-supplied decoder; the decoded amount is
    /// rounded to the currency's scale.
    pub fn parse_with_decoder(
        text: &str,
        currency: &Arc<Currency>,
        pattern: &str,
        decoder: &dyn PatternDecoder,
    ) -> MoneyResult<Self> {
        let data = decoder.decode(text, pattern, currency)?;
        Ok(Self::from_fixed(data.amount, &data.currency))
    }

    /// Parse text in the currency registered under `code`.
    pub fn parse_with_code(
        text: &str,
        code: &str,
        lookup: &dyn CurrencyLookup,
    ) -> MoneyResult<Self> {
        let currency = lookup.resolve(code)?;
        Self::parse(text, &currency)
    }

    /// Like [`Money::parse_with_code`], but an unknown code or unparseable
    /// text yields `None`.
    pub fn try_parse(text: &str, code: &str, lookup: &dyn CurrencyLookup) -> Option<Self> {
        let currency = lookup.find(code)?;
        Self::parse(text, &currency).ok()
    }

    /// Build from any external representation through a decoder hook.
    ///
    /// The decoder supplies the scale; it is kept as decoded.
    pub fn decoded_by<T>(value: &T, decoder: &impl MoneyDecoder<T>) -> MoneyResult<Self> {
        let data = decoder.decode(value)?;
        Ok(Self::bind(data.amount, &data.currency))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn amount(&self) -> &FixedDecimal {
        &self.amount
    }

    pub fn currency(&self) -> &Arc<Currency> {
        &self.currency
    }

    /// The amount as a count of minor units at [`Money::scale`].
    pub fn minor_units(&self) -> &BigInt {
        self.amount.minor_units()
    }

    pub fn scale(&self) -> u32 {
        self.amount.scale()
    }

    /// Whole major units, truncated toward zero.
    pub fn integer_part(&self) -> BigInt {
        self.amount.integer_part()
    }

    /// Minor units after the decimal point, always non-negative.
    pub fn decimal_part(&self) -> BigInt {
        self.amount.fractional_part()
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.amount.is_positive()
    }

    pub fn is_negative(&self) -> bool {
        self.amount.is_negative()
    }

    pub fn signum(&self) -> i32 {
        self.amount.signum()
    }

    pub fn abs(&self) -> Self {
        Self::bind(self.amount.abs(), &self.currency)
    }

    /// Return the same amount at another scale, keeping the currency.
    ///
    /// Shrinking the scale rounds half away from zero.
    pub fn with_scale(&self, scale: u32) -> MoneyResult<Self> {
        check_scale(scale)?;
        Ok(Self::bind(
            self.amount.rescaled_unchecked(scale),
            &self.currency,
        ))
    }

    /// The raw parts handed to codecs.
    pub fn to_data(&self) -> MoneyData {
        MoneyData::new(self.amount.clone(), Arc::clone(&self.currency))
    }

    // ========================================================================
    // Currency Safety
    // ========================================================================

    /// Fail with `CurrencyMismatch` unless `other` is in the same currency.
    fn ensure_same_currency(&self, other: &Self) -> MoneyResult<()> {
        if self.currency == other.currency {
            return Ok(());
        }

        tracing::debug!(
            left = %self.currency.identity(),
            right = %other.currency.identity(),
            "rejected operation across currencies"
        );
        Err(MoneyError::CurrencyMismatch {
            left: self.currency.identity(),
            right: other.currency.identity(),
        })
    }

    /// Both amounts at the larger of their two scales.
    fn aligned_amounts(&self, other: &Self) -> (FixedDecimal, FixedDecimal) {
        let scale = self.scale().max(other.scale());
        (
            self.amount.rescaled_unchecked(scale),
            other.amount.rescaled_unchecked(scale),
        )
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Exact addition.
    ///
    /// # Errors
    /// Returns `CurrencyMismatch` if the currencies differ.
    pub fn checked_add(&self, other: &Self) -> MoneyResult<Self> {
        self.ensure_same_currency(other)?;
        let (lhs, rhs) = self.aligned_amounts(other);
        Ok(Self::bind(lhs.checked_add(&rhs)?, &self.currency))
    }

    /// Exact subtraction.
    ///
    /// # Errors
    /// Returns `CurrencyMismatch` if the currencies differ.
    pub fn checked_sub(&self, other: &Self) -> MoneyResult<Self> {
        self.ensure_same_currency(other)?;
        let (lhs, rhs) = self.aligned_amounts(other);
        Ok(Self::bind(lhs.checked_sub(&rhs)?, &self.currency))
    }

    /// Multiply by an integer or decimal scalar, rounding half away from
    /// zero to the currency's scale.
    ///
    /// A scale override on `self` does not carry over to the product.
    pub fn multiply(&self, scalar: impl Into<FixedDecimal>) -> Self {
        self.multiply_by_exact(&scalar.into())
    }

    pub fn multiply_by_exact(&self, operand: &FixedDecimal) -> Self {
        let amount = self.amount.mul_rounded(operand, self.currency.scale());
        Self::bind(amount, &self.currency)
    }

    /// Divide by an integer or decimal scalar, rounding half away from zero
    /// to the currency's scale.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if the scalar is zero.
    pub fn divide(&self, scalar: impl Into<FixedDecimal>) -> MoneyResult<Self> {
        self.divide_by_exact(&scalar.into())
    }

    pub fn divide_by_exact(&self, operand: &FixedDecimal) -> MoneyResult<Self> {
        let amount = self.amount.checked_div(operand, self.currency.scale())?;
        Ok(Self::bind(amount, &self.currency))
    }

    /// Remainder of dividing this amount by `operand`, at the currency's scale.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `operand` is zero.
    pub fn modulo_exact(&self, operand: &FixedDecimal) -> MoneyResult<Self> {
        let remainder = self.amount.checked_rem(operand)?;
        Ok(Self::bind(
            remainder.rescaled_unchecked(self.currency.scale()),
            &self.currency,
        ))
    }

    /// Dimensionless ratio of two amounts in the same currency.
    ///
    /// # Errors
    /// Returns `CurrencyMismatch` if the currencies differ, or
    /// `DivisionByZero` if `other` is zero.
    pub fn divide_by(&self, other: &Self) -> MoneyResult<f64> {
        self.ensure_same_currency(other)?;
        let ratio = self.amount.checked_div(&other.amount, RATIO_SCALE)?;
        Ok(ratio.to_f64())
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Order two amounts in the same currency.
    ///
    /// # Errors
    /// Returns `CurrencyMismatch` if the currencies differ.
    pub fn checked_cmp(&self, other: &Self) -> MoneyResult<Ordering> {
        self.ensure_same_currency(other)?;
        Ok(self.amount.cmp(&other.amount))
    }

    pub fn is_less_than(&self, other: &Self) -> MoneyResult<bool> {
        Ok(self.checked_cmp(other)? == Ordering::Less)
    }

    pub fn is_at_most(&self, other: &Self) -> MoneyResult<bool> {
        Ok(self.checked_cmp(other)? != Ordering::Greater)
    }

    pub fn is_greater_than(&self, other: &Self) -> MoneyResult<bool> {
        Ok(self.checked_cmp(other)? == Ordering::Greater)
    }

    pub fn is_at_least(&self, other: &Self) -> MoneyResult<bool> {
        Ok(self.checked_cmp(other)? != Ordering::Less)
    }

    // ========================================================================
    // Allocation
    // ========================================================================

    /// Split into parts weighted by `ratios`; the parts always sum to `self`.
    ///
    /// # Errors
    /// Returns `InvalidAllocation` if `ratios` is empty, holds a negative
    /// ratio, or sums to zero.
    pub fn allocate(&self, ratios: &[i64]) -> MoneyResult<Vec<Self>> {
        let shares = allocate(self.minor_units(), ratios)?;
        Ok(self.parts_from(shares))
    }

    /// Split into `targets` near-equal parts; the parts always sum to `self`.
    ///
    /// # Errors
    /// Returns `InvalidAllocation` if `targets` is zero.
    pub fn allocate_to(&self, targets: usize) -> MoneyResult<Vec<Self>> {
        let shares = allocate_evenly(self.minor_units(), targets)?;
        Ok(self.parts_from(shares))
    }

    fn parts_from(&self, shares: Vec<BigInt>) -> Vec<Self> {
        shares
            .into_iter()
            .map(|share| {
                Self::bind(
                    FixedDecimal::from_raw_parts(share, self.scale()),
                    &self.currency,
                )
            })
            .collect()
    }

    // ========================================================================
    // Collaborators
    // ========================================================================

    /// Convert into another currency through an exchange-rate service.
    pub fn exchange_to(&self, rate: &dyn ExchangeRateSource) -> MoneyResult<Self> {
        rate.apply_rate(self)
    }

    /// Hand the raw parts to an encoder hook.
    pub fn encoded_by<T>(&self, encoder: &impl MoneyEncoder<T>) -> T {
        encoder.encode(&self.to_data())
    }

    /// Render with the currency's default pattern.
    pub fn format(&self) -> MoneyResult<String> {
        self.format_with(self.currency.pattern())
    }

    /// Render with an explicit pattern, e.g. `"CCC #,##0.00"`.
    pub fn format_with(&self, pattern: &str) -> MoneyResult<String> {
        self.format_with_encoder(pattern, &PatternCodec)
    }

    pub fn format_with_encoder(
        &self,
        pattern: &str,
        encoder: &dyn PatternEncoder,
    ) -> MoneyResult<String> {
        encoder.encode(&self.to_data(), pattern)
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

/// Same currency (code and scale) and numerically equal amounts.
/// Different currencies are simply unequal.
impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.currency == other.currency && self.amount == other.amount
    }
}

impl Eq for Money {}

impl Hash for Money {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.currency.hash(state);
        self.amount.hash(state);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            amount: -self.amount,
            currency: self.currency,
        }
    }
}

impl Neg for &Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

impl fmt::Debug for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Money({} {})", self.amount, self.currency.identity())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format() {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "{} {}", self.amount, self.currency.code()),
        }
    }
}
