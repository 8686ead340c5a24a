// ============================================================================
// Fixed-Point Decimal
// Arbitrary-precision fixed-point arithmetic with a runtime scale
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::rounding::{div_round_half_away, pow10, rescale_minor_units};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Neg;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest scale a [`FixedDecimal`] may carry.
pub const MAX_SCALE: u32 = 64;

/// Largest scale `rust_decimal::Decimal` can represent.
const DECIMAL_MAX_SCALE: u32 = 28;

/// Fixed-point decimal number with a runtime scale.
///
/// Internally stores `value × 10^scale` as an arbitrary-precision integer,
/// so no arithmetic on it can overflow.
///
/// Every operation that has to drop digits rounds half away from zero
/// (`1.005 → 1.01`, `-1.005 → -1.01` at scale 2).
///
/// # Example
/// ```
/// use fixed_money::numeric::{FixedDecimal, NumericError};
///
/// let price: FixedDecimal = "10.00".parse()?;          // 1000 @ scale 2
/// let rate: FixedDecimal = "1.005".parse()?;           // 1005 @ scale 3
/// let total = price.checked_mul(&rate, 2)?;            // 1005 @ scale 2
/// assert_eq!(total.to_string(), "10.05");
/// # Ok::<(), NumericError>(())
/// ```
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawFixedDecimal"))]
pub struct FixedDecimal {
    minor_units: BigInt,
    scale: u32,
}

/// Unchecked wire form; deserialization goes through `FixedDecimal::new`.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawFixedDecimal {
    minor_units: BigInt,
    scale: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawFixedDecimal> for FixedDecimal {
    type Error = NumericError;

    fn try_from(raw: RawFixedDecimal) -> NumericResult<Self> {
        Self::new(raw.minor_units, raw.scale)
    }
}

/// Fail with `InvalidScale` when `scale` exceeds [`MAX_SCALE`].
#[inline]
pub(crate) fn check_scale(scale: u32) -> NumericResult<()> {
    if scale > MAX_SCALE {
        Err(NumericError::InvalidScale {
            scale,
            max: MAX_SCALE,
        })
    } else {
        Ok(())
    }
}

impl FixedDecimal {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Zero at scale 0.
    pub fn zero() -> Self {
        Self {
            minor_units: BigInt::zero(),
            scale: 0,
        }
    }

    /// Create from raw minor units at the given scale.
    ///
    /// `FixedDecimal::new(12345, 2)` is `123.45`.
    pub fn new(minor_units: impl Into<BigInt>, scale: u32) -> NumericResult<Self> {
        check_scale(scale)?;
        Ok(Self {
            minor_units: minor_units.into(),
            scale,
        })
    }

    /// Create from raw parts whose scale is already known to be valid.
    #[inline]
    pub(crate) fn from_raw_parts(minor_units: BigInt, scale: u32) -> Self {
        Self { minor_units, scale }
    }

    /// Create from a whole number, represented at the given scale.
    ///
    /// `FixedDecimal::from_integer(5, 2)` is `5.00` (500 minor units).
    pub fn from_integer(value: impl Into<BigInt>, scale: u32) -> NumericResult<Self> {
        check_scale(scale)?;
        Ok(Self {
            minor_units: value.into() * pow10(scale),
            scale,
        })
    }

    /// Convert from `rust_decimal::Decimal`, rounding to `scale`.
    pub fn from_decimal(value: Decimal, scale: u32) -> NumericResult<Self> {
        Self::from(value).rescale(scale)
    }

    /// Convert from a binary float, rounding to `scale`.
    ///
    /// The float is read through its shortest round-trip representation,
    /// so `1.005` is treated as exactly `1.005` rather than
    /// `1.00499999999999989...`.
    ///
    /// # Errors
    /// Returns `InvalidInput` for NaN and infinities.
    pub fn from_f64(value: f64, scale: u32) -> NumericResult<Self> {
        if !value.is_finite() {
            return Err(NumericError::InvalidInput(format!(
                "non-finite number {value}"
            )));
        }
        Self::parse_with_scale(&value.to_string(), scale)
    }

    /// Parse decimal text and round it to `scale`.
    ///
    /// The text may carry any number of fractional digits; only the digit
    /// after `scale` decides the rounding, so digits past it are dropped
    /// before the number is built.
    pub fn parse_with_scale(text: &str, scale: u32) -> NumericResult<Self> {
        check_scale(scale)?;
        let parts = DecimalText::split(text)?;

        let kept = parts.frac.len().min(scale as usize + 1);
        let minor_units = parts.minor_units(kept)?;
        // kept <= scale + 1 <= MAX_SCALE + 1
        Ok(Self {
            minor_units: rescale_minor_units(&minor_units, kept as u32, scale),
            scale,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The raw scaled integer (`value × 10^scale`).
    #[inline]
    pub fn minor_units(&self) -> &BigInt {
        &self.minor_units
    }

    /// Number of implied decimal digits.
    #[inline]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Integer part, truncated toward zero.
    pub fn integer_part(&self) -> BigInt {
        &self.minor_units / pow10(self.scale)
    }

    /// Fractional part as a non-negative count of minor units.
    pub fn fractional_part(&self) -> BigInt {
        (&self.minor_units % pow10(self.scale)).abs()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.minor_units.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.minor_units.is_positive()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.minor_units.is_negative()
    }

    /// -1, 0 or 1 according to the sign of the value.
    pub fn signum(&self) -> i32 {
        match self.minor_units.sign() {
            num_bigint::Sign::Minus => -1,
            num_bigint::Sign::NoSign => 0,
            num_bigint::Sign::Plus => 1,
        }
    }

    /// Absolute value at the same scale.
    pub fn abs(&self) -> Self {
        Self {
            minor_units: self.minor_units.abs(),
            scale: self.scale,
        }
    }

    // ========================================================================
    // Scaling
    // ========================================================================

    /// Return the same value at a different scale.
    ///
    /// Growing the scale is exact; shrinking it rounds the dropped digits
    /// half away from zero.
    ///
    /// # Errors
    /// Returns `InvalidScale` if `scale` exceeds [`MAX_SCALE`].
    pub fn rescale(&self, scale: u32) -> NumericResult<Self> {
        check_scale(scale)?;
        Ok(self.rescaled_unchecked(scale))
    }

    pub(crate) fn rescaled_unchecked(&self, scale: u32) -> Self {
        Self {
            minor_units: rescale_minor_units(&self.minor_units, self.scale, scale),
            scale,
        }
    }

    /// Strip trailing fractional zeros (`1.500` becomes `1.5`, zero becomes
    /// `0` at scale 0).
    pub fn normalized(&self) -> Self {
        if self.minor_units.is_zero() {
            return Self::zero();
        }

        let ten = BigInt::from(10u8);
        let mut minor_units = self.minor_units.clone();
        let mut scale = self.scale;
        while scale > 0 {
            let (quotient, remainder) = minor_units.div_rem(&ten);
            if !remainder.is_zero() {
                break;
            }
            minor_units = quotient;
            scale -= 1;
        }

        Self { minor_units, scale }
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Exact addition of two values at the same scale.
    ///
    /// # Errors
    /// Returns `ScaleMismatch` when the scales differ; rescale first.
    pub fn checked_add(&self, rhs: &Self) -> NumericResult<Self> {
        self.ensure_same_scale(rhs)?;
        Ok(Self {
            minor_units: &self.minor_units + &rhs.minor_units,
            scale: self.scale,
        })
    }

    /// Exact subtraction of two values at the same scale.
    ///
    /// # Errors
    /// Returns `ScaleMismatch` when the scales differ; rescale first.
    pub fn checked_sub(&self, rhs: &Self) -> NumericResult<Self> {
        self.ensure_same_scale(rhs)?;
        Ok(Self {
            minor_units: &self.minor_units - &rhs.minor_units,
            scale: self.scale,
        })
    }

    /// Multiply and round the product to `target_scale`.
    ///
    /// The exact product lives at `self.scale + rhs.scale` and is rounded
    /// half away from zero only once, when reduced to `target_scale`.
    pub fn checked_mul(&self, rhs: &Self, target_scale: u32) -> NumericResult<Self> {
        check_scale(target_scale)?;
        let product_scale = self
            .scale
            .checked_add(rhs.scale)
            .ok_or(NumericError::Overflow)?;
        Ok(self.mul_at(rhs, product_scale, target_scale))
    }

    /// Infallible multiply for callers holding scales already checked
    /// against `MAX_SCALE`, whose sum cannot overflow.
    pub(crate) fn mul_rounded(&self, rhs: &Self, target_scale: u32) -> Self {
        self.mul_at(rhs, self.scale.saturating_add(rhs.scale), target_scale)
    }

    fn mul_at(&self, rhs: &Self, product_scale: u32, target_scale: u32) -> Self {
        let product = &self.minor_units * &rhs.minor_units;
        Self {
            minor_units: rescale_minor_units(&product, product_scale, target_scale),
            scale: target_scale,
        }
    }

    /// Multiply by a whole number (exact, scale unchanged).
    pub fn mul_int(&self, rhs: i64) -> Self {
        Self {
            minor_units: &self.minor_units * rhs,
            scale: self.scale,
        }
    }

    /// Divide and round the quotient to `target_scale`.
    ///
    /// The quotient is computed as an exact rational and rounded half away
    /// from zero once, so no intermediate precision is lost.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `rhs` is zero.
    pub fn checked_div(&self, rhs: &Self, target_scale: u32) -> NumericResult<Self> {
        check_scale(target_scale)?;
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }

        // (a / 10^sa) / (b / 10^sb) * 10^t = a * 10^(sb + t) / (b * 10^sa)
        let lift = rhs
            .scale
            .checked_add(target_scale)
            .ok_or(NumericError::Overflow)?;
        let numerator = &self.minor_units * pow10(lift);
        let denominator = &rhs.minor_units * pow10(self.scale);

        Ok(Self {
            minor_units: div_round_half_away(&numerator, &denominator),
            scale: target_scale,
        })
    }

    /// Truncated remainder at the larger of the two scales.
    ///
    /// The sign of the result follows the dividend, as with `%` on integers.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `rhs` is zero.
    pub fn checked_rem(&self, rhs: &Self) -> NumericResult<Self> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }

        let scale = self.scale.max(rhs.scale);
        let lhs = rescale_minor_units(&self.minor_units, self.scale, scale);
        let rhs = rescale_minor_units(&rhs.minor_units, rhs.scale, scale);

        Ok(Self {
            minor_units: lhs % rhs,
            scale,
        })
    }

    fn ensure_same_scale(&self, rhs: &Self) -> NumericResult<()> {
        if self.scale == rhs.scale {
            Ok(())
        } else {
            Err(NumericError::ScaleMismatch {
                left: self.scale,
                right: rhs.scale,
            })
        }
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Compare by value, lifting both sides to the larger scale.
    fn compare(&self, other: &Self) -> Ordering {
        if self.scale == other.scale {
            return self.minor_units.cmp(&other.minor_units);
        }

        let scale = self.scale.max(other.scale);
        let lhs = rescale_minor_units(&self.minor_units, self.scale, scale);
        let rhs = rescale_minor_units(&other.minor_units, other.scale, scale);
        lhs.cmp(&rhs)
    }

    /// Returns the smaller of two values.
    pub fn min(self, other: Self) -> Self {
        if other < self {
            other
        } else {
            self
        }
    }

    /// Returns the larger of two values.
    pub fn max(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for FixedDecimal {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl PartialEq for FixedDecimal {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for FixedDecimal {}

impl PartialOrd for FixedDecimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FixedDecimal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

// Equal values at different scales must hash alike, so hash the normalized form.
impl Hash for FixedDecimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let normalized = self.normalized();
        normalized.minor_units.hash(state);
        normalized.scale.hash(state);
    }
}

impl Neg for FixedDecimal {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            minor_units: -self.minor_units,
            scale: self.scale,
        }
    }
}

impl Neg for &FixedDecimal {
    type Output = FixedDecimal;

    #[inline]
    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

impl From<i32> for FixedDecimal {
    fn from(value: i32) -> Self {
        Self {
            minor_units: BigInt::from(value),
            scale: 0,
        }
    }
}

impl From<i64> for FixedDecimal {
    fn from(value: i64) -> Self {
        Self {
            minor_units: BigInt::from(value),
            scale: 0,
        }
    }
}

impl From<BigInt> for FixedDecimal {
    fn from(value: BigInt) -> Self {
        Self {
            minor_units: value,
            scale: 0,
        }
    }
}

/// Exact: a `Decimal` is a 96-bit mantissa with a scale of at most 28.
impl From<Decimal> for FixedDecimal {
    fn from(value: Decimal) -> Self {
        Self {
            minor_units: BigInt::from(value.mantissa()),
            scale: value.scale(),
        }
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Debug for FixedDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedDecimal({}, scale={})", self, self.scale)
    }
}

impl fmt::Display for FixedDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let digits = self.minor_units.magnitude().to_string();

        if self.scale == 0 {
            return write!(f, "{sign}{digits}");
        }

        let scale = self.scale as usize;
        let padded = format!("{digits:0>width$}", width = scale + 1);
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{sign}{int_part}.{frac_part}")
    }
}

// ============================================================================
// Conversion to rust_decimal and f64 (for API boundaries)
// ============================================================================

impl FixedDecimal {
    /// Convert to `rust_decimal::Decimal`.
    ///
    /// Scales above 28 are rounded down to 28 first.
    ///
    /// # Errors
    /// Returns `Overflow` if the value does not fit a 96-bit mantissa.
    pub fn to_decimal(&self) -> NumericResult<Decimal> {
        let target = self.rescaled_unchecked(self.scale.min(DECIMAL_MAX_SCALE));
        let mantissa = target
            .minor_units
            .to_i128()
            .ok_or(NumericError::Overflow)?;
        Decimal::try_from_i128_with_scale(mantissa, target.scale)
            .map_err(|_| NumericError::Overflow)
    }

    /// Nearest `f64`. Lossy; intended for ratios and display only.
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }
}

// ============================================================================
// String Parsing
// ============================================================================

impl FromStr for FixedDecimal {
    type Err = NumericError;

    /// Parse plain decimal text exactly; the scale is the number of
    /// fractional digits.
    ///
    /// # Examples
    /// - "123" -> 123 @ scale 0
    /// - "123.450" -> 123450 @ scale 3
    /// - "-0.001" -> -1 @ scale 3
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = DecimalText::split(s)?;

        let scale = u32::try_from(parts.frac.len()).map_err(|_| parts.invalid())?;
        check_scale(scale)?;

        Ok(Self {
            minor_units: parts.minor_units(parts.frac.len())?,
            scale,
        })
    }
}

/// Plain decimal text split into sign, integer digits and fraction digits.
struct DecimalText<'a> {
    text: &'a str,
    negative: bool,
    int: &'a str,
    frac: &'a str,
}

impl<'a> DecimalText<'a> {
    fn split(text: &'a str) -> NumericResult<Self> {
        let text = text.trim();
        let (negative, body) = if let Some(rest) = text.strip_prefix('-') {
            (true, rest)
        } else if let Some(rest) = text.strip_prefix('+') {
            (false, rest)
        } else {
            (false, text)
        };

        let (int, frac) = body.split_once('.').unwrap_or((body, ""));
        let parts = Self {
            text,
            negative,
            int,
            frac,
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (int.is_empty() && frac.is_empty()) || !all_digits(int) || !all_digits(frac) {
            return Err(parts.invalid());
        }
        Ok(parts)
    }

    /// Signed minor units keeping the first `frac_digits` fraction digits.
    fn minor_units(&self, frac_digits: usize) -> NumericResult<BigInt> {
        let digits = format!("{}{}", self.int, &self.frac[..frac_digits]);
        let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(|| self.invalid())?;
        Ok(if self.negative { -magnitude } else { magnitude })
    }

    fn invalid(&self) -> NumericError {
        NumericError::InvalidInput(format!("not a decimal number: {:?}", self.text))
    }
}

// ============================================================================
// Tests
// ============================================================================
