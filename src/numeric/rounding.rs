// ============================================================================
// Rounding Helpers
// Schoolbook (half away from zero) rounding over arbitrary-precision integers
// ============================================================================

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

/// Compute 10^n as a big integer.
#[inline]
pub(crate) fn pow10(n: u32) -> BigInt {
    BigInt::from(10u8).pow(n)
}

/// Divide `numerator` by `denominator`, rounding half away from zero.
///
/// `denominator` must be non-zero; callers check for zero before dividing.
pub(crate) fn div_round_half_away(numerator: &BigInt, denominator: &BigInt) -> BigInt {
    let (quotient, remainder) = numerator.div_rem(denominator);
    if remainder.is_zero() {
        return quotient;
    }

    // |remainder| / |denominator| >= 1/2 rounds away from zero
    if remainder.abs() * 2 >= denominator.abs() {
        if numerator.is_negative() != denominator.is_negative() {
            quotient - 1
        } else {
            quotient + 1
        }
    } else {
        quotient
    }
}

/// Change the scale of `minor_units` from `from` to `to`, rounding dropped
/// digits half away from zero.
pub(crate) fn rescale_minor_units(minor_units: &BigInt, from: u32, to: u32) -> BigInt {
    if to >= from {
        minor_units * pow10(to - from)
    } else {
        div_round_half_away(minor_units, &pow10(from - to))
    }
}
