// ============================================================================
// Allocation Algorithm
// Splits an amount into ratio-weighted parts without losing minor units
// ============================================================================

use super::errors::{MoneyError, MoneyResult};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};
use smallvec::SmallVec;

/// Split `total` minor units proportionally to `ratios`.
///
/// Each share starts as `total × ratio / sum`, truncated toward zero. The
/// minor units lost to truncation are then handed out one at a time to the
/// shares with the largest truncated fraction; ties go to the earlier ratio.
///
/// # Example
/// ```text
/// total = 100, ratios = [1, 1, 1]
///   truncated shares: 33, 33, 33   (leftover 1)
///   fractions:        1/3 each     (tie -> first ratio wins)
///   result:           34, 33, 33
/// ```
///
/// # Errors
/// Returns `InvalidAllocation` if `ratios` is empty, holds a negative ratio,
/// or sums to zero.
pub fn allocate(total: &BigInt, ratios: &[i64]) -> MoneyResult<Vec<BigInt>> {
    if ratios.is_empty() {
        return Err(MoneyError::InvalidAllocation(
            "ratios must not be empty".to_string(),
        ));
    }
    if let Some((index, ratio)) = ratios.iter().enumerate().find(|(_, r)| **r < 0) {
        return Err(MoneyError::InvalidAllocation(format!(
            "ratio {ratio} at index {index} is negative"
        )));
    }

    let ratio_sum: BigInt = ratios.iter().map(|&r| BigInt::from(r)).sum();
    if ratio_sum.is_zero() {
        return Err(MoneyError::InvalidAllocation(
            "ratios must sum to more than zero".to_string(),
        ));
    }

    let mut shares = Vec::with_capacity(ratios.len());
    let mut fractions = Vec::with_capacity(ratios.len());
    let mut allocated = BigInt::zero();

    for &ratio in ratios {
        // (total * ratio) / ratio_sum, truncated toward zero
        let (share, remainder) = (total * ratio).div_rem(&ratio_sum);
        allocated += &share;
        shares.push(share);
        fractions.push(remainder.abs());
    }

    // |leftover| < ratios.len(), since every truncation loses less than one unit
    let leftover = total - &allocated;
    let steps = leftover.abs().to_usize().unwrap_or(0);
    let unit = leftover.signum();

    // Stable sort keeps original order among equal fractions
    let mut order: SmallVec<[usize; 16]> = (0..ratios.len()).collect();
    order.sort_by(|&a, &b| fractions[b].cmp(&fractions[a]));

    for &index in order.iter().take(steps) {
        shares[index] += &unit;
    }

    tracing::trace!(%total, ?ratios, leftover = steps, "allocated minor units");

    Ok(shares)
}

/// Split `total` into `targets` parts as evenly as possible.
///
/// # Errors
/// Returns `InvalidAllocation` if `targets` is zero.
pub fn allocate_evenly(total: &BigInt, targets: usize) -> MoneyResult<Vec<BigInt>> {
    if targets < 1 {
        return Err(MoneyError::InvalidAllocation(
            "cannot allocate to fewer than one target".to_string(),
        ));
    }
    allocate(total, &vec![1; targets])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn big(v: i64) -> BigInt {
        BigInt::from(v)
    }

    fn shares(total: i64, ratios: &[i64]) -> Vec<i64> {
        allocate(&big(total), ratios)
            .unwrap()
            .iter()
            .map(|s| s.to_i64().unwrap())
            .collect()
    }

    #[test]
    fn test_even_split_remainder_goes_first() {
        assert_eq!(shares(100, &[1, 1, 1]), vec![34, 33, 33]);
        assert_eq!(shares(-100, &[1, 1, 1]), vec![-34, -33, -33]);
    }

    #[test]
    fn test_largest_fraction_wins() {
        // 10 * 3/7 = 4.28, 10 * 4/7 = 5.71 -> the 0.71 share takes the unit
        assert_eq!(shares(10, &[3, 4]), vec![4, 6]);
        // 5 * [1, 2] / 3 = 1.66, 3.33 -> first share has the larger fraction
        assert_eq!(shares(5, &[1, 2]), vec![2, 3]);
    }

    #[test]
    fn test_weighted_split() {
        assert_eq!(shares(5, &[3, 7]), vec![2, 3]);
        assert_eq!(shares(1000, &[70, 20, 10]), vec![700, 200, 100]);
    }

    #[test]
    fn test_zero_ratios_get_nothing() {
        assert_eq!(shares(100, &[0, 1, 0, 1]), vec![0, 50, 0, 50]);
        assert_eq!(shares(7, &[0, 3]), vec![0, 7]);
    }

    #[test]
    fn test_zero_total() {
        assert_eq!(shares(0, &[1, 2, 3]), vec![0, 0, 0]);
    }

    #[test]
    fn test_invalid_ratios() {
        assert!(matches!(
            allocate(&big(100), &[]),
            Err(MoneyError::InvalidAllocation(_))
        ));
        assert!(matches!(
            allocate(&big(100), &[0, 0]),
            Err(MoneyError::InvalidAllocation(_))
        ));
        assert_eq!(
            allocate(&big(100), &[1, -1, 2]).unwrap_err(),
            MoneyError::InvalidAllocation("ratio -1 at index 1 is negative".to_string())
        );
    }

    #[test]
    fn test_allocate_evenly() {
        let parts = allocate_evenly(&big(10), 4).unwrap();
        assert_eq!(parts, vec![big(3), big(3), big(2), big(2)]);

        assert!(matches!(
            allocate_evenly(&big(10), 0),
            Err(MoneyError::InvalidAllocation(_))
        ));
    }

    #[test]
    fn test_huge_total() {
        let total: BigInt = "123456789012345678901234567890".parse().unwrap();
        let parts = allocate(&total, &[1, 1]).unwrap();
        assert_eq!(parts.iter().sum::<BigInt>(), total);
    }

    proptest! {
        #[test]
        fn prop_parts_sum_to_total(
            total in any::<i64>(),
            ratios in prop::collection::vec(0i64..1_000_000, 1..12),
        ) {
            prop_assume!(ratios.iter().any(|r| *r > 0));
            let total = big(total);
            let parts = allocate(&total, &ratios).unwrap();

            prop_assert_eq!(parts.len(), ratios.len());
            prop_assert_eq!(parts.iter().sum::<BigInt>(), total.clone());
            for part in &parts {
                prop_assert!(part.is_zero() || part.signum() == total.signum());
            }
        }

        #[test]
        fn prop_parts_stay_within_one_unit_of_exact_share(
            total in -1_000_000i64..1_000_000,
            ratios in prop::collection::vec(1i64..100, 1..8),
        ) {
            let sum: i64 = ratios.iter().sum();
            let parts = allocate(&big(total), &ratios).unwrap();
            for (part, ratio) in parts.iter().zip(&ratios) {
                let exact = big(total) * *ratio;
                let scaled = part * sum;
                prop_assert!((scaled - exact).abs() < big(sum));
            }
        }
    }
}
