//! Rounding primitives.
//!
//! Every amount the engine reports passes through one of these functions.
//! Intermediate values keep full decimal precision until a rule here is
//! applied explicitly.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to the nearest integer with ties away from zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_half_up_0;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_half_up_0(Decimal::from_str("2.5").unwrap()), Decimal::from(3));
/// assert_eq!(round_half_up_0(Decimal::from_str("-2.5").unwrap()), Decimal::from(-3));
/// assert_eq!(round_half_up_0(Decimal::from_str("208.56").unwrap()), Decimal::from(209));
/// ```
pub fn round_half_up_0(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds any fractional part away from zero.
///
/// This is the rounding of the simple formula generation: `0.01` becomes `1`
/// and `-0.01` becomes `-1`.
///
/// ```
/// use payroll_engine::calculation::roundup_0;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(roundup_0(Decimal::from_str("39.105").unwrap()), Decimal::from(40));
/// assert_eq!(roundup_0(Decimal::from(7)), Decimal::from(7));
/// ```
pub fn roundup_0(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::AwayFromZero)
}

/// Floors `value` to a multiple of `step`, toward negative infinity.
///
/// With `step = 10` the last digit is zeroed, with `step = 1000` the last
/// three. Negative values move further from zero: `-546` floors to `-550`.
///
/// ```
/// use payroll_engine::calculation::floor_to_step;
/// use rust_decimal::Decimal;
///
/// assert_eq!(floor_to_step(Decimal::from(106_357), Decimal::from(10)), Decimal::from(106_350));
/// assert_eq!(floor_to_step(Decimal::from(-546), Decimal::from(10)), Decimal::from(-550));
/// assert_eq!(
///     floor_to_step(Decimal::from(2_999_999), Decimal::from(1000)),
///     Decimal::from(2_999_000)
/// );
/// ```
pub fn floor_to_step(value: Decimal, step: Decimal) -> Decimal {
    (value / step).floor() * step
}

/// Truncates `value` to a multiple of `step`, toward zero.
pub fn truncate_to_step(value: Decimal, step: Decimal) -> Decimal {
    (value / step).trunc() * step
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round_half_up_ties_away_from_zero() {
        assert_eq!(round_half_up_0(dec("2.5")), dec("3"));
        assert_eq!(round_half_up_0(dec("-2.5")), dec("-3"));
        assert_eq!(round_half_up_0(dec("0.5")), dec("1"));
        assert_eq!(round_half_up_0(dec("3.5")), dec("4"));
    }

    #[test]
    fn test_round_half_up_below_half() {
        assert_eq!(round_half_up_0(dec("2.4999")), dec("2"));
        assert_eq!(round_half_up_0(dec("-2.4999")), dec("-2"));
    }

    #[test]
    fn test_round_half_up_monthly_pay() {
        assert_eq!(round_half_up_0(dec("30000000") / dec("12")), dec("2500000"));
        assert_eq!(round_half_up_0(dec("35000000") / dec("12")), dec("2916667"));
    }

    #[test]
    fn test_roundup_any_fraction() {
        assert_eq!(roundup_0(dec("208.0001")), dec("209"));
        assert_eq!(roundup_0(dec("-0.01")), dec("-1"));
        assert_eq!(roundup_0(dec("0")), dec("0"));
    }

    #[test]
    fn test_floor_to_step_ten() {
        assert_eq!(floor_to_step(dec("11295"), dec("10")), dec("11290"));
        assert_eq!(floor_to_step(dec("13772.325"), dec("10")), dec("13770"));
        assert_eq!(floor_to_step(dec("-546"), dec("10")), dec("-550"));
        assert_eq!(floor_to_step(dec("-540"), dec("10")), dec("-540"));
    }

    #[test]
    fn test_floor_to_step_thousand() {
        assert_eq!(floor_to_step(dec("2999999"), dec("1000")), dec("2999000"));
        assert_eq!(floor_to_step(dec("3000000"), dec("1000")), dec("3000000"));
    }

    #[test]
    fn test_truncate_to_step_moves_toward_zero() {
        assert_eq!(truncate_to_step(dec("112959"), dec("10")), dec("112950"));
        assert_eq!(truncate_to_step(dec("-546"), dec("10")), dec("-540"));
    }

    fn won() -> impl Strategy<Value = Decimal> {
        (-1_000_000_000_000i64..1_000_000_000_000i64, 0u32..6)
            .prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
    }

    proptest! {
        #[test]
        fn prop_floor_to_step_is_idempotent(
            x in won(),
            step in prop::sample::select(vec![1i64, 10, 100, 1000]),
        ) {
            let step = Decimal::from(step);
            let once = floor_to_step(x, step);
            prop_assert_eq!(floor_to_step(once, step), once);
        }

        #[test]
        fn prop_floor_to_step_never_exceeds_input(x in won()) {
            let step = Decimal::from(10);
            let floored = floor_to_step(x, step);
            prop_assert!(floored <= x);
            prop_assert!(x - floored < step);
        }

        #[test]
        fn prop_round_half_up_is_symmetric(x in won()) {
            prop_assert_eq!(round_half_up_0(-x), -round_half_up_0(x));
        }

        #[test]
        fn prop_roundup_never_moves_toward_zero(x in won()) {
            let rounded = roundup_0(x);
            prop_assert!(rounded.abs() >= x.abs());
            prop_assert!((rounded - x).abs() < Decimal::ONE);
        }
    }
}
