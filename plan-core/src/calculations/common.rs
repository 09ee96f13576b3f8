//! Common arithmetic helpers shared by every calculator.
//!
//! This module provides the rounding convention used for stored currency
//! values and a couple of guarded ratio helpers so that no calculator ever
//! divides by zero. Sums and products that would leave the `Decimal` range
//! clamp to `Decimal::MAX` or `Decimal::MIN`.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use plan_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `part / whole`, or zero when `whole` is zero.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use plan_core::calculations::common::ratio;
///
/// assert_eq!(ratio(dec!(400), dec!(1000)), dec!(0.4));
/// assert_eq!(ratio(dec!(400), Decimal::ZERO), Decimal::ZERO);
/// ```
pub fn ratio(
    part: Decimal,
    whole: Decimal,
) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(whole).unwrap_or(if part.is_sign_negative() == whole.is_sign_negative() {
        Decimal::MAX
    } else {
        Decimal::MIN
    })
}

/// Returns `part / whole * 100`, or zero when `whole` is zero.
pub fn percent_of(
    part: Decimal,
    whole: Decimal,
) -> Decimal {
    ratio(part, whole).saturating_mul(Decimal::ONE_HUNDRED)
}

/// Turns a percentage point value (e.g. `10` for 10%) into a growth factor
/// (`1.10`).
pub fn growth_factor(percent: Decimal) -> Decimal {
    Decimal::ONE.saturating_add(percent / Decimal::ONE_HUNDRED)
}

/// Adds up `values`, clamping instead of overflowing.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use plan_core::calculations::common::saturating_sum;
///
/// assert_eq!(saturating_sum([dec!(1.5), dec!(2)]), dec!(3.5));
/// assert_eq!(saturating_sum([Decimal::MAX, dec!(1)]), Decimal::MAX);
/// ```
pub fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        let result = round_half_up(dec!(123.454));

        assert_eq!(result, dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        let result = round_half_up(dec!(123.455));

        assert_eq!(result, dec!(123.46));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        let result = round_half_up(dec!(-123.455));

        assert_eq!(result, dec!(-123.46));
    }

    #[test]
    fn round_half_up_handles_large_values() {
        let result = round_half_up(dec!(999999.999));

        assert_eq!(result, dec!(1000000.00));
    }

    // =========================================================================
    // ratio tests
    // =========================================================================

    #[test]
    fn ratio_divides_part_by_whole() {
        assert_eq!(ratio(dec!(200), dec!(1000)), dec!(0.2));
    }

    #[test]
    fn ratio_is_zero_for_zero_whole() {
        assert_eq!(ratio(dec!(200), dec!(0)), Decimal::ZERO);
    }

    #[test]
    fn ratio_clamps_when_quotient_leaves_range() {
        assert_eq!(ratio(Decimal::MAX, dec!(0.01)), Decimal::MAX);
        assert_eq!(ratio(Decimal::MIN, dec!(0.01)), Decimal::MIN);
        assert_eq!(percent_of(Decimal::MAX, dec!(2)), Decimal::MAX);
    }

    #[test]
    fn percent_of_scales_to_hundred() {
        assert_eq!(percent_of(dec!(25), dec!(200)), dec!(12.5));
    }

    #[test]
    fn growth_factor_adds_percent_to_one() {
        assert_eq!(growth_factor(dec!(10)), dec!(1.10));
        assert_eq!(growth_factor(Decimal::ZERO), Decimal::ONE);
    }

    #[test]
    fn saturating_sum_clamps_at_both_ends() {
        assert_eq!(saturating_sum(Vec::new()), Decimal::ZERO);
        assert_eq!(saturating_sum([Decimal::MAX, Decimal::MAX]), Decimal::MAX);
        assert_eq!(saturating_sum([Decimal::MIN, dec!(-1)]), Decimal::MIN);
    }
}
