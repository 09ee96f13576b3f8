//! Parsing and display helpers shared by all calculators.
//!
//! Every function here is total: malformed input degrades to zero instead of
//! producing an error, so a form never blocks on what the user typed.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::calculations::common::round_half_up;

/// Normalizes input for decimal parsing: trims whitespace and removes the
/// thousands separator and the dollar sign.
fn normalize_decimal_input(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| *c != ',' && *c != '$' && !c.is_whitespace())
        .collect()
}

/// Inserts a comma between every group of three digits.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Splits a value rounded to `dp` places into sign, grouped whole part and
/// fraction digits.
fn split_for_display(
    value: Decimal,
    dp: u32,
) -> (bool, String, String) {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.*}", dp as usize, rounded.abs());
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole.to_string(), fraction.to_string()),
        None => (text, String::new()),
    };
    (negative, group_thousands(&whole), fraction)
}

/// Parses a formatted amount such as `"1,234.56"` or `"$ 1,234"`.
///
/// Returns zero for empty input or anything that is not a number.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use plan_core::format::parse_formatted;
///
/// assert_eq!(parse_formatted("1,234.56"), dec!(1234.56));
/// assert_eq!(parse_formatted("abc"), Decimal::ZERO);
/// ```
pub fn parse_formatted(s: &str) -> Decimal {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&normalized).unwrap_or_else(|e| {
        tracing::debug!(input = %s, "unparseable amount treated as zero: {}", e);
        Decimal::ZERO
    })
}

/// Parses a currency field the way ledgers store it: negative values become
/// zero and the result is held to two decimal places.
pub fn parse_amount(s: &str) -> Decimal {
    round_half_up(parse_formatted(s).max(Decimal::ZERO))
}

/// Leading `[+-]digits[.digits][e[+-]digits]` of `s`, rebuilt so that a
/// bare `.5` or `5.` still parses. Empty when `s` does not start with a
/// number.
fn numeric_prefix(s: &str) -> String {
    let bytes = s.as_bytes();
    let digits_from = |start: usize| start + bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let sign = &s[..end];
    let whole_end = digits_from(end);
    let whole = &s[end..whole_end];
    end = whole_end;

    let mut fraction = "";
    if bytes.get(end) == Some(&b'.') {
        let fraction_end = digits_from(end + 1);
        fraction = &s[end + 1..fraction_end];
        end = fraction_end;
    }
    if whole.is_empty() && fraction.is_empty() {
        return String::new();
    }

    let mut exponent = "";
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let digits_start = end + 1 + usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent_end = digits_from(digits_start);
        if exponent_end > digits_start {
            exponent = &s[end..exponent_end];
        }
    }

    let whole = if whole.is_empty() { "0" } else { whole };
    match fraction {
        "" => format!("{sign}{whole}{exponent}"),
        _ => format!("{sign}{whole}.{fraction}{exponent}"),
    }
}

/// Parses a plain numeric field (years, rates, terms, hours).
///
/// Reads the leading number and ignores whatever follows it, so `"12%"` is
/// 12 and `"1,000"` is 1. Input that does not start with a number is zero.
pub fn parse_number(s: &str) -> Decimal {
    let prefix = numeric_prefix(s.trim_start());
    if prefix.is_empty() {
        return Decimal::ZERO;
    }
    let parsed = if prefix.contains(['e', 'E']) {
        Decimal::from_scientific(&prefix)
    } else {
        Decimal::from_str(&prefix)
    };
    parsed.unwrap_or_else(|e| {
        tracing::debug!(input = %s, "number out of range treated as zero: {}", e);
        Decimal::ZERO
    })
}

/// Parses a whole-number field such as a loan term or depreciation period.
///
/// Fractions are truncated and anything negative or unparseable is zero.
pub fn parse_count(s: &str) -> u32 {
    parse_number(s).trunc().to_u32().unwrap_or(0)
}

/// Renders a number with thousands separators and no currency symbol.
///
/// Whole numbers are shown without decimals, everything else with exactly two.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use plan_core::format::format_thousands;
///
/// assert_eq!(format_thousands(dec!(1234567)), "1,234,567");
/// assert_eq!(format_thousands(dec!(1234.5)), "1,234.50");
/// ```
pub fn format_thousands(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let dp = if rounded.fract().is_zero() { 0 } else { 2 };
    let (negative, whole, fraction) = split_for_display(rounded, dp);
    let sign = if negative { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{fraction}")
    }
}

/// Renders whole dollars, e.g. `$1,235` or `-$40`.
pub fn format_currency(value: Decimal) -> String {
    let (negative, whole, _) = split_for_display(value, 0);
    let sign = if negative { "-" } else { "" };
    format!("{sign}${whole}")
}

/// Renders dollars and cents, e.g. `$1,933.28`.
pub fn format_payment(value: Decimal) -> String {
    let (negative, whole, fraction) = split_for_display(value, 2);
    let sign = if negative { "-" } else { "" };
    format!("{sign}${whole}.{fraction}")
}

/// Renders a ratio as a percentage with two decimals: `0.4` becomes `40.00%`.
pub fn format_percent(ratio: Decimal) -> String {
    format_percent_points(ratio.saturating_mul(Decimal::ONE_HUNDRED))
}

/// Renders a value that is already in percentage points: `12.5` becomes
/// `12.50%`.
pub fn format_percent_points(points: Decimal) -> String {
    let rounded = round_half_up(points);
    format!("{rounded:.2}%")
}
