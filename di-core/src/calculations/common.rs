//! Common utility functions for the income models.
//!
//! This module provides shared functionality used across the tax, expenditure
//! and disposable-income calculations, including rounding and safe ratios.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use di_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a fraction to four decimal places, half away from zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use di_core::calculations::common::round_fraction;
///
/// assert_eq!(round_fraction(dec!(0.123449)), dec!(0.1234));
/// assert_eq!(round_fraction(dec!(0.12345)), dec!(0.1235));
/// ```
pub fn round_fraction(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Returns the minimum of two decimal values.
pub fn min(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a < b { a } else { b }
}

/// Divides `numerator` by `denominator`, yielding zero for a zero denominator.
///
/// Used for "share of gross income" figures where a zero income has no
/// meaningful rate.
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use di_core::calculations::common::ratio_or_zero;
///
/// assert_eq!(ratio_or_zero(dec!(15), dec!(60)), dec!(0.25));
/// assert_eq!(ratio_or_zero(dec!(15), Decimal::ZERO), Decimal::ZERO);
/// ```
pub fn ratio_or_zero(
    numerator: Decimal,
    denominator: Decimal,
) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// Whole part of `amount` with comma thousands separators. Fractions are
/// truncated; callers round first when they need to.
///
/// ```
/// use rust_decimal_macros::dec;
/// use di_core::calculations::common::group_thousands;
///
/// assert_eq!(group_thousands(dec!(15000)), "15,000");
/// assert_eq!(group_thousands(dec!(-1234567.89)), "-1,234,567");
/// ```
pub fn group_thousands(amount: Decimal) -> String {
    let whole = amount.trunc();
    let digits = whole.abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if whole.is_sign_negative() && !whole.is_zero() {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
