use di_core::calculations::common::group_thousands;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Error returned when a string cannot be parsed as a money amount.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing: trims whitespace and removes `$` and
/// commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace([',', '$'], "")
}

/// Parses a money amount such as `65000`, `65,000` or `$65,000.00`.
///
/// Used as a clap value parser for income arguments.
pub fn parse_money(s: &str) -> Result<Decimal, ParseDecimalError> {
    normalize_decimal_input(s)
        .parse()
        .map_err(|source| ParseDecimalError {
            input: s.to_string(),
            source,
        })
}

/// Whole dollars with thousands separators, e.g. `-1,234`.
///
/// Halves round away from zero, as every amount in the workspace does.
pub fn format_dollars(amount: Decimal) -> String {
    group_thousands(amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}

/// A fraction as a percentage with `places` decimals, e.g. `0.0861` → `8.6%`.
pub fn format_percent(
    fraction: Decimal,
    places: u32,
) -> String {
    format!("{}%", fixed(fraction * Decimal::ONE_HUNDRED, places))
}

/// A decimal with exactly `places` decimals.
pub fn fixed(
    value: Decimal,
    places: u32,
) -> String {
    let mut rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(places);
    rounded.to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_money_accepts_formatted_amounts() {
        assert_eq!(parse_money("65000").unwrap(), dec!(65000));
        assert_eq!(parse_money(" 65,000 ").unwrap(), dec!(65000));
        assert_eq!(parse_money("$145,000.50").unwrap(), dec!(145000.50));
    }

    #[test]
    fn parse_money_rejects_garbage() {
        let err = parse_money("lots").unwrap_err();

        assert!(err.to_string().starts_with("invalid amount 'lots'"));
    }

    #[test]
    fn format_dollars_groups_and_rounds() {
        assert_eq!(format_dollars(dec!(0)), "0");
        assert_eq!(format_dollars(dec!(999.49)), "999");
        assert_eq!(format_dollars(dec!(65000)), "65,000");
        assert_eq!(format_dollars(dec!(1234567.89)), "1,234,568");
        assert_eq!(format_dollars(dec!(-4200.25)), "-4,200");
    }

    #[test]
    fn format_dollars_rounds_half_away_from_zero() {
        assert_eq!(format_dollars(dec!(5161.50)), "5,162");
        assert_eq!(format_dollars(dec!(942.50)), "943");
        assert_eq!(format_dollars(dec!(-942.50)), "-943");
    }

    #[test]
    fn format_dollars_small_negative_is_zero() {
        assert_eq!(format_dollars(dec!(-0.4)), "0");
    }

    #[test]
    fn format_percent_pads_decimals() {
        assert_eq!(format_percent(dec!(0.086025), 1), "8.6%");
        assert_eq!(format_percent(dec!(0.062), 1), "6.2%");
        assert_eq!(format_percent(dec!(0.0765), 1), "7.7%");
        assert_eq!(format_percent(dec!(0), 1), "0.0%");
        assert_eq!(format_percent(dec!(0.7), 0), "70%");
        assert_eq!(format_percent(dec!(-0.0523), 1), "-5.2%");
    }

    #[test]
    fn fixed_pads_and_rounds() {
        assert_eq!(fixed(dec!(1), 2), "1.00");
        assert_eq!(fixed(dec!(0.65833), 2), "0.66");
    }
}
