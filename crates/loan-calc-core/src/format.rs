//! Display helpers for the boundary layer. The engines never format.

use chrono::NaiveDate;
use rust_decimal::RoundingStrategy;
use thousands::{digits, Separable, SeparatorPolicy};

use crate::config::CurrencyFormat;
use crate::types::{Money, Rate};

/// Whole-unit currency string, e.g. `$3,792` or `-$1,250`.
pub fn format_currency(amount: Money, format: &CurrencyFormat) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        return format!("{}0", format.symbol);
    }

    let separator = format.grouping_separator.to_string();
    let policy = SeparatorPolicy {
        separator: &separator,
        groups: &[3],
        digits: digits::ASCII_DECIMAL,
    };
    let grouped = rounded.abs().separate_by_policy(policy);

    if rounded.is_sign_negative() {
        format!("-{}{}", format.symbol, grouped)
    } else {
        format!("{}{}", format.symbol, grouped)
    }
}

/// Annual percentage with two decimals, e.g. `6.50%`.
pub fn format_rate_percent(rate_percent: Rate) -> String {
    format!(
        "{:.2}%",
        rate_percent.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Short month and year, e.g. `Oct 2056`.
pub fn format_payoff_date(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_currency_groups_and_rounds() {
        let fmt = CurrencyFormat::default();
        assert_eq!(format_currency(dec!(600000), &fmt), "$600,000");
        assert_eq!(format_currency(dec!(3792.41), &fmt), "$3,792");
        assert_eq!(format_currency(dec!(3792.5), &fmt), "$3,793");
        assert_eq!(format_currency(dec!(999.49), &fmt), "$999");
        assert_eq!(format_currency(dec!(20000000), &fmt), "$20,000,000");
    }

    #[test]
    fn test_format_currency_negative_and_zero() {
        let fmt = CurrencyFormat::default();
        assert_eq!(format_currency(dec!(-1250.2), &fmt), "-$1,250");
        assert_eq!(format_currency(dec!(-0.4), &fmt), "$0");
        assert_eq!(format_currency(Decimal::ZERO, &fmt), "$0");
    }

    #[test]
    fn test_format_currency_custom_format() {
        let fmt = CurrencyFormat {
            symbol: "€".into(),
            code: "EUR".into(),
            grouping_separator: '.',
        };
        assert_eq!(format_currency(dec!(1234567.8), &fmt), "€1.234.568");
    }

    #[test]
    fn test_format_rate_and_date() {
        assert_eq!(format_rate_percent(dec!(6.5)), "6.50%");
        assert_eq!(format_rate_percent(dec!(7.255)), "7.26%");
        let d = NaiveDate::from_ymd_opt(2056, 10, 19).unwrap();
        assert_eq!(format_payoff_date(d), "Oct 2056");
    }
}
