//! Form-field adapter: coerces raw user text into engine parameters.
//!
//! Non-numeric and negative values become zero and the configured ceilings
//! are enforced here, so the engines only ever see in-domain numbers.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::LoanInputLimits;
use crate::types::{Money, PaymentFrequency};

/// Parse a user-typed number. Accepts `$`, grouping commas and spaces;
/// anything unparseable is 0 and negatives are clamped to 0.
pub fn parse_amount(raw: &str) -> Money {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '_' | ' '))
        .collect();

    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO)
}

/// Parse a whole number of years; fractions are truncated.
pub fn parse_years(raw: &str) -> u32 {
    parse_amount(raw).trunc().to_u32().unwrap_or(u32::MAX)
}

/// Position of the amount slider, which tops out below the typed maximum.
pub fn slider_amount(amount: Money, limits: &LoanInputLimits) -> Money {
    amount.max(Decimal::ZERO).min(limits.max_slider_amount)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLoanForm {
    pub amount: String,
    pub rate: String,
    pub term: String,
    pub frequency: String,
    pub extra_payment: String,
    pub lump_sum: String,
    pub lump_sum_year: String,
    pub yearly_tax: String,
    pub yearly_insurance: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawAffordabilityForm {
    pub annual_income: String,
    pub monthly_debts: String,
    pub down_payment: String,
    pub rate: String,
}

#[cfg(feature = "amortization")]
pub use loan_form::normalize_loan_form;

#[cfg(feature = "affordability")]
pub use affordability_form::normalize_affordability_form;

#[cfg(feature = "amortization")]
mod loan_form {
    use super::*;
    use crate::amortization::LoanParameters;

    /// Coerce and clamp a raw loan form. Returns the parameters plus a note
    /// for every value that had to be adjusted.
    pub fn normalize_loan_form(
        form: &RawLoanForm,
        limits: &LoanInputLimits,
    ) -> (LoanParameters, Vec<String>) {
        let mut adjustments: Vec<String> = Vec::new();

        let raw_amount = parse_amount(&form.amount);
        let principal = limits.clamp_amount(raw_amount);
        if principal != raw_amount {
            adjustments.push(format!(
                "Loan amount {raw_amount} capped at {}",
                limits.max_input_amount
            ));
        }

        let raw_term = parse_years(&form.term);
        let term_years = limits.clamp_term(raw_term);
        if term_years != raw_term {
            adjustments.push(format!(
                "Term {raw_term} adjusted to {term_years} years (allowed {}-{})",
                limits.min_term_years, limits.max_term_years
            ));
        }

        let payment_frequency = if form.frequency.trim().is_empty() {
            PaymentFrequency::default()
        } else {
            form.frequency.trim().parse().unwrap_or_else(|_| {
                adjustments.push(format!(
                    "Unknown frequency '{}'; using monthly",
                    form.frequency.trim()
                ));
                PaymentFrequency::Monthly
            })
        };

        let lump_sum_at_year = parse_years(&form.lump_sum_year).max(1);

        if !adjustments.is_empty() {
            tracing::debug!(?adjustments, "loan form values adjusted");
        }

        let params = LoanParameters {
            principal,
            annual_rate_percent: parse_amount(&form.rate),
            term_years,
            payment_frequency,
            recurring_extra_payment: parse_amount(&form.extra_payment),
            lump_sum: parse_amount(&form.lump_sum),
            lump_sum_at_year,
            yearly_property_tax: parse_amount(&form.yearly_tax),
            yearly_insurance: parse_amount(&form.yearly_insurance),
            start_date: None,
        };
        (params, adjustments)
    }
}

#[cfg(feature = "affordability")]
mod affordability_form {
    use super::*;
    use crate::affordability::AffordabilityParameters;

    pub fn normalize_affordability_form(form: &RawAffordabilityForm) -> AffordabilityParameters {
        AffordabilityParameters {
            annual_income: parse_amount(&form.annual_income),
            monthly_debts: parse_amount(&form.monthly_debts),
            down_payment: parse_amount(&form.down_payment),
            estimated_annual_rate_percent: parse_amount(&form.rate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("600000"), dec!(600000));
        assert_eq!(parse_amount(" $1,250,000.50 "), dec!(1250000.50));
        assert_eq!(parse_amount("6.5"), dec!(6.5));
        assert_eq!(parse_amount("-200"), Decimal::ZERO);
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("abc"), Decimal::ZERO);
        assert_eq!(parse_amount("1e3"), dec!(1000));
    }

    #[test]
    fn test_parse_years() {
        assert_eq!(parse_years("30"), 30);
        assert_eq!(parse_years("12.9"), 12);
        assert_eq!(parse_years("-4"), 0);
        assert_eq!(parse_years("x"), 0);
    }

    #[test]
    fn test_slider_amount() {
        let limits = LoanInputLimits::default();
        assert_eq!(slider_amount(dec!(750_000), &limits), dec!(750_000));
        assert_eq!(slider_amount(dec!(12_000_000), &limits), dec!(5_000_000));
    }

    #[cfg(feature = "amortization")]
    #[test]
    fn test_normalize_loan_form_clamps() {
        let form = RawLoanForm {
            amount: "25000000".into(),
            rate: "6.5".into(),
            term: "55".into(),
            frequency: "Fortnightly".into(),
            extra_payment: "-100".into(),
            lump_sum: "".into(),
            lump_sum_year: "0".into(),
            yearly_tax: "4500".into(),
            yearly_insurance: "1,200".into(),
        };
        let (params, adjustments) = normalize_loan_form(&form, &LoanInputLimits::default());
        assert_eq!(params.principal, dec!(20_000_000));
        assert_eq!(params.term_years, 40);
        assert_eq!(params.payment_frequency, PaymentFrequency::Fortnightly);
        assert_eq!(params.recurring_extra_payment, Decimal::ZERO);
        assert_eq!(params.lump_sum, Decimal::ZERO);
        assert_eq!(params.lump_sum_at_year, 1);
        assert_eq!(params.yearly_insurance, dec!(1200));
        assert_eq!(adjustments.len(), 2);
    }

    #[cfg(feature = "amortization")]
    #[test]
    fn test_normalize_loan_form_minimum_term_and_bad_frequency() {
        let form = RawLoanForm {
            amount: "300000".into(),
            term: "".into(),
            frequency: "daily".into(),
            ..RawLoanForm::default()
        };
        let (params, adjustments) = normalize_loan_form(&form, &LoanInputLimits::default());
        assert_eq!(params.term_years, 1);
        assert_eq!(params.payment_frequency, PaymentFrequency::Monthly);
        assert_eq!(params.annual_rate_percent, Decimal::ZERO);
        assert!(adjustments.iter().any(|a| a.contains("daily")));
    }

    #[cfg(feature = "affordability")]
    #[test]
    fn test_normalize_affordability_form() {
        let form = RawAffordabilityForm {
            annual_income: "$90,000".into(),
            monthly_debts: "-5".into(),
            down_payment: "50000".into(),
            rate: "6.5".into(),
        };
        let params = normalize_affordability_form(&form);
        assert_eq!(params.annual_income, dec!(90000));
        assert_eq!(params.monthly_debts, Decimal::ZERO);
        assert_eq!(params.estimated_annual_rate_percent, dec!(6.5));
    }
}
