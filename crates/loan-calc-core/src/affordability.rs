//! Borrowing-power estimate from income and existing debts.
//!
//! Applies the front-end / back-end debt-to-income caps to gross monthly
//! income, carves out an estimated escrow amount, and reverse-amortises the
//! remaining principal-and-interest budget into a maximum loan.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::principal_for_payment;
use crate::config::AffordabilityAssumptions;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AffordabilityParameters {
    /// Gross annual income.
    pub annual_income: Money,
    /// Existing monthly debt obligations (car loans, cards, ...).
    pub monthly_debts: Money,
    pub down_payment: Money,
    /// Estimated annual rate as a percentage (6.5 = 6.5% p.a.).
    pub estimated_annual_rate_percent: Rate,
}

impl Default for AffordabilityParameters {
    fn default() -> Self {
        Self {
            annual_income: dec!(90_000),
            monthly_debts: dec!(500),
            down_payment: dec!(50_000),
            estimated_annual_rate_percent: dec!(6.50),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityResult {
    pub gross_monthly_income: Money,
    /// Housing cap from the front-end ratio.
    pub front_end_cap: Money,
    /// Back-end cap less existing debts. May be negative.
    pub back_end_cap: Money,
    pub max_monthly_payment: Money,
    /// Monthly budget left for principal and interest after escrow.
    pub payment_for_principal_and_interest: Money,
    pub max_loan_amount: Money,
    pub max_home_price: Money,
}

/// Affordability with the standard 28% / 36% / $400 assumptions.
pub fn compute_affordability(params: &AffordabilityParameters) -> AffordabilityResult {
    compute_affordability_with(params, &AffordabilityAssumptions::default())
}

pub fn compute_affordability_with(
    params: &AffordabilityParameters,
    assumptions: &AffordabilityAssumptions,
) -> AffordabilityResult {
    let income = params.annual_income.max(Decimal::ZERO);
    let debts = params.monthly_debts.max(Decimal::ZERO);
    let down_payment = params.down_payment.max(Decimal::ZERO);
    let annual_rate = params.estimated_annual_rate_percent.max(Decimal::ZERO);

    let gross_monthly_income = income / dec!(12);
    let front_end_cap = gross_monthly_income
        .checked_mul(assumptions.front_end_ratio)
        .unwrap_or(Decimal::ZERO);
    let back_end_cap = gross_monthly_income
        .checked_mul(assumptions.back_end_ratio)
        .and_then(|v| v.checked_sub(debts))
        .unwrap_or(Decimal::ZERO);

    let max_monthly_payment = front_end_cap.min(back_end_cap).max(Decimal::ZERO);
    let payment_for_principal_and_interest = max_monthly_payment
        .checked_sub(assumptions.estimated_escrow)
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO);

    let period_rate = annual_rate / dec!(100) / dec!(12);
    let periods = assumptions.assumed_term_years.saturating_mul(12);
    let max_loan_amount =
        principal_for_payment(payment_for_principal_and_interest, period_rate, periods)
            .max(Decimal::ZERO);

    AffordabilityResult {
        gross_monthly_income,
        front_end_cap,
        back_end_cap,
        max_monthly_payment,
        payment_for_principal_and_interest,
        max_loan_amount,
        max_home_price: max_loan_amount
            .checked_add(down_payment)
            .unwrap_or(Decimal::ZERO)
            .max(Decimal::ZERO),
    }
}

/// Compute and wrap in the standard envelope.
pub fn afford(
    params: &AffordabilityParameters,
    assumptions: &AffordabilityAssumptions,
) -> ComputationOutput<AffordabilityResult> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let result = compute_affordability_with(params, assumptions);

    if result.back_end_cap < result.front_end_cap {
        warnings.push(
            "Existing debts reduce the housing budget below the front-end cap".into(),
        );
    }
    if result.back_end_cap <= Decimal::ZERO {
        warnings.push("Existing debts consume the entire back-end allowance".into());
    } else if result.payment_for_principal_and_interest.is_zero() {
        warnings.push(format!(
            "Housing budget does not exceed the estimated escrow of {}",
            assumptions.estimated_escrow
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Front-end / back-end DTI caps with reverse amortisation",
        &serde_json::json!({
            "front_end_ratio": assumptions.front_end_ratio.to_string(),
            "back_end_ratio": assumptions.back_end_ratio.to_string(),
            "estimated_escrow": assumptions.estimated_escrow.to_string(),
            "assumed_term_years": assumptions.assumed_term_years,
            "payment_frequency": "monthly",
        }),
        warnings,
        elapsed,
        result,
    )
}
