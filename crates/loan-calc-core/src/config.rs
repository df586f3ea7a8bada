//! Tunable business constants for the calculators.
//!
//! Every value has a default matching the published calculator, so an
//! empty (or absent) config document yields the standard behaviour.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};
use crate::LoanCalcResult;

/// Hard ceilings applied to raw form input before it reaches the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanInputLimits {
    /// Largest loan amount accepted from direct (typed) input.
    pub max_input_amount: Money,
    /// Upper bound of the amount slider control.
    pub max_slider_amount: Money,
    pub min_term_years: u32,
    pub max_term_years: u32,
}

impl Default for LoanInputLimits {
    fn default() -> Self {
        Self {
            max_input_amount: dec!(20_000_000),
            max_slider_amount: dec!(5_000_000),
            min_term_years: 1,
            max_term_years: 40,
        }
    }
}

/// Debt-to-income heuristics used by the affordability engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AffordabilityAssumptions {
    /// Share of gross monthly income that may go to housing (front-end DTI).
    pub front_end_ratio: Rate,
    /// Share of gross monthly income that may go to all debt (back-end DTI).
    pub back_end_ratio: Rate,
    /// Monthly tax and insurance carved out of the housing payment.
    pub estimated_escrow: Money,
    /// Monthly-repayment term used to reverse-amortise the payment.
    pub assumed_term_years: u32,
}

impl Default for AffordabilityAssumptions {
    fn default() -> Self {
        Self {
            front_end_ratio: dec!(0.28),
            back_end_ratio: dec!(0.36),
            estimated_escrow: dec!(400),
            assumed_term_years: 30,
        }
    }
}

/// Display settings for monetary values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub code: String,
    pub grouping_separator: char,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "$".into(),
            code: "AUD".into(),
            grouping_separator: ',',
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub limits: LoanInputLimits,
    pub affordability: AffordabilityAssumptions,
    pub currency: CurrencyFormat,
}

impl CalculatorConfig {
    pub fn from_json_str(s: &str) -> LoanCalcResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_yaml_str(s: &str) -> LoanCalcResult<Self> {
        Ok(serde_yaml::from_str(s)?)
    }
}

impl LoanInputLimits {
    /// Clamp a loan amount into `[0, max_input_amount]`.
    pub fn clamp_amount(&self, amount: Money) -> Money {
        amount.max(Decimal::ZERO).min(self.max_input_amount)
    }

    pub fn clamp_term(&self, term_years: u32) -> u32 {
        term_years.clamp(self.min_term_years, self.max_term_years.max(self.min_term_years))
    }
}
