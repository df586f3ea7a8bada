use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_calc_core::affordability::{self, AffordabilityParameters};
use loan_calc_core::config::CalculatorConfig;

use crate::input;

#[derive(Args)]
pub struct AffordArgs {
    /// Path to a JSON file with the affordability parameters
    #[arg(long)]
    pub input: Option<String>,

    /// Gross annual income
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Existing monthly debt repayments
    #[arg(long)]
    pub debts: Option<Decimal>,

    /// Down payment available
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Estimated annual interest rate as a percentage
    #[arg(long)]
    pub rate: Option<Decimal>,
}

pub fn run_afford(
    args: AffordArgs,
    config: &CalculatorConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let params: AffordabilityParameters = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let defaults = AffordabilityParameters::default();
        AffordabilityParameters {
            annual_income: args.income.unwrap_or(defaults.annual_income),
            monthly_debts: args.debts.unwrap_or(defaults.monthly_debts),
            down_payment: args.down_payment.unwrap_or(defaults.down_payment),
            estimated_annual_rate_percent: args
                .rate
                .unwrap_or(defaults.estimated_annual_rate_percent),
        }
    };

    let output = affordability::afford(&params, &config.affordability);
    Ok(serde_json::to_value(output)?)
}
