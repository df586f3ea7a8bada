use clap::Args;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_calc_core::amortization::{self, LoanParameters};
use loan_calc_core::config::{CalculatorConfig, LoanInputLimits};
use loan_calc_core::presets::find_preset;
use loan_calc_core::{LoanCalcError, PaymentFrequency};

use crate::input;

/// Loan inputs shared by `amortize` and `report`.
#[derive(Args)]
pub struct LoanArgs {
    /// Path to a JSON file with the loan parameters
    #[arg(long)]
    pub input: Option<String>,

    /// Start from a named preset: purchase, refinance, investment
    #[arg(long)]
    pub preset: Option<String>,

    /// Loan amount
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Annual interest rate as a percentage (6.5 = 6.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub term: Option<u32>,

    /// Repayment frequency: monthly, fortnightly, weekly
    #[arg(long)]
    pub frequency: Option<String>,

    /// Extra amount paid every period
    #[arg(long)]
    pub extra: Option<Decimal>,

    /// One-off lump sum payment
    #[arg(long)]
    pub lump_sum: Option<Decimal>,

    /// Loan year at whose end the lump sum is paid
    #[arg(long)]
    pub lump_sum_year: Option<u32>,

    /// Yearly property tax
    #[arg(long)]
    pub tax: Option<Decimal>,

    /// Yearly home insurance
    #[arg(long)]
    pub insurance: Option<Decimal>,

    /// First repayment date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub start_date: Option<String>,
}

pub fn run_amortize(
    args: LoanArgs,
    config: &CalculatorConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let (params, adjustments) = resolve_loan(&args, config)?;
    let mut output = amortization::amortize(&params);
    output.warnings.extend(adjustments);
    Ok(serde_json::to_value(output)?)
}

/// Build loan parameters from `--input`, stdin or flags, then apply the
/// configured amount and term limits. Returns notes for clamped values.
pub fn resolve_loan(
    args: &LoanArgs,
    config: &CalculatorConfig,
) -> Result<(LoanParameters, Vec<String>), Box<dyn std::error::Error>> {
    let mut params: LoanParameters = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        params_from_flags(args)?
    };

    if params.start_date.is_none() {
        if let Some(ref raw) = args.start_date {
            params.start_date = Some(parse_date(raw)?);
        }
    }

    Ok(apply_limits(params, &config.limits))
}

/// Clamp amount and term to the configured limits, returning a note for
/// every value that changed.
pub fn apply_limits(
    mut params: LoanParameters,
    limits: &LoanInputLimits,
) -> (LoanParameters, Vec<String>) {
    let mut adjustments = Vec::new();

    let principal = limits.clamp_amount(params.principal);
    if principal != params.principal {
        adjustments.push(format!(
            "Loan amount {} capped at {}",
            params.principal, limits.max_input_amount
        ));
        params.principal = principal;
    }

    let term_years = limits.clamp_term(params.term_years);
    if term_years != params.term_years {
        adjustments.push(format!(
            "Term {} adjusted to {} years (allowed {}-{})",
            params.term_years, term_years, limits.min_term_years, limits.max_term_years
        ));
        params.term_years = term_years;
    }

    if !adjustments.is_empty() {
        tracing::warn!(?adjustments, "loan inputs adjusted to configured limits");
    }
    (params, adjustments)
}

fn params_from_flags(args: &LoanArgs) -> Result<LoanParameters, Box<dyn std::error::Error>> {
    let base = match args.preset {
        Some(ref name) => find_preset(name)?.apply(&LoanParameters::default()),
        None => LoanParameters::default(),
    };

    let payment_frequency = match args.frequency {
        Some(ref raw) => raw
            .parse::<PaymentFrequency>()
            .map_err(|_| LoanCalcError::InvalidInput {
                field: "frequency".into(),
                reason: format!("'{}' is not one of monthly, fortnightly, weekly", raw),
            })?,
        None => base.payment_frequency,
    };

    Ok(LoanParameters {
        principal: args.amount.unwrap_or(base.principal),
        annual_rate_percent: args.rate.unwrap_or(base.annual_rate_percent),
        term_years: args.term.unwrap_or(base.term_years),
        payment_frequency,
        recurring_extra_payment: args.extra.unwrap_or(base.recurring_extra_payment),
        lump_sum: args.lump_sum.unwrap_or(base.lump_sum),
        lump_sum_at_year: args.lump_sum_year.unwrap_or(base.lump_sum_at_year),
        yearly_property_tax: args.tax.unwrap_or(base.yearly_property_tax),
        yearly_insurance: args.insurance.unwrap_or(base.yearly_insurance),
        start_date: None,
    })
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, LoanCalcError> {
    Ok(NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")?)
}
