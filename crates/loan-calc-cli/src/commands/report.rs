use chrono::{Local, NaiveDate};
use clap::Args;
use serde_json::Value;

use loan_calc_core::amortization::{compute_amortization, LoanParameters};
use loan_calc_core::config::CalculatorConfig;
use loan_calc_core::report::{build_schedule_report, ScheduleReport};

use super::amortize::{parse_date, resolve_loan, LoanArgs};

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Report date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub generated_on: Option<String>,
}

pub fn run_report(
    args: ReportArgs,
    config: &CalculatorConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let (params, adjustments) = resolve_loan(&args.loan, config)?;
    let generated_on = match args.generated_on {
        Some(ref raw) => parse_date(raw)?,
        None => Local::now().date_naive(),
    };

    let report = loan_report(&params, adjustments, config, generated_on);
    Ok(serde_json::to_value(report)?)
}

/// Report for already-limited parameters, carrying the clamping notes.
fn loan_report(
    params: &LoanParameters,
    adjustments: Vec<String>,
    config: &CalculatorConfig,
    generated_on: NaiveDate,
) -> ScheduleReport {
    let result = compute_amortization(params);
    build_schedule_report(params, &result, &config.currency, generated_on).with_notes(adjustments)
}
