//! Mortgage repayment engine.
//!
//! Computes the standard principal-and-interest repayment for a loan, then
//! runs a period-by-period simulation that honours recurring extra
//! repayments and a one-off lump sum. The simulation is bounded by a
//! 60-year ceiling; a loan that cannot be repaid within it is reported as
//! not paid off rather than as an error. All math in `rust_decimal::Decimal`.

use chrono::{Days, Local, Months, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::format::format_payoff_date;
use crate::types::{with_metadata, ComputationOutput, Money, PaymentFrequency, Rate, TimeSaved};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Longest term the engine accepts; larger terms are clamped.
pub const MAX_TERM_YEARS: u32 = 40;

/// Simulation stops after this many years even if the loan is not repaid.
pub const SIMULATION_CEILING_YEARS: u32 = 60;

/// Balance at or below which the loan is considered fully repaid.
pub const BALANCE_EPSILON: Decimal = dec!(0.01);

const DAYS_PER_YEAR: Decimal = dec!(365.25);

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

/// Loan parameters for a single repayment calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanParameters {
    pub principal: Money,
    /// Annual interest rate as a percentage (6.5 = 6.5% p.a.).
    pub annual_rate_percent: Rate,
    pub term_years: u32,
    pub payment_frequency: PaymentFrequency,
    /// Added to every scheduled repayment.
    pub recurring_extra_payment: Money,
    pub lump_sum: Money,
    /// Year (1-based) at whose final period the lump sum is paid.
    pub lump_sum_at_year: u32,
    /// Only ever added to the displayed monthly cost.
    pub yearly_property_tax: Money,
    pub yearly_insurance: Money,
    /// Date the schedule starts from. Defaults to today when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

impl Default for LoanParameters {
    fn default() -> Self {
        Self {
            principal: dec!(600_000),
            annual_rate_percent: dec!(6.50),
            term_years: 30,
            payment_frequency: PaymentFrequency::Monthly,
            recurring_extra_payment: Decimal::ZERO,
            lump_sum: Decimal::ZERO,
            lump_sum_at_year: 5,
            yearly_property_tax: dec!(4_500),
            yearly_insurance: dec!(1_200),
            start_date: None,
        }
    }
}

impl LoanParameters {
    pub fn is_accelerated(&self) -> bool {
        self.recurring_extra_payment > Decimal::ZERO || self.lump_sum > Decimal::ZERO
    }
}

/// Aggregated figures for one loan year (or the partial year of payoff).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSnapshot {
    /// 1-based year index.
    pub year: u32,
    pub interest: Money,
    pub principal: Money,
    /// Balance remaining at the end of the year.
    pub balance: Money,
    pub cumulative_interest: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    /// Standard principal-and-interest repayment per period, excluding extras.
    pub periodic_payment: Money,
    pub periods_per_year: u32,
    pub scheduled_periods: u32,
    /// Periods actually simulated until payoff (or until the ceiling).
    pub periods_elapsed: u32,
    /// Periodic repayment expressed per month.
    pub monthly_equivalent_payment: Money,
    /// Monthly repayment plus prorated property tax and insurance.
    pub total_monthly_cost: Money,
    pub schedule: Vec<YearSnapshot>,
    pub total_interest: Money,
    pub total_cost: Money,
    pub payoff_date: NaiveDate,
    /// False when the ceiling was hit with a balance still outstanding.
    pub paid_off: bool,
    pub interest_saved: Money,
    /// Present only when extra repayments or a lump sum were supplied.
    pub time_saved: Option<TimeSaved>,
}

impl AmortizationResult {
    pub fn final_balance(&self) -> Money {
        self.schedule
            .last()
            .map(|s| s.balance)
            .unwrap_or(Decimal::ZERO)
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Standard amortising repayment: `P * r(1+r)^n / ((1+r)^n - 1)`.
///
/// `r` is the per-period rate as a decimal. Zero-rate loans are repaid in
/// equal instalments. Any overflow or division by zero yields zero.
pub fn standard_payment(principal: Money, period_rate: Rate, periods: u32) -> Money {
    if periods == 0 {
        return Decimal::ZERO;
    }
    if period_rate.is_zero() {
        return principal / Decimal::from(periods);
    }

    let growth = match (Decimal::ONE + period_rate).checked_powu(periods as u64) {
        Some(g) => g,
        None => return Decimal::ZERO,
    };
    principal
        .checked_mul(period_rate)
        .and_then(|v| v.checked_mul(growth))
        .and_then(|v| v.checked_div(growth - Decimal::ONE))
        .unwrap_or(Decimal::ZERO)
}

/// Inverse of [`standard_payment`]: the principal a repayment can service.
pub fn principal_for_payment(payment: Money, period_rate: Rate, periods: u32) -> Money {
    if period_rate.is_zero() {
        return payment
            .checked_mul(Decimal::from(periods))
            .unwrap_or(Decimal::ZERO);
    }

    let growth = match (Decimal::ONE + period_rate).checked_powu(periods as u64) {
        Some(g) => g,
        None => return Decimal::ZERO,
    };
    payment
        .checked_mul(growth - Decimal::ONE)
        .and_then(|v| {
            period_rate
                .checked_mul(growth)
                .and_then(|denominator| v.checked_div(denominator))
        })
        .unwrap_or(Decimal::ZERO)
}

/// Run the repayment calculation. Pure: identical inputs (including
/// `start_date`) always give identical results.
pub fn compute_amortization(params: &LoanParameters) -> AmortizationResult {
    let start_date = params
        .start_date
        .unwrap_or_else(|| Local::now().date_naive());

    let principal = params.principal.max(Decimal::ZERO);
    let annual_rate = params.annual_rate_percent.max(Decimal::ZERO);
    let extra = params.recurring_extra_payment.max(Decimal::ZERO);
    let lump_sum = params.lump_sum.max(Decimal::ZERO);
    let term_years = params.term_years.min(MAX_TERM_YEARS);

    let periods_per_year = params.payment_frequency.periods_per_year();
    let ppy = Decimal::from(periods_per_year);
    let period_rate = annual_rate / dec!(100) / ppy;
    let scheduled_periods = term_years * periods_per_year;

    let payment = standard_payment(principal, period_rate, scheduled_periods);

    let monthly_equivalent_payment = payment
        .checked_mul(ppy)
        .map(|v| v / dec!(12))
        .unwrap_or(Decimal::ZERO);
    let monthly_escrow = params
        .yearly_property_tax
        .max(Decimal::ZERO)
        .checked_add(params.yearly_insurance.max(Decimal::ZERO))
        .map(|v| v / dec!(12))
        .unwrap_or(Decimal::ZERO);
    let total_monthly_cost = monthly_equivalent_payment
        .checked_add(monthly_escrow)
        .unwrap_or(Decimal::ZERO);

    // Period-by-period simulation
    let max_periods = SIMULATION_CEILING_YEARS * periods_per_year;
    let lump_sum_period = params.lump_sum_at_year.saturating_mul(periods_per_year);

    let mut balance = principal;
    let mut total_interest = Decimal::ZERO;
    let mut year_interest = Decimal::ZERO;
    let mut year_principal = Decimal::ZERO;
    let mut periods_elapsed: u32 = 0;
    let mut overflowed = false;
    let mut schedule: Vec<YearSnapshot> = Vec::with_capacity(term_years.max(1) as usize);

    for i in 1..=max_periods {
        if balance <= BALANCE_EPSILON {
            break;
        }

        let Some(step) = simulate_period(
            balance,
            period_rate,
            payment,
            extra,
            if i == lump_sum_period { lump_sum } else { Decimal::ZERO },
            total_interest,
            year_interest,
        ) else {
            overflowed = true;
            break;
        };

        balance -= step.principal_paid;
        total_interest = step.total_interest;
        year_interest = step.year_interest;
        year_principal += step.principal_paid;
        periods_elapsed = i;

        if i % periods_per_year == 0 || balance <= BALANCE_EPSILON {
            schedule.push(YearSnapshot {
                year: i.div_ceil(periods_per_year),
                interest: year_interest,
                principal: year_principal,
                balance: balance.max(Decimal::ZERO),
                cumulative_interest: total_interest,
            });
            year_interest = Decimal::ZERO;
            year_principal = Decimal::ZERO;
        }
    }

    let paid_off = balance <= BALANCE_EPSILON;
    if overflowed {
        tracing::debug!(
            periods = periods_elapsed,
            balance = %balance,
            "simulation stopped: period arithmetic exceeds the decimal range"
        );
        // Record the partial year so the outstanding balance stays visible
        if periods_elapsed % periods_per_year != 0 || schedule.is_empty() {
            schedule.push(YearSnapshot {
                year: periods_elapsed.div_ceil(periods_per_year).max(1),
                interest: year_interest,
                principal: year_principal,
                balance,
                cumulative_interest: total_interest,
            });
        }
    } else if !paid_off {
        tracing::debug!(
            periods = periods_elapsed,
            balance = %balance,
            "simulation reached the {SIMULATION_CEILING_YEARS}-year ceiling without payoff"
        );
    }

    let payoff_date = advance_date(start_date, params.payment_frequency, periods_elapsed);

    // Savings against the unaccelerated baseline
    let (interest_saved, time_saved) = if params.is_accelerated() {
        let baseline_interest = payment
            .checked_mul(Decimal::from(scheduled_periods))
            .map(|total_paid| total_paid - principal)
            .unwrap_or(Decimal::ZERO);
        let saved = (baseline_interest - total_interest).max(Decimal::ZERO);
        let periods_saved = scheduled_periods.saturating_sub(periods_elapsed);
        (saved, Some(periods_to_time_saved(periods_saved, periods_per_year)))
    } else {
        (Decimal::ZERO, None)
    };

    AmortizationResult {
        periodic_payment: payment,
        periods_per_year,
        scheduled_periods,
        periods_elapsed,
        monthly_equivalent_payment,
        total_monthly_cost,
        schedule,
        total_interest,
        total_cost: principal
            .checked_add(total_interest)
            .unwrap_or(Decimal::ZERO),
        payoff_date,
        paid_off,
        interest_saved,
        time_saved,
    }
}

/// Compute and wrap in the standard envelope with warnings and timing.
pub fn amortize(params: &LoanParameters) -> ComputationOutput<AmortizationResult> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if params.term_years > MAX_TERM_YEARS {
        warnings.push(format!(
            "Term of {} years exceeds the {MAX_TERM_YEARS}-year maximum; clamped",
            params.term_years
        ));
    }
    if params.term_years == 0 && params.principal > Decimal::ZERO {
        warnings.push("Term is zero; no scheduled repayment can be computed".into());
    }

    let result = compute_amortization(params);

    let ceiling_periods = SIMULATION_CEILING_YEARS * result.periods_per_year;
    if !result.paid_off && result.periods_elapsed < ceiling_periods {
        warnings.push(format!(
            "Amounts exceed the supported numeric range; simulation stopped after {} periods",
            result.periods_elapsed
        ));
    } else if !result.paid_off {
        warnings.push(format!(
            "Loan is not repaid within {SIMULATION_CEILING_YEARS} years; {} remains outstanding",
            result.final_balance().round_dp(2)
        ));
    }
    if params.lump_sum > Decimal::ZERO {
        let lump_sum_period = params
            .lump_sum_at_year
            .saturating_mul(result.periods_per_year);
        if lump_sum_period == 0 || lump_sum_period > result.periods_elapsed {
            warnings.push(format!(
                "Lump sum at year {} is never applied; the loan ends after {} periods",
                params.lump_sum_at_year, result.periods_elapsed
            ));
        }
    }

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Standard amortising repayment with period-by-period payoff simulation",
        &serde_json::json!({
            "principal": params.principal.to_string(),
            "annual_rate_percent": params.annual_rate_percent.to_string(),
            "term_years": params.term_years.min(MAX_TERM_YEARS),
            "payment_frequency": params.payment_frequency,
            "recurring_extra_payment": params.recurring_extra_payment.to_string(),
            "lump_sum": params.lump_sum.to_string(),
            "lump_sum_at_year": params.lump_sum_at_year,
            "payoff_date": format_payoff_date(result.payoff_date),
            "simulation_ceiling_years": SIMULATION_CEILING_YEARS,
        }),
        warnings,
        elapsed,
        result,
    )
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Calendar months for monthly loans; `365.25 / periods_per_year` days per
/// period (rounded up) otherwise.
fn advance_date(start: NaiveDate, frequency: PaymentFrequency, periods: u32) -> NaiveDate {
    match frequency {
        PaymentFrequency::Monthly => start
            .checked_add_months(Months::new(periods))
            .unwrap_or(start),
        PaymentFrequency::Fortnightly | PaymentFrequency::Weekly => {
            let ppy = Decimal::from(frequency.periods_per_year());
            let days = (Decimal::from(periods) * DAYS_PER_YEAR / ppy)
                .ceil()
                .to_u64()
                .unwrap_or(0);
            start.checked_add_days(Days::new(days)).unwrap_or(start)
        }
    }
}

/// Outcome of a single repayment period.
struct PeriodStep {
    principal_paid: Money,
    total_interest: Money,
    year_interest: Money,
}

/// One period of the simulation, or `None` if any amount leaves the
/// decimal range.
fn simulate_period(
    balance: Money,
    period_rate: Rate,
    payment: Money,
    extra: Money,
    lump_sum: Money,
    total_interest: Money,
    year_interest: Money,
) -> Option<PeriodStep> {
    let interest = balance.checked_mul(period_rate)?;
    let repayment = payment.checked_add(extra)?.checked_add(lump_sum)?;

    // Never negative (no capitalised interest), never past the balance
    let principal_paid = repayment
        .checked_sub(interest)?
        .max(Decimal::ZERO)
        .min(balance);

    Some(PeriodStep {
        principal_paid,
        total_interest: total_interest.checked_add(interest)?,
        year_interest: year_interest.checked_add(interest)?,
    })
}

fn periods_to_time_saved(periods_saved: u32, periods_per_year: u32) -> TimeSaved {
    let years = periods_saved / periods_per_year;
    let fraction = Decimal::from(periods_saved % periods_per_year) / Decimal::from(periods_per_year);
    let months = (fraction * dec!(12))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0);
    TimeSaved::new(years, months)
}
