use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use loan_calc_core::affordability::{compute_affordability, AffordabilityParameters};
use loan_calc_core::amortization::{
    compute_amortization, LoanParameters, BALANCE_EPSILON, SIMULATION_CEILING_YEARS,
};
use loan_calc_core::PaymentFrequency;

const FREQUENCIES: [PaymentFrequency; 3] = [
    PaymentFrequency::Monthly,
    PaymentFrequency::Fortnightly,
    PaymentFrequency::Weekly,
];

fn loan(principal: Decimal, rate: Decimal, term: u32, freq: PaymentFrequency) -> LoanParameters {
    LoanParameters {
        principal,
        annual_rate_percent: rate,
        term_years: term,
        payment_frequency: freq,
        recurring_extra_payment: Decimal::ZERO,
        lump_sum: Decimal::ZERO,
        lump_sum_at_year: 5,
        yearly_property_tax: Decimal::ZERO,
        yearly_insurance: Decimal::ZERO,
        start_date: NaiveDate::from_ymd_opt(2024, 7, 1),
    }
}

fn scenarios() -> Vec<LoanParameters> {
    let mut out = Vec::new();
    for freq in FREQUENCIES {
        out.push(loan(dec!(600_000), dec!(6.5), 30, freq));
        out.push(loan(dec!(250_000), dec!(3.1), 15, freq));
        out.push(loan(dec!(1_500_000), dec!(9.75), 40, freq));
        out.push(loan(dec!(80_000), Decimal::ZERO, 7, freq));
        out.push(LoanParameters {
            recurring_extra_payment: dec!(250),
            lump_sum: dec!(40_000),
            lump_sum_at_year: 3,
            ..loan(dec!(450_000), dec!(6.25), 25, freq)
        });
    }
    out
}

#[test]
fn zero_rate_payment_is_straight_division() {
    for freq in FREQUENCIES {
        let ppy = Decimal::from(freq.periods_per_year());
        let params = loan(dec!(156_000), Decimal::ZERO, 10, freq);
        let result = compute_amortization(&params);
        assert_eq!(result.periodic_payment, dec!(156_000) / (dec!(10) * ppy));
        assert_eq!(result.total_interest, Decimal::ZERO);
        assert!(result.paid_off);
    }
}

#[test]
fn balances_never_increase() {
    for params in scenarios() {
        let result = compute_amortization(&params);
        let mut previous = params.principal;
        for snapshot in &result.schedule {
            assert!(
                snapshot.balance <= previous,
                "{:?}: year {} balance {} > {}",
                params.payment_frequency,
                snapshot.year,
                snapshot.balance,
                previous
            );
            previous = snapshot.balance;
        }
        assert!(result.final_balance() <= BALANCE_EPSILON);
    }
}

#[test]
fn total_cost_reconciles() {
    for params in scenarios() {
        let result = compute_amortization(&params);
        assert_eq!(result.total_cost, params.principal + result.total_interest);
        let last = result.schedule.last().unwrap();
        assert_eq!(last.cumulative_interest, result.total_interest);
    }
}

#[test]
fn identical_inputs_give_identical_outputs() {
    for params in scenarios() {
        assert_eq!(compute_amortization(&params), compute_amortization(&params));
    }
}

#[test]
fn acceleration_never_increases_interest() {
    for freq in FREQUENCIES {
        let base = loan(dec!(500_000), dec!(7), 30, freq);
        let base_interest = compute_amortization(&base).total_interest;

        let variants = [
            LoanParameters {
                recurring_extra_payment: dec!(1),
                ..base.clone()
            },
            LoanParameters {
                recurring_extra_payment: dec!(1_000),
                ..base.clone()
            },
            LoanParameters {
                lump_sum: dec!(100_000),
                lump_sum_at_year: 10,
                ..base.clone()
            },
            LoanParameters {
                lump_sum: dec!(5_000_000),
                lump_sum_at_year: 1,
                ..base.clone()
            },
        ];
        for v in variants {
            let result = compute_amortization(&v);
            assert!(result.total_interest <= base_interest);
            assert!(result.interest_saved >= Decimal::ZERO);
            assert!(result.time_saved.is_some());
        }
    }
}

#[test]
fn monthly_payment_matches_closed_form() {
    let params = loan(dec!(600_000), dec!(6.5), 30, PaymentFrequency::Monthly);
    let result = compute_amortization(&params);
    let r = dec!(0.065) / dec!(12);
    let growth = (Decimal::ONE + r).powu(360);
    let expected = dec!(600_000) * r * growth / (growth - Decimal::ONE);
    assert!((result.periodic_payment - expected).abs() < dec!(0.0001));
    assert!((result.periodic_payment - dec!(3792)).abs() <= dec!(1));
}

#[test]
fn affordability_caps() {
    let result = compute_affordability(&AffordabilityParameters {
        annual_income: dec!(90_000),
        monthly_debts: dec!(500),
        down_payment: dec!(0),
        estimated_annual_rate_percent: dec!(6.5),
    });
    assert_eq!(result.front_end_cap, dec!(2100));
    assert_eq!(result.back_end_cap, dec!(2200));
    assert_eq!(result.max_monthly_payment, dec!(2100));
}

#[test]
fn payment_below_interest_never_pays_off() {
    for freq in FREQUENCIES {
        // Zero term means no scheduled repayment; a token extra payment is
        // still far below the interest accruing each period.
        let params = LoanParameters {
            recurring_extra_payment: dec!(10),
            ..loan(dec!(400_000), dec!(8), 0, freq)
        };
        let result = compute_amortization(&params);
        assert!(!result.paid_off);
        assert_eq!(
            result.periods_elapsed,
            SIMULATION_CEILING_YEARS * freq.periods_per_year()
        );
        assert_eq!(result.schedule.len(), SIMULATION_CEILING_YEARS as usize);
        assert!(result.final_balance() > dec!(1_000));
    }
}
