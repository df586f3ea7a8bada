//! Plain data handed to the document exporter: a titled summary block and
//! the yearly schedule table, every value already formatted for display.
//! Page layout, styling and rendering belong to the exporter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::amortization::{AmortizationResult, LoanParameters, MAX_TERM_YEARS};
use crate::config::CurrencyFormat;
use crate::format::{format_currency, format_payoff_date, format_rate_percent};

pub const REPORT_TITLE: &str = "Mortgage Repayment Estimate";

pub const SCHEDULE_COLUMNS: [&str; 5] = [
    "Year",
    "Interest Paid",
    "Principal Paid",
    "Remaining Balance",
    "Total Interest",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub title: String,
    pub generated_on: NaiveDate,
    pub file_name: String,
    pub summary: Vec<SummaryLine>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Adjustments made to the inputs before the calculation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl ScheduleReport {
    pub fn with_notes(mut self, notes: impl IntoIterator<Item = String>) -> Self {
        self.notes.extend(notes);
        self
    }
}

fn line(label: &str, value: String) -> SummaryLine {
    SummaryLine {
        label: label.to_string(),
        value,
    }
}

pub fn build_schedule_report(
    params: &LoanParameters,
    result: &AmortizationResult,
    currency: &CurrencyFormat,
    generated_on: NaiveDate,
) -> ScheduleReport {
    let money = |v| format_currency(v, currency);

    let mut summary = vec![
        line("Loan Amount", money(params.principal)),
        line("Interest Rate", format_rate_percent(params.annual_rate_percent)),
        line(
            "Loan Term",
            format!("{} years", params.term_years.min(MAX_TERM_YEARS)),
        ),
        line("Repayment Frequency", capitalise(&params.payment_frequency.to_string())),
        line("Periodic Repayment", money(result.periodic_payment)),
        line("Total Monthly Cost", money(result.total_monthly_cost)),
        line("Total Interest", money(result.total_interest)),
        line("Total Cost", money(result.total_cost)),
        line("Payoff Date", format_payoff_date(result.payoff_date)),
    ];
    if let Some(saved) = result.time_saved {
        summary.push(line("Interest Saved", money(result.interest_saved)));
        summary.push(line("Time Saved", saved.to_string()));
    }
    if !result.paid_off {
        summary.push(line("Outstanding Balance", money(result.final_balance())));
    }

    let rows = result
        .schedule
        .iter()
        .map(|s| {
            vec![
                s.year.to_string(),
                money(s.interest),
                money(s.principal),
                money(s.balance),
                money(s.cumulative_interest),
            ]
        })
        .collect();

    ScheduleReport {
        title: REPORT_TITLE.to_string(),
        generated_on,
        file_name: format!("Mortgage_Report_{}.pdf", generated_on.format("%Y-%m-%d")),
        summary,
        columns: SCHEDULE_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows,
        notes: Vec::new(),
    }
}

fn capitalise(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::compute_amortization;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn params() -> LoanParameters {
        LoanParameters {
            start_date: NaiveDate::from_ymd_opt(2025, 3, 1),
            ..LoanParameters::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn test_report_layout() {
        let p = params();
        let result = compute_amortization(&p);
        let report = build_schedule_report(&p, &result, &CurrencyFormat::default(), today());

        assert_eq!(report.title, "Mortgage Repayment Estimate");
        assert_eq!(report.file_name, "Mortgage_Report_2025-03-01.pdf");
        assert_eq!(report.columns.len(), 5);
        assert_eq!(report.rows.len(), 30);
        assert_eq!(report.rows[0][0], "1");
        assert_eq!(report.rows[29][3], "$0");

        let labels: Vec<&str> = report.summary.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Loan Amount",
                "Interest Rate",
                "Loan Term",
                "Repayment Frequency",
                "Periodic Repayment",
                "Total Monthly Cost",
                "Total Interest",
                "Total Cost",
                "Payoff Date",
            ]
        );
        assert_eq!(report.summary[0].value, "$600,000");
        assert_eq!(report.summary[1].value, "6.50%");
        assert_eq!(report.summary[3].value, "Monthly");
        assert_eq!(report.summary[4].value, "$3,792");
        assert_eq!(report.summary[8].value, "Mar 2055");
        assert!(report.notes.is_empty());
    }

    #[test]
    fn test_report_notes_serialized_only_when_present() {
        let p = params();
        let result = compute_amortization(&p);
        let report = build_schedule_report(&p, &result, &CurrencyFormat::default(), today());
        let plain = serde_json::to_value(&report).unwrap();
        assert!(plain.get("notes").is_none());

        let noted = report.with_notes(vec!["Loan amount 30000000 capped at 20000000".to_string()]);
        let json = serde_json::to_value(&noted).unwrap();
        assert_eq!(json["notes"][0], "Loan amount 30000000 capped at 20000000");
    }

    #[test]
    fn test_report_includes_savings_when_accelerated() {
        let p = LoanParameters {
            recurring_extra_payment: dec!(500),
            ..params()
        };
        let result = compute_amortization(&p);
        let report = build_schedule_report(&p, &result, &CurrencyFormat::default(), today());
        let time_saved = report
            .summary
            .iter()
            .find(|l| l.label == "Time Saved")
            .unwrap();
        assert_eq!(time_saved.value, "8y 2m");
        assert!(report.summary.iter().any(|l| l.label == "Interest Saved"));
    }

    #[test]
    fn test_report_flags_outstanding_balance() {
        let p = LoanParameters {
            term_years: 0,
            ..params()
        };
        let result = compute_amortization(&p);
        let report = build_schedule_report(&p, &result, &CurrencyFormat::default(), today());
        let outstanding = report.summary.last().unwrap();
        assert_eq!(outstanding.label, "Outstanding Balance");
        assert_eq!(outstanding.value, "$600,000");
        assert_eq!(report.rows.len(), 60);
    }
}
