use chrono::{Local, NaiveDate};
use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Serialize;

use loan_calc_core::affordability::{self, AffordabilityParameters};
use loan_calc_core::amortization::{self, LoanParameters};
use loan_calc_core::config::CalculatorConfig;
use loan_calc_core::inputs::{self, RawLoanForm};
use loan_calc_core::presets::{self, LoanPreset};
use loan_calc_core::report;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_config(config_json: Option<String>) -> NapiResult<CalculatorConfig> {
    match config_json {
        Some(s) if !s.trim().is_empty() => {
            CalculatorConfig::from_json_str(&s).map_err(to_napi_error)
        }
        _ => Ok(CalculatorConfig::default()),
    }
}

fn to_json<T: Serialize>(value: &T) -> NapiResult<String> {
    serde_json::to_string(value).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Engines
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_amortization(input_json: String) -> NapiResult<String> {
    let params: LoanParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    to_json(&amortization::amortize(&params))
}

#[napi]
pub fn compute_affordability(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let params: AffordabilityParameters =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = parse_config(config_json)?;
    to_json(&affordability::afford(&params, &config.affordability))
}

// ---------------------------------------------------------------------------
// Form input and presets
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct NormalizedLoanForm {
    parameters: LoanParameters,
    adjustments: Vec<String>,
}

/// Coerce raw form text into loan parameters, returning
/// `{ "parameters": ..., "adjustments": [...] }`.
#[napi]
pub fn normalize_loan_form(form_json: String, config_json: Option<String>) -> NapiResult<String> {
    let form: RawLoanForm = serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let config = parse_config(config_json)?;
    let (parameters, adjustments) = inputs::normalize_loan_form(&form, &config.limits);
    to_json(&NormalizedLoanForm {
        parameters,
        adjustments,
    })
}

#[napi]
pub fn apply_preset(name: String, base_json: Option<String>) -> NapiResult<String> {
    let preset = presets::find_preset(&name).map_err(to_napi_error)?;
    let base: LoanParameters = match base_json {
        Some(s) if !s.trim().is_empty() => serde_json::from_str(&s).map_err(to_napi_error)?,
        _ => LoanParameters::default(),
    };
    to_json(&preset.apply(&base))
}

#[napi]
pub fn list_presets() -> NapiResult<String> {
    to_json(&LoanPreset::all())
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[napi]
pub fn build_schedule_report(
    input_json: String,
    generated_on: Option<String>,
    config_json: Option<String>,
) -> NapiResult<String> {
    let params: LoanParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = parse_config(config_json)?;
    let generated_on = match generated_on {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(to_napi_error)?,
        None => Local::now().date_naive(),
    };

    let result = amortization::compute_amortization(&params);
    let doc = report::build_schedule_report(&params, &result, &config.currency, generated_on);
    to_json(&doc)
}
