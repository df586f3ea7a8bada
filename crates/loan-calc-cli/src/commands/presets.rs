use serde_json::Value;

use loan_calc_core::presets::LoanPreset;

pub fn run_presets() -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(LoanPreset::all())?)
}
