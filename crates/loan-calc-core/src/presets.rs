//! Named loan-type presets that bulk-set amount, rate, term and escrow.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::amortization::LoanParameters;
use crate::error::LoanCalcError;
use crate::types::{Money, Rate};
use crate::LoanCalcResult;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LoanPreset {
    Purchase,
    Refinance,
    Investment,
}

/// The fields a preset overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetValues {
    pub preset: LoanPreset,
    pub principal: Money,
    pub annual_rate_percent: Rate,
    pub term_years: u32,
    pub yearly_property_tax: Money,
    pub yearly_insurance: Money,
}

impl LoanPreset {
    pub fn values(&self) -> PresetValues {
        let (principal, annual_rate_percent, term_years, yearly_property_tax, yearly_insurance) =
            match self {
                Self::Purchase => (dec!(600_000), dec!(6.50), 30, dec!(4_500), dec!(1_200)),
                Self::Refinance => (dec!(450_000), dec!(6.25), 25, dec!(4_500), dec!(1_200)),
                Self::Investment => (dec!(800_000), dec!(7.25), 30, dec!(6_000), dec!(1_500)),
            };
        PresetValues {
            preset: *self,
            principal,
            annual_rate_percent,
            term_years,
            yearly_property_tax,
            yearly_insurance,
        }
    }

    /// Override the preset's fields on `base` in one step. Frequency, extra
    /// repayments, lump sum and start date are kept from `base`.
    pub fn apply(&self, base: &LoanParameters) -> LoanParameters {
        let v = self.values();
        tracing::debug!(preset = %self, "applying loan preset");
        LoanParameters {
            principal: v.principal,
            annual_rate_percent: v.annual_rate_percent,
            term_years: v.term_years,
            yearly_property_tax: v.yearly_property_tax,
            yearly_insurance: v.yearly_insurance,
            ..base.clone()
        }
    }

    pub fn all() -> Vec<PresetValues> {
        Self::iter().map(|p| p.values()).collect()
    }
}

/// Look up a preset by name (case-insensitive).
pub fn find_preset(name: &str) -> LoanCalcResult<LoanPreset> {
    name.trim()
        .parse()
        .map_err(|_| LoanCalcError::UnknownPreset(name.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentFrequency;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    #[test]
    fn test_default_parameters_match_purchase() {
        let applied = LoanPreset::Purchase.apply(&LoanParameters::default());
        assert_eq!(applied, LoanParameters::default());
    }

    #[test]
    fn test_apply_keeps_non_preset_fields() {
        let base = LoanParameters {
            payment_frequency: PaymentFrequency::Weekly,
            recurring_extra_payment: dec!(200),
            lump_sum: dec!(10_000),
            lump_sum_at_year: 3,
            ..LoanParameters::default()
        };
        let p = LoanPreset::Investment.apply(&base);
        assert_eq!(p.principal, dec!(800_000));
        assert_eq!(p.annual_rate_percent, dec!(7.25));
        assert_eq!(p.term_years, 30);
        assert_eq!(p.yearly_property_tax, dec!(6_000));
        assert_eq!(p.yearly_insurance, dec!(1_500));
        assert_eq!(p.payment_frequency, PaymentFrequency::Weekly);
        assert_eq!(p.recurring_extra_payment, dec!(200));
        assert_eq!(p.lump_sum, dec!(10_000));
        assert_eq!(p.lump_sum_at_year, 3);
    }

    #[test]
    fn test_refinance_values() {
        let v = LoanPreset::Refinance.values();
        assert_eq!(v.principal, dec!(450_000));
        assert_eq!(v.annual_rate_percent, dec!(6.25));
        assert_eq!(v.term_years, 25);
        assert!(v.yearly_insurance > Decimal::ZERO);
    }

    #[test]
    fn test_find_preset() {
        assert_eq!(find_preset("refinance").unwrap(), LoanPreset::Refinance);
        assert_eq!(find_preset(" Investment ").unwrap(), LoanPreset::Investment);
        let err = find_preset("bridging").unwrap_err();
        assert!(matches!(err, LoanCalcError::UnknownPreset(ref n) if n == "bridging"));
    }

    #[test]
    fn test_all_presets_listed() {
        let all = LoanPreset::all();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].preset, LoanPreset::Purchase);
        assert_eq!(LoanPreset::Purchase.to_string(), "purchase");
    }
}
