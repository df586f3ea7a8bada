use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Annual rates are carried as percentages (6.5 = 6.5%) at the input
/// boundary and converted to per-period decimals inside the engines.
pub type Rate = Decimal;

/// How often a repayment is made.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
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
pub enum PaymentFrequency {
    #[default]
    Monthly,
    Fortnightly,
    Weekly,
}

impl PaymentFrequency {
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Self::Monthly => 12,
            Self::Fortnightly => 26,
            Self::Weekly => 52,
        }
    }
}

/// Whole years and remaining months, e.g. the term shaved off a loan by
/// extra repayments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSaved {
    pub years: u32,
    /// Always in `0..12`.
    pub months: u32,
}

impl TimeSaved {
    pub fn new(years: u32, months: u32) -> Self {
        Self {
            years: years + months / 12,
            months: months % 12,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0
    }
}

impl std::fmt::Display for TimeSaved {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match (self.years, self.months) {
            (0, 0) => write!(f, "0m"),
            (y, 0) => write!(f, "{y}y"),
            (0, m) => write!(f, "{m}m"),
            (y, m) => write!(f, "{y}y {m}m"),
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
