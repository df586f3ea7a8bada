pub mod config;
pub mod error;
pub mod format;
pub mod inputs;
pub mod types;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "affordability")]
pub mod affordability;

#[cfg(feature = "presets")]
pub mod presets;

#[cfg(feature = "report")]
pub mod report;

pub use error::LoanCalcError;
pub use types::*;

/// Standard result type for boundary operations (parsing, presets, config)
pub type LoanCalcResult<T> = Result<T, LoanCalcError>;
