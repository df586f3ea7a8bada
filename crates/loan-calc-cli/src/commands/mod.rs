pub mod afford;
pub mod amortize;
pub mod presets;
pub mod report;
