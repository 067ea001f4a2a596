//! Loan-default risk factor analysis.
//!
//! Loads a cleaned Lending Club extract, compares charged-off against fully
//! paid loans on debt-to-income ratio and annual income, and reports the
//! effect sizes, significance tests, and distribution summaries behind those
//! comparisons.
//!
//! The statistics themselves live in [`loanrisk_core`] and are re-exported
//! here; this crate adds data loading, the column dictionary, report
//! assembly, and output formatting.
//!
//! # Example
//!
//! ```ignore
//! use loanrisk::{analyze, output, LoanDataset, ReportConfig};
//! use std::path::Path;
//!
//! let dataset = LoanDataset::load(Path::new("datasets/lending_club_cleaned.csv"))?;
//! let report = analyze(&dataset, &ReportConfig::default())?;
//! println!("{}", output::format_report(&report, false));
//! ```
//!
//! The effect size alone needs no data loading:
//!
//! ```
//! use loanrisk::effect_size;
//!
//! let delta = effect_size(&[31.2, 27.0, 24.4], &[12.1, 18.0, 25.3]).unwrap();
//! assert!((delta - 7.0 / 9.0).abs() < 1e-12);
//! ```

pub mod config;
pub mod data;
pub mod dictionary;
pub mod output;
pub mod report;

pub use config::{ConfigError, DisplayOptions, ReportConfig};
pub use data::{Column, DataError, IncomeLevel, LoanDataset, LoanRecord, LoanStatus};
pub use dictionary::FeatureDictionary;
pub use report::{analyze, compare, EffectComparison, Finding, ReportError, RiskReport};

// Re-export the core statistics
pub use loanrisk_core::{
    cliffs_delta, dominance_counts, effect_size, mann_whitney_u, BoxSummary, DominanceCounts,
    EffectMagnitude, Histogram, InvalidInput, MannWhitney, Method,
};
