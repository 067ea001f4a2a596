//! Tests for configuration validation.
//!
//! Builder methods reject invalid values with a panic; configurations built
//! any other way are checked by `validate` and by `analyze`.

use loanrisk::{analyze, ConfigError, LoanDataset, LoanRecord, LoanStatus, ReportConfig, ReportError};

// =============================================================================
// BUILDER VALIDATION
// =============================================================================

#[test]
#[should_panic(expected = "alpha must be in (0, 1)")]
fn alpha_zero_panics() {
    let _ = ReportConfig::new().with_alpha(0.0);
}

#[test]
#[should_panic(expected = "alpha must be in (0, 1)")]
fn alpha_one_panics() {
    let _ = ReportConfig::new().with_alpha(1.0);
}

#[test]
#[should_panic(expected = "alpha must be in (0, 1)")]
fn alpha_nan_panics() {
    let _ = ReportConfig::new().with_alpha(f64::NAN);
}

#[test]
#[should_panic(expected = "histogram_bins must be > 0")]
fn zero_bins_panics() {
    let _ = ReportConfig::new().with_histogram_bins(0);
}

#[test]
#[should_panic(expected = "max_dti must be positive and finite")]
fn infinite_max_dti_panics() {
    let _ = ReportConfig::new().with_max_dti(f64::INFINITY);
}

#[test]
fn defaults_are_valid() {
    let config = ReportConfig::default();
    assert_eq!(config.max_dti, 70.0);
    assert_eq!(config.histogram_bins, 50);
    assert_eq!(config.alpha, 0.05);
    assert!(config.validate().is_ok());
}

// =============================================================================
// STRUCT-LITERAL CONFIGS
// =============================================================================

#[test]
fn analyze_rejects_invalid_literal_config() {
    let dataset = LoanDataset::new(vec![
        LoanRecord::new(LoanStatus::ChargedOff, 20.0, 30_000.0),
        LoanRecord::new(LoanStatus::FullyPaid, 10.0, 60_000.0),
    ]);
    let config = ReportConfig {
        max_dti: -1.0,
        ..ReportConfig::default()
    };

    match analyze(&dataset, &config) {
        Err(ReportError::Config(ConfigError::MaxDti(v))) => assert_eq!(v, -1.0),
        other => panic!("Expected Config error, got {:?}", other),
    }
}
