//! End-to-end report on the loan fixture.

use loanrisk::output::{format_report, to_json};
use loanrisk::report::Direction;
use loanrisk::{
    analyze, compare, Column, ConfigError, EffectMagnitude, IncomeLevel, LoanDataset, LoanStatus,
    Method, ReportConfig, ReportError,
};

use super::fixture;

fn dataset() -> LoanDataset {
    LoanDataset::load(&fixture("lending_club_sample.csv")).unwrap()
}

#[test]
fn dti_comparison() {
    let report = analyze(&dataset(), &ReportConfig::default()).unwrap();
    let dti = &report.dti_comparison;

    assert_eq!(report.dti_excluded, 1);
    assert_eq!(dti.column, Column::Dti);
    assert_eq!((dti.counts.greater, dti.counts.less, dti.counts.ties), (47, 3, 0));
    assert!((dti.delta - 0.88).abs() < 1e-12);
    assert_eq!(dti.magnitude, EffectMagnitude::Large);
    assert!(dti.significant);
    assert_eq!(dti.direction(), Direction::HigherValuesRaiseRisk);
}

#[test]
fn income_comparison_depends_on_alpha() {
    let report = analyze(&dataset(), &ReportConfig::default()).unwrap();
    let income = &report.income_comparison;
    assert_eq!((income.counts.greater, income.counts.less), (14, 46));
    assert!((income.delta + 32.0 / 60.0).abs() < 1e-12);
    assert_eq!(income.magnitude, EffectMagnitude::Large);
    // p ≈ 0.093: not significant at 0.05
    assert!(!income.significant);
    assert_eq!(income.direction(), Direction::NoAssociation);

    let relaxed = analyze(&dataset(), &ReportConfig::default().with_alpha(0.1)).unwrap();
    assert_eq!(
        relaxed.income_comparison.direction(),
        Direction::HigherValuesLowerRisk
    );
}

#[test]
fn status_summaries() {
    let report = analyze(&dataset(), &ReportConfig::default()).unwrap();
    let charged = &report.dti_by_status[0];
    assert_eq!(charged.status, LoanStatus::ChargedOff);
    assert_eq!(charged.summary.count, 5);
    assert_eq!(charged.summary.min, 19.20);
    assert_eq!(charged.summary.max, 34.60);
    assert_eq!(charged.summary.median, 27.30);

    let paid = &report.dti_by_status[1];
    assert_eq!(paid.summary.count, 10);
}

#[test]
fn level_cells() {
    let report = analyze(&dataset(), &ReportConfig::default()).unwrap();
    assert_eq!(report.dti_by_income_level.len(), 10);
    let first = &report.dti_by_income_level[0];
    assert_eq!(first.level, IncomeLevel::UpTo12k);
    assert_eq!(first.status, LoanStatus::ChargedOff);
    let total: usize = report.dti_by_income_level.iter().map(|c| c.summary.count).sum();
    assert_eq!(total, 16);
}

#[test]
fn income_histogram_totals() {
    let report = analyze(&dataset(), &ReportConfig::default()).unwrap();
    let hist = &report.income_histogram;
    assert_eq!(hist.edges.len(), 51);
    assert_eq!(hist.edges[0], 9_500.0);
    assert_eq!(hist.edges[50], 750_000.0);
    let charged: u64 = hist.counts(LoanStatus::ChargedOff).unwrap().iter().sum();
    let paid: u64 = hist.counts(LoanStatus::FullyPaid).unwrap().iter().sum();
    assert_eq!((charged, paid), (6, 10));
}

#[test]
fn renders_text_and_json() {
    let report = analyze(&dataset(), &ReportConfig::default()).unwrap();
    let text = format_report(&report, true);
    assert!(text.contains("Loans analysed: 16"));
    let json = to_json(&report).unwrap();
    assert!(json.contains("\"dti_excluded\":1"));
}

#[test]
fn single_column_rejects_out_of_range_alpha() {
    let config = ReportConfig {
        alpha: 7.0,
        ..ReportConfig::default()
    };
    match compare(&dataset(), Column::Dti, &config, true) {
        Err(ReportError::Config(ConfigError::Alpha(a))) => assert_eq!(a, 7.0),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn single_column_rejects_bad_cutoff() {
    let config = ReportConfig {
        max_dti: f64::NAN,
        ..ReportConfig::default()
    };
    assert!(matches!(
        compare(&dataset(), Column::Dti, &config, true),
        Err(ReportError::Config(ConfigError::MaxDti(_)))
    ));
}

#[test]
fn single_column_with_cutoff_matches_report() {
    let config = ReportConfig::default().with_effect_method(Method::Sorted);
    let dti = compare(&dataset(), Column::Dti, &config, true).unwrap();
    assert_eq!((dti.counts.greater, dti.counts.less), (47, 3));
    assert_eq!(dti.method, Method::Sorted);

    // Without the cutoff the 85.0 outlier joins the charged-off group
    let uncut = compare(&dataset(), Column::Dti, &config, false).unwrap();
    assert_eq!(uncut.counts.pairs(), 60);
}

#[test]
fn insignificant_income_finding_is_worded_as_such() {
    let report = analyze(&dataset(), &ReportConfig::default()).unwrap();
    let income = &report.findings[1];
    assert!(income.summary.contains("not statistically significant"));
    assert!(income.summary.contains("large effect"));
}
