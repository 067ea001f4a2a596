//! Loading the loan fixture.

use loanrisk::data::{load_loans, read_loans};
use loanrisk::{DataError, IncomeLevel, LoanDataset, LoanStatus};

use super::fixture;

fn load() -> LoanDataset {
    LoanDataset::load(&fixture("lending_club_sample.csv")).unwrap()
}

#[test]
fn loads_all_rows() {
    let dataset = load();
    assert_eq!(dataset.len(), 16);
    assert_eq!(dataset.count(LoanStatus::ChargedOff), 6);
    assert_eq!(dataset.count(LoanStatus::FullyPaid), 10);
}

#[test]
fn keeps_file_order_and_values() {
    let dataset = load();
    let first = &dataset.records[0];
    assert_eq!(first.loan_status, LoanStatus::FullyPaid);
    assert_eq!(first.dti, 12.40);
    assert_eq!(first.annual_inc, 65_000.0);
    assert_eq!(first.annual_inc_lvl, Some(IncomeLevel::From47kTo100k));
}

#[test]
fn missing_level_is_derived() {
    let dataset = load();
    let record = &dataset.records[13];
    assert_eq!(record.annual_inc_lvl, None);
    assert_eq!(record.income_level(), IncomeLevel::From47kTo100k);
}

#[test]
fn dti_cutoff_drops_outlier() {
    let groups = load().dti_by_status(70.0);
    assert_eq!(groups.charged_off.len(), 5);
    assert_eq!(groups.fully_paid.len(), 10);
    assert!(groups.charged_off.iter().all(|&d| d < 70.0));
}

#[test]
fn charge_off_rates_by_level() {
    let rates = load().charge_off_rate_by_level();
    let pairs: Vec<(usize, usize)> = rates.iter().map(|r| (r.charged_off, r.total)).collect();
    assert_eq!(
        pairs,
        vec![(1, 2), (3, 4), (2, 6), (0, 1), (0, 1), (0, 1), (0, 1)]
    );
    assert_eq!(rates[1].rate(), Some(0.75));
}

#[test]
fn load_function_matches_method() {
    let via_fn = load_loans(&fixture("lending_club_sample.csv")).unwrap();
    assert_eq!(via_fn.records, load().records);
}

#[test]
fn missing_file_is_io_error() {
    let result = LoanDataset::load(&fixture("does_not_exist.csv"));
    assert!(matches!(result, Err(DataError::Io(_))));
}

#[test]
fn ragged_row_reports_line() {
    let data = "loan_status,dti,annual_inc\nFully Paid,1,2\nCharged Off,3\n";
    match read_loans(data.as_bytes()) {
        Err(DataError::Csv { line, .. }) => assert_eq!(line, 3),
        other => panic!("Expected Csv error, got {:?}", other),
    }
}
