//! Column-description lookup against the dictionary fixture.

use loanrisk::{DisplayOptions, FeatureDictionary};

use super::fixture;

fn load() -> FeatureDictionary {
    FeatureDictionary::load(&fixture("lending_club_info_sample.csv")).unwrap()
}

#[test]
fn known_column() {
    let dictionary = load();
    assert_eq!(dictionary.len(), 5);
    assert_eq!(
        dictionary.describe("term"),
        Some("The number of payments on the loan. Values are in months and can be either 36 or 60.")
    );
}

#[test]
fn unknown_column_is_absent() {
    let dictionary = load();
    assert_eq!(dictionary.describe("int_rate"), None);
    assert_eq!(dictionary.render("int_rate", &DisplayOptions::default()), None);
}

#[test]
fn lookup_is_exact() {
    let dictionary = load();
    assert_eq!(dictionary.describe("DTI"), None);
    assert_eq!(dictionary.describe(" dti"), None);
}

#[test]
fn default_width_keeps_full_text() {
    let dictionary = load();
    let rendered = dictionary.render("loan_amnt", &DisplayOptions::default()).unwrap();
    assert_eq!(rendered.chars().count(), 172);
    assert!(rendered.ends_with("reflected in this value."));
}

#[test]
fn narrow_width_truncates() {
    let dictionary = load();
    let options = DisplayOptions::default().with_max_colwidth(50);
    assert_eq!(
        dictionary.render("loan_amnt", &options).unwrap(),
        "The listed amount of the loan applied for by th..."
    );
}

#[test]
fn truncation_counts_characters() {
    let dictionary = load();
    let options = DisplayOptions::default().with_max_colwidth(41);
    let rendered = dictionary.render("dti", &options).unwrap();
    assert_eq!(rendered, "A ratio calculated using the borrower\u{2019}...");
    assert_eq!(rendered.chars().count(), 41);
}

#[test]
fn options_are_per_call() {
    let dictionary = load();
    let narrow = DisplayOptions::default().with_max_colwidth(10);
    let _ = dictionary.render("loan_amnt", &narrow);
    // A previous narrow render leaves no trace on the next call
    let full = dictionary.render("loan_amnt", &DisplayOptions::unlimited()).unwrap();
    assert_eq!(full.chars().count(), 172);
}
