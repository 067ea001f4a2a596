//! Loan dataset model and loading.
//!
//! The dataset is the pre-cleaned Lending Club extract: one row per loan with
//! its final status, debt-to-income ratio, annual income, and (optionally) an
//! income bracket label.
//!
//! # Example
//!
//! ```ignore
//! use loanrisk::data::LoanDataset;
//! use std::path::Path;
//!
//! let dataset = LoanDataset::load(Path::new("datasets/lending_club_cleaned.csv"))?;
//! let dti = dataset.dti_by_status(70.0);
//! println!("{} charged off, {} fully paid",
//!          dti.charged_off.len(),
//!          dti.fully_paid.len());
//! ```

mod csv;

pub use self::csv::{load_loans, read_loans};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors that can occur during data loading.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// IO error reading file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV at a specific line.
    #[error("CSV error at line {line}: {message}")]
    Csv {
        /// Line number where the error occurred (1-indexed).
        line: u64,
        /// Description of the parse error.
        message: String,
    },

    /// A required column is absent from the header.
    #[error("Missing column '{column}'. Found columns: {found:?}")]
    MissingColumn {
        /// The column that was expected.
        column: String,
        /// The columns that were actually present.
        found: Vec<String>,
    },

    /// A field parsed but holds an unusable value.
    #[error("Invalid value for '{column}' at line {line}: '{value}'")]
    InvalidValue {
        /// Line number where the invalid value was found (1-indexed).
        line: u64,
        /// Column holding the value.
        column: String,
        /// The offending value.
        value: String,
    },

    /// A numeric column name that the analysis does not know.
    #[error("Unknown column '{0}'. Expected one of: dti, annual_inc")]
    UnknownColumn(String),

    /// Insufficient samples for analysis.
    #[error("Insufficient samples for group '{group}': got {got}, need at least {min}")]
    InsufficientSamples {
        /// Name of the group with insufficient samples.
        group: String,
        /// Number of samples found.
        got: usize,
        /// Minimum number of samples required.
        min: usize,
    },
}

impl From<::csv::Error> for DataError {
    fn from(e: ::csv::Error) -> Self {
        let line = e.position().map(|p| p.line()).unwrap_or(0);
        let message = e.to_string();
        if let ::csv::ErrorKind::Io(io) = e.into_kind() {
            return DataError::Io(io);
        }
        DataError::Csv { line, message }
    }
}

/// Final status of a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LoanStatus {
    /// Repaid in full.
    #[serde(rename = "Fully Paid")]
    FullyPaid,
    /// Written off as a loss (the default outcome).
    #[serde(rename = "Charged Off")]
    ChargedOff,
}

impl LoanStatus {
    /// Both statuses, in reporting order.
    pub const ALL: [LoanStatus; 2] = [LoanStatus::ChargedOff, LoanStatus::FullyPaid];

    /// Label as it appears in the dataset.
    pub fn label(&self) -> &'static str {
        match self {
            LoanStatus::FullyPaid => "Fully Paid",
            LoanStatus::ChargedOff => "Charged Off",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Annual income bracket, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IncomeLevel {
    /// Below 12k.
    #[serde(rename = "0-12k")]
    UpTo12k,
    /// 12k to 47k.
    #[serde(rename = "12k-47k")]
    From12kTo47k,
    /// 47k to 100k.
    #[serde(rename = "47-100k")]
    From47kTo100k,
    /// 100k to 191k.
    #[serde(rename = "100k-191k")]
    From100kTo191k,
    /// 191k to 243k.
    #[serde(rename = "191k-243k")]
    From191kTo243k,
    /// 243k to 600k.
    #[serde(rename = "243k-600k")]
    From243kTo600k,
    /// 600k and above.
    #[serde(rename = "600k+")]
    Over600k,
}

impl IncomeLevel {
    /// All brackets in display order.
    pub const ALL: [IncomeLevel; 7] = [
        IncomeLevel::UpTo12k,
        IncomeLevel::From12kTo47k,
        IncomeLevel::From47kTo100k,
        IncomeLevel::From100kTo191k,
        IncomeLevel::From191kTo243k,
        IncomeLevel::From243kTo600k,
        IncomeLevel::Over600k,
    ];

    /// Bracket for an annual income. Lower bounds are inclusive.
    pub fn from_income(annual_inc: f64) -> Self {
        match annual_inc {
            x if x < 12_000.0 => IncomeLevel::UpTo12k,
            x if x < 47_000.0 => IncomeLevel::From12kTo47k,
            x if x < 100_000.0 => IncomeLevel::From47kTo100k,
            x if x < 191_000.0 => IncomeLevel::From100kTo191k,
            x if x < 243_000.0 => IncomeLevel::From191kTo243k,
            x if x < 600_000.0 => IncomeLevel::From243kTo600k,
            _ => IncomeLevel::Over600k,
        }
    }

    /// Label as it appears in the dataset.
    pub fn label(&self) -> &'static str {
        match self {
            IncomeLevel::UpTo12k => "0-12k",
            IncomeLevel::From12kTo47k => "12k-47k",
            IncomeLevel::From47kTo100k => "47-100k",
            IncomeLevel::From100kTo191k => "100k-191k",
            IncomeLevel::From191kTo243k => "191k-243k",
            IncomeLevel::From243kTo600k => "243k-600k",
            IncomeLevel::Over600k => "600k+",
        }
    }
}

impl fmt::Display for IncomeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Numeric loan attribute that can be compared between statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    /// Debt-to-income ratio (`dti`).
    #[serde(rename = "dti")]
    Dti,
    /// Self-reported annual income (`annual_inc`).
    #[serde(rename = "annual_inc")]
    AnnualIncome,
}

impl Column {
    /// Column name in the dataset.
    pub fn name(&self) -> &'static str {
        match self {
            Column::Dti => "dti",
            Column::AnnualIncome => "annual_inc",
        }
    }

    /// Read this column from a record.
    pub fn value(&self, record: &LoanRecord) -> f64 {
        match self {
            Column::Dti => record.dti,
            Column::AnnualIncome => record.annual_inc,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dti" => Ok(Column::Dti),
            "annual_inc" => Ok(Column::AnnualIncome),
            other => Err(DataError::UnknownColumn(other.to_string())),
        }
    }
}

/// One loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    /// Final status.
    pub loan_status: LoanStatus,
    /// Debt-to-income ratio, in percent.
    pub dti: f64,
    /// Annual income.
    pub annual_inc: f64,
    /// Pre-computed income bracket, if the dataset carries one.
    #[serde(default)]
    pub annual_inc_lvl: Option<IncomeLevel>,
}

impl LoanRecord {
    /// Create a record without a pre-computed bracket.
    pub fn new(loan_status: LoanStatus, dti: f64, annual_inc: f64) -> Self {
        Self {
            loan_status,
            dti,
            annual_inc,
            annual_inc_lvl: None,
        }
    }

    /// The dataset's bracket, or one derived from `annual_inc`.
    pub fn income_level(&self) -> IncomeLevel {
        self.annual_inc_lvl
            .unwrap_or_else(|| IncomeLevel::from_income(self.annual_inc))
    }
}

/// Values of one column split by loan status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusGroups {
    /// Values from charged-off loans.
    pub charged_off: Vec<f64>,
    /// Values from fully paid loans.
    pub fully_paid: Vec<f64>,
}

impl StatusGroups {
    /// Values for one status.
    pub fn get(&self, status: LoanStatus) -> &[f64] {
        match status {
            LoanStatus::ChargedOff => &self.charged_off,
            LoanStatus::FullyPaid => &self.fully_paid,
        }
    }

    fn push(&mut self, status: LoanStatus, value: f64) {
        match status {
            LoanStatus::ChargedOff => self.charged_off.push(value),
            LoanStatus::FullyPaid => self.fully_paid.push(value),
        }
    }

    /// Total number of values across both statuses.
    pub fn len(&self) -> usize {
        self.charged_off.len() + self.fully_paid.len()
    }

    /// Whether both groups are empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Charged-off share within one income bracket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelRate {
    /// The bracket.
    pub level: IncomeLevel,
    /// Loans in the bracket.
    pub total: usize,
    /// Charged-off loans in the bracket.
    pub charged_off: usize,
}

impl LevelRate {
    /// Charged-off fraction, or `None` for an empty bracket.
    pub fn rate(&self) -> Option<f64> {
        (self.total > 0).then(|| self.charged_off as f64 / self.total as f64)
    }
}

/// Metadata about the data source.
#[derive(Debug, Clone, Default)]
pub struct DataMetadata {
    /// Original filename or identifier.
    pub source: Option<String>,
}

/// Loaded loan records, in file order.
#[derive(Debug, Clone, Default)]
pub struct LoanDataset {
    /// The records.
    pub records: Vec<LoanRecord>,

    /// Optional metadata about the data source.
    pub metadata: Option<DataMetadata>,
}

impl LoanDataset {
    /// Create a dataset from records.
    pub fn new(records: Vec<LoanRecord>) -> Self {
        Self {
            records,
            metadata: None,
        }
    }

    /// Create a dataset with metadata.
    pub fn with_metadata(records: Vec<LoanRecord>, metadata: DataMetadata) -> Self {
        Self {
            records,
            metadata: Some(metadata),
        }
    }

    /// Load a dataset from a CSV file.
    pub fn load(path: &std::path::Path) -> Result<Self, DataError> {
        load_loans(path)
    }

    /// Read a dataset from any CSV source.
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, DataError> {
        read_loans(reader).map(Self::new)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of loans with the given status.
    pub fn count(&self, status: LoanStatus) -> usize {
        self.records
            .iter()
            .filter(|r| r.loan_status == status)
            .count()
    }

    /// Check both statuses have at least `min_per_status` loans.
    pub fn validate(&self, min_per_status: usize) -> Result<(), DataError> {
        for status in LoanStatus::ALL {
            let got = self.count(status);
            if got < min_per_status {
                return Err(DataError::InsufficientSamples {
                    group: status.label().to_string(),
                    got,
                    min: min_per_status,
                });
            }
        }
        Ok(())
    }

    /// Values of `column` split by status, keeping records accepted by `keep`.
    pub fn values_by_status<F>(&self, column: Column, keep: F) -> StatusGroups
    where
        F: Fn(&LoanRecord) -> bool,
    {
        let mut groups = StatusGroups::default();
        for record in self.records.iter().filter(|r| keep(r)) {
            groups.push(record.loan_status, column.value(record));
        }
        groups
    }

    /// DTI split by status, restricted to `dti < max_dti`.
    pub fn dti_by_status(&self, max_dti: f64) -> StatusGroups {
        self.values_by_status(Column::Dti, |r| r.dti < max_dti)
    }

    /// Annual income split by status.
    pub fn income_by_status(&self) -> StatusGroups {
        self.values_by_status(Column::AnnualIncome, |_| true)
    }

    /// DTI split by income bracket and status, in bracket order.
    ///
    /// Every bracket is listed, including empty ones.
    pub fn dti_by_level_and_status(&self) -> Vec<(IncomeLevel, StatusGroups)> {
        let mut cells: Vec<(IncomeLevel, StatusGroups)> = IncomeLevel::ALL
            .iter()
            .map(|&level| (level, StatusGroups::default()))
            .collect();
        for record in &self.records {
            // ALL is in declaration order, so the discriminant is the index
            let idx = record.income_level() as usize;
            cells[idx].1.push(record.loan_status, record.dti);
        }
        cells
    }

    /// Charged-off share per income bracket, in bracket order.
    pub fn charge_off_rate_by_level(&self) -> Vec<LevelRate> {
        let mut rates: Vec<LevelRate> = IncomeLevel::ALL
            .iter()
            .map(|&level| LevelRate {
                level,
                total: 0,
                charged_off: 0,
            })
            .collect();
        for record in &self.records {
            let rate = &mut rates[record.income_level() as usize];
            rate.total += 1;
            if record.loan_status == LoanStatus::ChargedOff {
                rate.charged_off += 1;
            }
        }
        rates
    }
}
