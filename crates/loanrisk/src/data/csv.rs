//! CSV parsing for the loan dataset.
//!
//! Expected header (extra columns are ignored):
//!
//! ```csv
//! loan_status,dti,annual_inc,annual_inc_lvl
//! Fully Paid,18.2,65000,47-100k
//! Charged Off,27.9,38000,12k-47k
//! ```
//!
//! `annual_inc_lvl` is optional, either as a column or per row (empty field).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{DataError, DataMetadata, LoanDataset, LoanRecord};

/// Columns every dataset must carry.
const REQUIRED_COLUMNS: [&str; 3] = ["loan_status", "dti", "annual_inc"];

/// Load the loan dataset from a CSV file.
///
/// # Errors
/// Returns `DataError` if the file cannot be read, lacks a required column,
/// or holds a row that does not parse.
pub fn load_loans(path: &Path) -> Result<LoanDataset, DataError> {
    let file = File::open(path)?;
    let records = read_loans(file)?;

    tracing::info!(
        source = %path.display(),
        records = records.len(),
        "loaded loan dataset"
    );

    let metadata = DataMetadata {
        source: Some(path.to_string_lossy().to_string()),
    };
    Ok(LoanDataset::with_metadata(records, metadata))
}

/// Parse loan records from any CSV reader.
///
/// # Errors
/// Returns `DataError` on a missing column, malformed row, or a NaN/infinite
/// numeric field.
pub fn read_loans<R: Read>(reader: R) -> Result<Vec<LoanRecord>, DataError> {
    let mut csv_reader = ::csv::ReaderBuilder::new()
        .trim(::csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataError::MissingColumn {
                column: column.to_string(),
                found: headers.iter().map(str::to_string).collect(),
            });
        }
    }

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let record: LoanRecord = row.deserialize(Some(&headers))?;
        check_finite(line, "dti", record.dti)?;
        check_finite(line, "annual_inc", record.annual_inc)?;
        records.push(record);
    }

    tracing::debug!(records = records.len(), "parsed loan rows");
    Ok(records)
}

fn check_finite(line: u64, column: &str, value: f64) -> Result<(), DataError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DataError::InvalidValue {
            line,
            column: column.to_string(),
            value: value.to_string(),
        })
    }
}
