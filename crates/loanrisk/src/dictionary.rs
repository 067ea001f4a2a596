//! Column-description lookup for loan attributes.
//!
//! Backed by the Lending Club data dictionary (`lending_club_info.csv`),
//! which maps each attribute name (`LoanStatNew`) to a `Description`.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::config::DisplayOptions;
use crate::data::DataError;

/// Marker appended to truncated descriptions.
const ELLIPSIS: &str = "...";

#[derive(Debug, Deserialize)]
struct DictionaryRow {
    #[serde(rename = "LoanStatNew")]
    name: String,
    #[serde(rename = "Description")]
    description: String,
}

/// Attribute name → description, in file order.
#[derive(Debug, Clone, Default)]
pub struct FeatureDictionary {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl FeatureDictionary {
    /// Load the dictionary from a CSV file.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let dictionary = Self::from_reader(File::open(path)?)?;
        tracing::info!(
            source = %path.display(),
            entries = dictionary.len(),
            "loaded feature dictionary"
        );
        Ok(dictionary)
    }

    /// Parse the dictionary from any CSV reader.
    ///
    /// Requires `LoanStatNew` and `Description` columns; others are ignored.
    /// When a name repeats, the first description wins.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let mut csv_reader = ::csv::ReaderBuilder::new()
            .trim(::csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        for column in ["LoanStatNew", "Description"] {
            if !headers.iter().any(|h| h == column) {
                return Err(DataError::MissingColumn {
                    column: column.to_string(),
                    found: headers.iter().map(str::to_string).collect(),
                });
            }
        }

        let mut dictionary = Self::default();
        for row in csv_reader.deserialize::<DictionaryRow>() {
            let row = row?;
            dictionary.insert(row.name, row.description);
        }
        Ok(dictionary)
    }

    /// Build a dictionary from name/description pairs.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut dictionary = Self::default();
        for (name, description) in entries {
            dictionary.insert(name.into(), description.into());
        }
        dictionary
    }

    fn insert(&mut self, name: String, description: String) {
        if self.index.contains_key(&name) {
            tracing::warn!(column = %name, "duplicate dictionary entry ignored");
            return;
        }
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, description));
    }

    /// Description for `key`, or `None` if the attribute is unknown.
    pub fn describe(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&idx| self.entries[idx].1.as_str())
    }

    /// Description for `key`, truncated to `options.max_colwidth` characters.
    pub fn render(&self, key: &str, options: &DisplayOptions) -> Option<String> {
        self.describe(key)
            .map(|text| truncate(text, options.max_colwidth))
    }

    /// Attribute names in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Shorten `text` to at most `width` characters, ending in `...` when cut.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(&ELLIPSIS[..width.min(ELLIPSIS.len())]);
    out
}
