//! Types produced by the spreadsheet decoder

use serde::{Deserialize, Serialize};
use std::fmt;

use super::DEFAULT_COLUMN;

/// Vendor goods code naming one catalog product in the external store.
///
/// Never empty. Duplicates are allowed and are processed independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Wrap a raw value, returning `None` for empty strings
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// What to do with data rows that carry no usable identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum RowPolicy {
    /// Leave the row out of the batch without a trace
    #[serde(rename = "drop")]
    #[value(name = "drop")]
    DropSilently,
    /// Leave the row out of the batch but list it as invalid
    #[default]
    #[serde(rename = "report")]
    #[value(name = "report")]
    ReportAsInvalid,
}

impl fmt::Display for RowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowPolicy::DropSilently => write!(f, "drop"),
            RowPolicy::ReportAsInvalid => write!(f, "report"),
        }
    }
}

/// Decoder settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Header text of the identifier column (matched after trimming)
    pub column: String,
    pub row_policy: RowPolicy,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            column: DEFAULT_COLUMN.to_string(),
            row_policy: RowPolicy::default(),
        }
    }
}

impl DecodeOptions {
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    pub fn with_row_policy(mut self, row_policy: RowPolicy) -> Self {
        self.row_policy = row_policy;
        self
    }
}

/// Why a data row contributed no identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    /// The header row has no identifier column
    MissingColumn,
    /// The identifier cell is blank, empty, zero or false
    EmptyValue,
    /// The identifier cell holds a spreadsheet error such as `#N/A`
    CellError,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::MissingColumn => write!(f, "identifier column missing"),
            InvalidReason::EmptyValue => write!(f, "empty identifier"),
            InvalidReason::CellError => write!(f, "cell contains an error value"),
        }
    }
}

/// A data row excluded from the batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidRow {
    /// 1-based row number as shown by spreadsheet applications
    pub row: u32,
    pub reason: InvalidReason,
}

/// Ordered identifiers decoded from one uploaded workbook
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedBatch {
    pub identifiers: Vec<Identifier>,
    /// Rows excluded from `identifiers`. Always empty under [`RowPolicy::DropSilently`].
    pub invalid_rows: Vec<InvalidRow>,
}

impl DecodedBatch {
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Identifier> {
        self.identifiers.iter()
    }
}

impl<'a> IntoIterator for &'a DecodedBatch {
    type Item = &'a Identifier;
    type IntoIter = std::slice::Iter<'a, Identifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.identifiers.iter()
    }
}
