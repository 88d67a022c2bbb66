use thiserror::Error;

/// Why an upload could not be turned into a price series.
///
/// Parsing is all-or-nothing: any of these means no series was produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unsupported file format ({})", .attempts.join("; "))]
    UnsupportedFormat { attempts: Vec<String> },

    #[error("the CSV does not have the expected columns (missing: {})", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("no row containing '{marker}' was found")]
    RowNotFound { marker: String },

    #[error("price at {cell} is not a number: '{raw}'")]
    NumericConversion { cell: String, raw: String },

    #[error("row {row} has an unreadable timestamp: '{raw}'")]
    InvalidTimestamp { row: usize, raw: String },

    #[error("empty or malformed input: {reason}")]
    EmptyOrMalformedInput { reason: String },
}

impl ParseError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ParseError::EmptyOrMalformedInput {
            reason: reason.into(),
        }
    }
}
