//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so tokenizer and header failures surface unchanged
//! through every layer.

use thiserror::Error;

/// Errors produced by the row tokenizer, header validation, and clock parsing.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid time \"{value}\": expected \"h:mm AM\", \"h:mm PM\" or \"HH:MM\"")]
    InvalidTime { value: String },

    #[error("line {line}: does not look like a header row")]
    NotAHeader { line: usize },

    #[error("line {line}: header row is missing columns: {columns}")]
    MissingColumns { line: usize, columns: String },

    #[error("line {line}: invalid {column} value \"{value}\", expected TRUE or FALSE")]
    InvalidBool {
        column: String,
        value:  String,
        line:   usize,
    },

    #[error("document is empty")]
    EmptyDocument,
}

/// Shorthand result type for `dl-core`.
pub type CoreResult<T> = Result<T, CoreError>;
