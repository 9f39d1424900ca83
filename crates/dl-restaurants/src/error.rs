use dl_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("restaurant template line {line}: expected a Version row, found \"{found}\"")]
    MissingVersion { found: String, line: usize },

    #[error("restaurant template version \"{value}\" at line {line} is not supported")]
    UnsupportedVersion { value: String, line: usize },

    #[error("restaurant template has no header row")]
    MissingHeader,

    #[error("line {line}: missing route name")]
    MissingRouteName { line: usize },

    #[error("line {line}: restaurant \"{name}\" is not inside a route block")]
    OutsideRoute { name: String, line: usize },

    #[error("line {line}: missing restaurant name")]
    EmptyName { line: usize },

    #[error("line {line}: duplicate route entry for restaurant \"{name}\" (first seen at line {first_line})")]
    Duplicate {
        name:       String,
        line:       usize,
        first_line: usize,
    },

    #[error("line {line}: invalid start time \"{value}\" for restaurant \"{name}\"")]
    InvalidStartTime {
        name:  String,
        value: String,
        line:  usize,
    },

    #[error("line {line}: start time {value} for restaurant \"{name}\" is not on the {grid}-minute grid")]
    OffGrid {
        name:  String,
        value: String,
        grid:  u16,
        line:  usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
