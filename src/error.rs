use thiserror::Error;

/// Errors raised while reading a pizza description.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("missing header line")]
    MissingHeader,

    #[error("header must have 4 fields (rows cols min_ingredient max_size), got {0}")]
    HeaderFields(usize),

    #[error("invalid {field} '{value}' in header")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{0} must be non-zero")]
    Zero(&'static str),

    #[error("grid of {rows}x{cols} cells is too large")]
    TooLarge { rows: usize, cols: usize },

    #[error("expected {expected} rows, got {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unrecognized topping '{ch}' at row {row}, column {col}")]
    UnknownTopping { ch: char, row: usize, col: usize },
}
