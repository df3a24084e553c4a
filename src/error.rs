//! Error types for plotgrid.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by [`PlotGrid`](crate::grid::PlotGrid) operations.
///
/// A failing draw call leaves the grid exactly as it was.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    /// Grid created with a zero row/column count or a zero pixel size.
    #[error("Invalid grid dimension: {what} must be positive")]
    InvalidDimension { what: &'static str },

    /// Position outside the grid bounds.
    #[error("Position ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// A record has no value for a requested column.
    #[error("Column '{column}' has no value in row {row}")]
    MissingColumn { column: String, row: usize },

    /// A present value could not be used as a number.
    #[error("Value '{value}' in column '{column}' at row {row} is not numeric")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },

    /// Histogram requested with zero bins.
    #[error("Histogram needs at least one bin")]
    InvalidBins,
}

impl GridError {
    pub(crate) fn missing_column(column: impl Into<String>, row: usize) -> Self {
        Self::MissingColumn {
            column: column.into(),
            row,
        }
    }
}

/// Errors raised while loading a table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON document that cannot be turned into rows.
    #[error("Unsupported JSON shape: {0}")]
    UnsupportedJson(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = GridError::OutOfRange {
            row: 3,
            col: 1,
            rows: 2,
            cols: 2,
        };
        assert_eq!(err.to_string(), "Position (3, 1) is outside the 2x2 grid");
    }

    #[test]
    fn test_missing_column_message() {
        let err = GridError::missing_column("age", 4);
        assert!(err.to_string().contains("'age'"));
        assert!(err.to_string().contains("row 4"));
    }
}
