//! Error types for result ingestion, aggregation and reporting.
//!
//! Per-file problems always carry the file name and the field or line that
//! could not be parsed, so a skipped or fatal file can be found and fixed.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A result file lacks an expected line, marker or token.
    #[error("{file}: missing or malformed {field}")]
    MalformedFile { file: String, field: String },

    /// A field that must be numeric failed conversion.
    #[error("{file}: {field} is not numeric: '{value}'")]
    NonNumericField {
        file: String,
        field: String,
        value: String,
    },

    /// The input directory produced no parsable rows.
    #[error("dataset {dataset}: no parsable result files in {}", .dir.display())]
    EmptyDataset { dataset: String, dir: PathBuf },

    #[error("unknown column `{0}`")]
    UnknownColumn(String),

    /// A measurement column holds a value that cannot be averaged.
    #[error("column `{column}` is not numeric (row {row}: '{value}')")]
    NonNumericColumn {
        column: String,
        row: usize,
        value: String,
    },

    #[error("row has {got} values, table has {expected} columns")]
    ArityMismatch { expected: usize, got: usize },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cache {}: {source}", .path.display())]
    Cache {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to render {}: {message}", .path.display())]
    Chart { path: PathBuf, message: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(file: &str, field: impl Into<String>) -> Self {
        Error::MalformedFile {
            file: file.to_string(),
            field: field.into(),
        }
    }

    pub(crate) fn non_numeric(file: &str, field: &str, value: &str) -> Self {
        Error::NonNumericField {
            file: file.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}
