//! Error types for raw extract ingestion.

use std::path::PathBuf;

use f1_model::SourceTable;
use thiserror::Error;

/// Errors that can occur while reading the raw extracts.
///
/// Every variant is fatal to a run: no transformation starts until all
/// extracts have been read.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("data directory {path} does not exist or is not a directory")]
    DirectoryNotFound { path: PathBuf },

    #[error("extract missing from data directory: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot open extract {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed record, e.g. an unterminated quote.
    #[error("malformed CSV in {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// No header row: the file is empty or holds only blank lines.
    #[error("extract {path} has no header row")]
    EmptyCsv { path: PathBuf },

    /// A column the pipeline needs is absent from the extract.
    #[error("required column '{column}' not found in {table} extract ({path})")]
    MissingColumn {
        table: SourceTable,
        column: String,
        path: PathBuf,
    },

    #[error("building raw frame failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
