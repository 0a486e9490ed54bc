use f1_model::TableName;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Failures while building warehouse tables from raw extracts.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A pit stop's (race, driver) pair matches several results rows and the
    /// join policy forbids guessing.
    #[error(
        "pit stop constructor lookup is ambiguous: race {race_id}, driver {driver_id} \
         matches {matches} results rows ({ambiguous_keys} ambiguous keys in total)"
    )]
    AmbiguousPitStopJoin {
        race_id: i64,
        driver_id: i64,
        matches: usize,
        ambiguous_keys: usize,
    },

    #[error("warehouse is missing table {table}")]
    MissingTable { table: TableName },

    #[error("table {table} appears more than once")]
    DuplicateTable { table: TableName },

    #[error("table {table} has columns [{found}], expected [{expected}]")]
    SchemaMismatch {
        table: TableName,
        expected: String,
        found: String,
    },

    #[error("data frame error: {message}")]
    DataFrame { message: String },
}

impl From<PolarsError> for TransformError {
    fn from(error: PolarsError) -> Self {
        TransformError::DataFrame {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;
