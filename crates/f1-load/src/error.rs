//! Load error types.

use std::path::PathBuf;

use f1_model::TableName;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("sqlite {operation} failed for {table}")]
    Sqlite {
        operation: &'static str,
        table: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to render {table} as CSV: {message}")]
    CsvRender { table: TableName, message: String },

    /// The staged output could not be moved into place. The previous output,
    /// if any, has been restored.
    #[error("failed to move {staging} into place at {target}")]
    AtomicSwapFailed {
        staging: PathBuf,
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The target holds files this sink did not write.
    #[error("refusing to replace {path}: it is not empty and has no {manifest} from a previous export")]
    UnmanagedDirectory {
        path: PathBuf,
        manifest: &'static str,
    },

    #[error("failed to serialize manifest")]
    Manifest {
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    pub(crate) fn io(
        operation: &'static str,
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| LoadError::Io {
            operation,
            path,
            source,
        }
    }

    pub(crate) fn sqlite(
        operation: &'static str,
        table: impl ToString,
    ) -> impl FnOnce(rusqlite::Error) -> Self {
        let table = table.to_string();
        move |source| LoadError::Sqlite {
            operation,
            table,
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;
