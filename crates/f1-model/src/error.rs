use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown source table: {0}")]
    UnknownSourceTable(String),
    #[error("unknown warehouse table: {0}")]
    UnknownTable(String),
    #[error("unknown {kind} policy: {value}")]
    UnknownPolicy { kind: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
