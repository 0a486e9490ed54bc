//! Data model for the racing warehouse.
//!
//! - **source**: raw input tables and their required columns
//! - **table**: warehouse table schemas, keys and load order
//! - **options**: pipeline options and null/sentinel policies
//! - **report**: row accounting and integrity findings

pub mod error;
pub mod options;
pub mod report;
pub mod source;
pub mod table;

pub use error::{ModelError, Result};
pub use options::{
    PipelineOptions, PitStopJoinPolicy, UnresolvedKeyPolicy, default_sentinel_race_date,
};
pub use report::{DropReason, IntegrityReport, IntegrityViolation, RunReport, TableReport};
pub use source::{NULL_PLACEHOLDER, SourceTable};
pub use table::{ColumnKind, ColumnSpec, Dimension, ForeignKey, KeyStrategy, TableName};
