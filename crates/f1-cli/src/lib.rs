//! CLI library components for the racing warehouse ETL.

pub mod config;
pub mod logging;
pub mod pipeline;
