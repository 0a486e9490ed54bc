//! Warehouse persistence.
//!
//! - **sqlite**: drop, create and fill every table in one SQLite transaction
//! - **csv_dir**: staged CSV export swapped into place
//! - **manifest**: row counts and SHA-256 digests of the canonical CSV rendering

pub mod csv_dir;
pub mod error;
pub mod manifest;
pub mod render;
pub mod sink;
pub mod sqlite;

use std::time::Instant;

use anyhow::{Context, Result};
use f1_core::Warehouse;
use tracing::{info, info_span};

pub use csv_dir::CsvSink;
pub use error::LoadError;
pub use manifest::{MANIFEST_FILE, Manifest, ManifestEntry, sha256_hex};
pub use render::render_csv;
pub use sink::{LoadSummary, WarehouseSink};
pub use sqlite::{SqliteSink, create_table_sql};

/// Load a warehouse through `sink`, dimensions first.
pub fn load_warehouse(sink: &dyn WarehouseSink, warehouse: &Warehouse) -> Result<LoadSummary> {
    let span = info_span!("load", sink = sink.name());
    let _guard = span.enter();
    let start = Instant::now();
    let summary = sink
        .load(warehouse)
        .with_context(|| format!("load warehouse into {} sink", sink.name()))?;
    info!(
        target_path = %summary.target.display(),
        tables = summary.tables,
        rows = summary.rows,
        duration_ms = start.elapsed().as_millis(),
        "warehouse loaded"
    );
    Ok(summary)
}
