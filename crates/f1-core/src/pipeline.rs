//! End-to-end warehouse build: dimensions, then facts.

use std::time::Instant;

use anyhow::{Context, Result};
use f1_ingest::RawTables;
use f1_model::{PipelineOptions, RunReport};
use tracing::info;

use crate::dimensions::build_dimensions;
use crate::facts::build_facts;
use crate::warehouse::Warehouse;

/// A built warehouse and the row accounting of the run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub warehouse: Warehouse,
    pub report: RunReport,
}

/// Build every warehouse table from a raw snapshot.
///
/// Dimensions are built first and hand their identifier maps to the fact
/// builders. Nothing is written anywhere; persistence is the caller's job.
pub fn run_pipeline(raw: &RawTables, options: &PipelineOptions) -> Result<PipelineOutput> {
    let start = Instant::now();
    let mut report = RunReport::default();

    let dimensions =
        build_dimensions(raw, options, &mut report).context("build dimension tables")?;
    let facts = build_facts(raw, dimensions.registry(), options, &mut report)
        .context("build fact tables")?;

    let (mut tables, _registry) = dimensions.into_parts();
    tables.extend(facts);
    let warehouse = Warehouse::from_tables(tables).context("assemble warehouse")?;

    info!(
        tables = warehouse.tables().len(),
        rows = warehouse.total_rows(),
        dropped = report.total_dropped(),
        unresolved_keys = %options.unresolved_keys,
        duration_ms = start.elapsed().as_millis(),
        "warehouse built"
    );
    Ok(PipelineOutput { warehouse, report })
}
