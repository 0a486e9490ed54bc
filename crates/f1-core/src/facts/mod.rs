//! Fact builders.
//!
//! Foreign keys are translated through the identifier registry, never copied.
//! A row whose race does not resolve is always dropped. Unresolved driver,
//! constructor or status keys drop the row too, unless the run uses sentinel
//! keys, in which case they point at the key-0 "Unknown" dimension row.

mod pit_stops;
mod qualifying;
mod results;

use std::time::Instant;

use f1_ingest::RawTables;
use f1_model::{
    Dimension, DropReason, PipelineOptions, RunReport, SourceTable, TableName, TableReport,
};
use tracing::{debug, info_span, warn};

use crate::columns::ColumnValues;
use crate::error::Result;
use crate::frame::WarehouseTable;
use crate::idmap::IdentifierRegistry;

pub use pit_stops::PitStopsBuilder;
pub use qualifying::QualifyingBuilder;
pub use results::RaceResultsBuilder;

/// Warehouse key written for an unresolved reference in sentinel mode.
pub const UNKNOWN_KEY: i64 = 0;

/// A foreign key carried by fact rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactKey {
    Race,
    Driver,
    Constructor,
    Status,
}

impl FactKey {
    pub fn dimension(&self) -> Dimension {
        match self {
            FactKey::Race => Dimension::Races,
            FactKey::Driver => Dimension::Drivers,
            FactKey::Constructor => Dimension::Constructors,
            FactKey::Status => Dimension::Status,
        }
    }

    pub fn drop_reason(&self) -> DropReason {
        match self {
            FactKey::Race => DropReason::UnresolvedRace,
            FactKey::Driver => DropReason::UnresolvedDriver,
            FactKey::Constructor => DropReason::UnresolvedConstructor,
            FactKey::Status => DropReason::UnresolvedStatus,
        }
    }
}

/// Read-only inputs shared by the fact builders.
#[derive(Debug, Clone, Copy)]
pub struct FactContext<'a> {
    pub registry: &'a IdentifierRegistry,
    pub options: &'a PipelineOptions,
}

impl<'a> FactContext<'a> {
    pub fn new(registry: &'a IdentifierRegistry, options: &'a PipelineOptions) -> Self {
        Self { registry, options }
    }

    /// Translate one row's foreign keys, in the order given.
    ///
    /// Returns `None` and records the first failing key as the drop reason
    /// when the row cannot be kept.
    pub fn resolve_keys(
        &self,
        keys: &[(FactKey, Option<i64>)],
        report: &mut TableReport,
    ) -> Option<Vec<i64>> {
        let mut resolved = Vec::with_capacity(keys.len());
        let mut sentinels = 0;
        for (key, original) in keys {
            match self.registry.resolve(key.dimension(), *original) {
                Some(surrogate) => resolved.push(surrogate),
                None if self.allows_sentinel(*key) => {
                    resolved.push(UNKNOWN_KEY);
                    sentinels += 1;
                }
                None => {
                    report.record_drop(key.drop_reason());
                    return None;
                }
            }
        }
        report.sentinel_keys += sentinels;
        Some(resolved)
    }

    fn allows_sentinel(&self, key: FactKey) -> bool {
        self.options.uses_sentinel_keys() && key.dimension().unknown_label().is_some()
    }
}

/// Resolution and derivation rules for one fact table.
pub trait FactBuilder {
    fn table(&self) -> TableName;

    fn source(&self) -> SourceTable;

    /// Output columns in schema order, recording dropped rows in `report`.
    fn build(
        &self,
        raw: &RawTables,
        context: &FactContext<'_>,
        report: &mut TableReport,
    ) -> Result<Vec<ColumnValues>>;
}

/// Run one builder and account for its rows.
pub fn build_fact<B: FactBuilder>(
    builder: &B,
    raw: &RawTables,
    context: &FactContext<'_>,
) -> Result<(WarehouseTable, TableReport)> {
    let start = Instant::now();
    let name = builder.table();
    let mut report = TableReport::new(name, raw.row_count(builder.source()));
    let values = builder.build(raw, context, &mut report)?;
    let table = WarehouseTable::from_columns(name, values)?;
    report.output_rows = table.record_count();

    if report.total_dropped() > 0 {
        let dropped: Vec<String> = report
            .dropped
            .iter()
            .map(|(reason, count)| format!("{reason}={count}"))
            .collect();
        warn!(
            table = %name,
            dropped = report.total_dropped(),
            reasons = %dropped.join(","),
            "fact rows dropped"
        );
    }
    debug!(
        table = %name,
        input_rows = report.input_rows,
        output_rows = report.output_rows,
        sentinel_keys = report.sentinel_keys,
        duration_ms = start.elapsed().as_millis(),
        "fact built"
    );
    Ok((table, report))
}

/// Build all three fact tables in load order.
pub fn build_facts(
    raw: &RawTables,
    registry: &IdentifierRegistry,
    options: &PipelineOptions,
    report: &mut RunReport,
) -> Result<Vec<WarehouseTable>> {
    let span = info_span!("facts");
    let _guard = span.enter();
    let context = FactContext::new(registry, options);

    let mut tables = Vec::with_capacity(3);
    for (table, table_report) in [
        build_fact(&QualifyingBuilder, raw, &context)?,
        build_fact(&PitStopsBuilder, raw, &context)?,
        build_fact(&RaceResultsBuilder, raw, &context)?,
    ] {
        report.push(table_report);
        tables.push(table);
    }
    Ok(tables)
}
