//! Dimension builders.
//!
//! Each builder cleans one raw entity (rows without an id are dropped, then
//! duplicate ids keep their first row), assigns warehouse keys and returns
//! the original-to-surrogate map alongside the table. Keys are either a
//! dense sequence from 1 in surviving input order or the original id,
//! depending on the dimension's [`KeyStrategy`]. With sentinel keys, an
//! original id equal to the Unknown row's key 0 is dropped as reserved.

mod circuits;
mod constructors;
mod drivers;
mod races;
mod status;

use std::time::Instant;

use f1_ingest::RawTables;
use f1_model::{
    ColumnSpec, Dimension, DropReason, KeyStrategy, PipelineOptions, RunReport,
    SourceTable, TableName, TableReport,
};
use polars::prelude::DataFrame;
use tracing::{debug, info_span, warn};

use crate::columns::{ColumnValues, int_values};
use crate::error::Result;
use crate::facts::UNKNOWN_KEY;
use crate::frame::WarehouseTable;
use crate::idmap::{IdentifierMap, IdentifierRegistry};
use crate::keys::first_valid_ids;

pub use circuits::CircuitsBuilder;
pub use constructors::ConstructorsBuilder;
pub use drivers::DriversBuilder;
pub use races::RacesBuilder;
pub use status::StatusBuilder;

/// Cleaning and projection rules for one dimension.
pub trait DimensionBuilder {
    fn dimension(&self) -> Dimension;

    fn source(&self) -> SourceTable;

    /// Raw column holding the original identifier.
    fn id_column(&self) -> &'static str;

    /// Column that carries the "Unknown" label in sentinel mode.
    fn label_column(&self) -> Option<&'static str> {
        None
    }

    /// Non-key output columns for the surviving raw rows, in schema order.
    fn project(
        &self,
        data: &DataFrame,
        rows: &[usize],
        options: &PipelineOptions,
    ) -> Result<Vec<ColumnValues>>;
}

/// A built dimension table with its identifier map and row accounting.
#[derive(Debug, Clone)]
pub struct DimensionOutput {
    pub table: WarehouseTable,
    pub map: IdentifierMap,
    pub report: TableReport,
}

/// Run one builder against its raw entity.
pub fn build_dimension<B: DimensionBuilder>(
    builder: &B,
    raw: &RawTables,
    options: &PipelineOptions,
) -> Result<DimensionOutput> {
    let start = Instant::now();
    let dimension = builder.dimension();
    let name = dimension.table();
    let data = raw.get(builder.source());
    let mut report = TableReport::new(name, data.height());

    let ids = int_values(data, builder.id_column())?;
    let mut kept = first_valid_ids(&ids, &mut report);
    let has_unknown_row = options.uses_sentinel_keys() && dimension.unknown_label().is_some();
    if has_unknown_row && dimension.key_strategy() == KeyStrategy::Original {
        kept.retain(|(_, id)| {
            let reserved = *id == UNKNOWN_KEY;
            if reserved {
                report.record_drop(DropReason::ReservedKey);
            }
            !reserved
        });
    }
    let rows: Vec<usize> = kept.iter().map(|(row, _)| *row).collect();
    let keys: Vec<i64> = match dimension.key_strategy() {
        KeyStrategy::Resequenced => (1..).take(kept.len()).collect(),
        KeyStrategy::Original => kept.iter().map(|(_, id)| *id).collect(),
    };
    let map = IdentifierMap::from_pairs(
        dimension,
        kept.iter().map(|(_, id)| *id).zip(keys.iter().copied()),
    );

    let mut values = vec![ColumnValues::from(keys)];
    values.extend(builder.project(data, &rows, options)?);
    if has_unknown_row
        && let Some(label) = dimension.unknown_label()
    {
        prepend_unknown_row(&mut values, name.columns(), builder.label_column(), label);
    }
    let table = WarehouseTable::from_columns(name, values)?;
    report.output_rows = table.record_count();

    if report.total_dropped() > 0 {
        warn!(
            table = %name,
            missing_id = report.dropped_count(DropReason::MissingId),
            duplicate_id = report.dropped_count(DropReason::DuplicateId),
            reserved_key = report.dropped_count(DropReason::ReservedKey),
            "dimension rows dropped"
        );
    }
    debug!(
        table = %name,
        input_rows = report.input_rows,
        output_rows = report.output_rows,
        duration_ms = start.elapsed().as_millis(),
        "dimension built"
    );
    Ok(DimensionOutput { table, map, report })
}

/// Insert the key-0 "Unknown" row ahead of the built rows.
fn prepend_unknown_row(
    values: &mut [ColumnValues],
    specs: &[ColumnSpec],
    label_column: Option<&str>,
    label: &str,
) {
    for (index, (spec, column)) in specs.iter().zip(values.iter_mut()).enumerate() {
        match column {
            ColumnValues::Integer(cells) => cells.insert(0, (index == 0).then_some(0)),
            ColumnValues::Real(cells) => cells.insert(0, None),
            ColumnValues::Text(cells) => {
                let cell = if spec.name.ends_with("_ref") {
                    Some("unknown".to_string())
                } else if Some(spec.name) == label_column {
                    Some(label.to_string())
                } else {
                    None
                };
                cells.insert(0, cell);
            }
        }
    }
}

/// Every dimension table plus the registry of identifier maps.
///
/// Only [`build_dimensions`] produces this, so holding a registry means the
/// whole dimension phase has finished.
#[derive(Debug, Clone)]
pub struct DimensionSet {
    tables: Vec<WarehouseTable>,
    registry: IdentifierRegistry,
}

impl DimensionSet {
    pub fn registry(&self) -> &IdentifierRegistry {
        &self.registry
    }

    pub fn tables(&self) -> &[WarehouseTable] {
        &self.tables
    }

    pub fn table(&self, name: TableName) -> Option<&WarehouseTable> {
        self.tables.iter().find(|table| table.name == name)
    }

    pub fn into_parts(self) -> (Vec<WarehouseTable>, IdentifierRegistry) {
        (self.tables, self.registry)
    }
}

/// Build all five dimensions in load order.
pub fn build_dimensions(
    raw: &RawTables,
    options: &PipelineOptions,
    report: &mut RunReport,
) -> Result<DimensionSet> {
    let span = info_span!("dimensions");
    let _guard = span.enter();

    let drivers = build_dimension(&DriversBuilder, raw, options)?;
    let constructors = build_dimension(&ConstructorsBuilder, raw, options)?;
    let circuits = build_dimension(&CircuitsBuilder, raw, options)?;
    let races = build_dimension(&RacesBuilder, raw, options)?;
    let status = build_dimension(&StatusBuilder, raw, options)?;

    let mut tables = Vec::with_capacity(Dimension::ALL.len());
    let mut collect = |output: DimensionOutput| {
        report.push(output.report);
        tables.push(output.table);
        output.map
    };
    let registry = IdentifierRegistry::new(
        collect(drivers),
        collect(constructors),
        collect(circuits),
        collect(races),
        collect(status),
    );
    Ok(DimensionSet { tables, registry })
}
