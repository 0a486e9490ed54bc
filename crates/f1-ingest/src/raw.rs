//! Raw extract loading.
//!
//! Every source table becomes a Polars `DataFrame` of nullable string columns
//! holding exactly the table's required columns, in the order declared by
//! [`SourceTable::required_columns`]. Empty cells are nulls; the `\N`
//! placeholder is a null only for the tables configured to use it.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use f1_model::{NULL_PLACEHOLDER, PipelineOptions, SourceTable};
use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use tracing::{debug, info, info_span};

use crate::csv_table::{CsvTable, read_csv_table};
use crate::error::{IngestError, Result};

/// Options controlling how raw cells are interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOptions {
    /// Source tables where `\N` is read as a missing value.
    pub placeholder_tables: BTreeSet<SourceTable>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            placeholder_tables: SourceTable::default_placeholder_tables()
                .into_iter()
                .collect(),
        }
    }
}

impl From<&PipelineOptions> for IngestOptions {
    fn from(options: &PipelineOptions) -> Self {
        Self {
            placeholder_tables: options.placeholder_tables.clone(),
        }
    }
}

impl IngestOptions {
    pub fn placeholder_is_null(&self, table: SourceTable) -> bool {
        self.placeholder_tables.contains(&table)
    }
}

/// The complete raw input snapshot of one run.
#[derive(Debug, Clone)]
pub struct RawTables {
    drivers: DataFrame,
    constructors: DataFrame,
    circuits: DataFrame,
    races: DataFrame,
    status: DataFrame,
    qualifying: DataFrame,
    pit_stops: DataFrame,
    results: DataFrame,
}

impl RawTables {
    /// A snapshot where every table is present with its required columns and no rows.
    pub fn empty() -> Result<Self> {
        let frame = |table: SourceTable| -> Result<DataFrame> {
            let empty = CsvTable {
                headers: table
                    .required_columns()
                    .iter()
                    .map(|name| (*name).to_string())
                    .collect(),
                rows: Vec::new(),
            };
            source_frame(table, &empty, Path::new(table.as_str()), false)
        };
        Ok(Self {
            drivers: frame(SourceTable::Drivers)?,
            constructors: frame(SourceTable::Constructors)?,
            circuits: frame(SourceTable::Circuits)?,
            races: frame(SourceTable::Races)?,
            status: frame(SourceTable::Status)?,
            qualifying: frame(SourceTable::Qualifying)?,
            pit_stops: frame(SourceTable::PitStops)?,
            results: frame(SourceTable::Results)?,
        })
    }

    /// Replace one table, checking that it carries the required columns.
    pub fn with_table(mut self, table: SourceTable, data: DataFrame) -> Result<Self> {
        for column in table.required_columns() {
            if data.column(column).is_err() {
                return Err(IngestError::MissingColumn {
                    table,
                    column: (*column).to_string(),
                    path: PathBuf::from(table.file_name()),
                });
            }
        }
        *self.slot_mut(table) = data;
        Ok(self)
    }

    pub fn get(&self, table: SourceTable) -> &DataFrame {
        match table {
            SourceTable::Drivers => &self.drivers,
            SourceTable::Constructors => &self.constructors,
            SourceTable::Circuits => &self.circuits,
            SourceTable::Races => &self.races,
            SourceTable::Status => &self.status,
            SourceTable::Qualifying => &self.qualifying,
            SourceTable::PitStops => &self.pit_stops,
            SourceTable::Results => &self.results,
        }
    }

    pub fn row_count(&self, table: SourceTable) -> usize {
        self.get(table).height()
    }

    fn slot_mut(&mut self, table: SourceTable) -> &mut DataFrame {
        match table {
            SourceTable::Drivers => &mut self.drivers,
            SourceTable::Constructors => &mut self.constructors,
            SourceTable::Circuits => &mut self.circuits,
            SourceTable::Races => &mut self.races,
            SourceTable::Status => &mut self.status,
            SourceTable::Qualifying => &mut self.qualifying,
            SourceTable::PitStops => &mut self.pit_stops,
            SourceTable::Results => &mut self.results,
        }
    }
}

/// Convert a text table into the raw frame for `table`.
///
/// Only the required columns are kept. Fails if any is absent.
pub fn source_frame(
    table: SourceTable,
    csv: &CsvTable,
    path: &Path,
    placeholder_is_null: bool,
) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(table.required_columns().len());
    for name in table.required_columns() {
        let index = csv
            .column_index(name)
            .ok_or_else(|| IngestError::MissingColumn {
                table,
                column: (*name).to_string(),
                path: path.to_path_buf(),
            })?;
        let values: Vec<Option<String>> = csv
            .column_values(index)
            .map(|value| raw_cell(value, placeholder_is_null))
            .collect();
        columns.push(Series::new((*name).into(), values).into());
    }
    let data = DataFrame::new(columns)?;
    Ok(data)
}

fn raw_cell(value: &str, placeholder_is_null: bool) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || (placeholder_is_null && trimmed == NULL_PLACEHOLDER) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Read one extract from the data directory.
pub fn read_source_table(
    data_dir: &Path,
    table: SourceTable,
    options: &IngestOptions,
) -> Result<DataFrame> {
    let path = data_dir.join(table.file_name());
    let start = Instant::now();
    let csv = read_csv_table(&path)?;
    let data = source_frame(table, &csv, &path, options.placeholder_is_null(table))?;
    debug!(
        table = %table,
        source_file = %path.display(),
        rows = data.height(),
        duration_ms = start.elapsed().as_millis(),
        "extract read"
    );
    Ok(data)
}

/// Read every extract. Any missing or unreadable file fails the whole load.
pub fn load_raw_tables(data_dir: &Path, options: &IngestOptions) -> Result<RawTables> {
    let span = info_span!("ingest", data_dir = %data_dir.display());
    let _guard = span.enter();
    if !data_dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: data_dir.to_path_buf(),
        });
    }
    let start = Instant::now();
    let mut raw = RawTables::empty()?;
    for table in SourceTable::ALL {
        let data = read_source_table(data_dir, table, options)?;
        *raw.slot_mut(table) = data;
    }
    info!(
        tables = SourceTable::ALL.len(),
        duration_ms = start.elapsed().as_millis(),
        "raw extracts loaded"
    );
    Ok(raw)
}
