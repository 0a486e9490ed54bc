//! Canonical CSV rendering of warehouse tables.

use f1_core::WarehouseTable;
use polars::prelude::{CsvWriter, SerWriter};

use crate::error::{LoadError, Result};

/// Render a table as CSV with a header row and empty cells for nulls.
///
/// The same table always renders to the same bytes, which is what the
/// manifest digests rely on.
pub fn render_csv(table: &WarehouseTable) -> Result<Vec<u8>> {
    let mut data = table.data.clone();
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .finish(&mut data)
        .map_err(|error| LoadError::CsvRender {
            table: table.name,
            message: error.to_string(),
        })?;
    Ok(buffer)
}
