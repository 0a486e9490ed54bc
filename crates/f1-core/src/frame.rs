use f1_model::{ColumnKind, TableName};
use polars::prelude::{Column, DataFrame};

use crate::columns::ColumnValues;
use crate::error::{Result, TransformError};

/// A built warehouse table: its name and typed data in literal column order.
#[derive(Debug, Clone)]
pub struct WarehouseTable {
    pub name: TableName,
    pub data: DataFrame,
}

impl WarehouseTable {
    /// Assemble a table from one value vector per schema column, in order.
    pub fn from_columns(name: TableName, values: Vec<ColumnValues>) -> Result<Self> {
        let specs = name.columns();
        if values.len() != specs.len() {
            return Err(TransformError::SchemaMismatch {
                table: name,
                expected: name.column_names().join(", "),
                found: format!("{} columns", values.len()),
            });
        }
        let mut columns: Vec<Column> = Vec::with_capacity(specs.len());
        for (spec, column) in specs.iter().zip(values) {
            let matches_kind = matches!(
                (spec.kind, &column),
                (ColumnKind::Integer, ColumnValues::Integer(_))
                    | (ColumnKind::Real, ColumnValues::Real(_))
                    | (ColumnKind::Text, ColumnValues::Text(_))
            );
            if !matches_kind {
                return Err(TransformError::SchemaMismatch {
                    table: name,
                    expected: format!("{} as {}", spec.name, spec.kind.sql_type()),
                    found: format!("{} as {}", spec.name, column.sql_type()),
                });
            }
            columns.push(column.into_column(spec.name));
        }
        let data = DataFrame::new(columns)?;
        Ok(Self { name, data })
    }

    pub fn record_count(&self) -> usize {
        self.data.height()
    }

    pub fn is_dimension(&self) -> bool {
        self.name.is_dimension()
    }
}
