//! SQLite sink.

use std::path::{Path, PathBuf};

use f1_core::{Warehouse, WarehouseTable};
use f1_model::{ColumnSpec, TableName};
use polars::prelude::AnyValue;
use rusqlite::types::Value;
use rusqlite::{Connection, Transaction, params_from_iter};
use tracing::debug;

use crate::error::{LoadError, Result};
use crate::sink::{LoadSummary, WarehouseSink};

/// Loads the warehouse into a SQLite database in a single transaction.
#[derive(Debug, Clone)]
pub struct SqliteSink {
    path: PathBuf,
}

impl SqliteSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WarehouseSink for SqliteSink {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn load(&self, warehouse: &Warehouse) -> Result<LoadSummary> {
        let target = self.path.display().to_string();
        let mut conn = Connection::open(&self.path).map_err(LoadError::sqlite("open", &target))?;
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(LoadError::sqlite("configure", &target))?;
        let tx = conn
            .transaction()
            .map_err(LoadError::sqlite("begin", &target))?;
        replace_tables(&tx, warehouse)?;
        tx.commit().map_err(LoadError::sqlite("commit", &target))?;

        Ok(LoadSummary {
            sink: self.name(),
            target: self.path.clone(),
            tables: warehouse.tables().len(),
            rows: warehouse.total_rows(),
        })
    }
}

/// Drop, recreate and fill every warehouse table inside `tx`.
///
/// Facts are dropped before the dimensions they reference and every
/// dimension is filled before any fact.
pub fn replace_tables(tx: &Transaction<'_>, warehouse: &Warehouse) -> Result<()> {
    for name in TableName::LOAD_ORDER.iter().rev() {
        tx.execute_batch(&format!("DROP TABLE IF EXISTS {name};"))
            .map_err(LoadError::sqlite("drop", name))?;
    }
    for table in warehouse.tables() {
        tx.execute_batch(&create_table_sql(table.name))
            .map_err(LoadError::sqlite("create", table.name))?;
        let rows = insert_rows(tx, table)?;
        debug!(table = %table.name, rows, "table loaded");
    }
    Ok(())
}

/// `CREATE TABLE` statement with primary and foreign keys.
pub fn create_table_sql(name: TableName) -> String {
    let mut lines: Vec<String> = name.columns().iter().map(column_sql).collect();
    lines.push(format!("PRIMARY KEY ({})", name.primary_key()));
    for foreign_key in name.foreign_keys() {
        let referenced = foreign_key.references.primary_key();
        lines.push(format!(
            "FOREIGN KEY ({}) REFERENCES {} ({referenced})",
            foreign_key.column, foreign_key.references
        ));
    }
    format!("CREATE TABLE {name} (\n    {}\n);", lines.join(",\n    "))
}

fn column_sql(column: &ColumnSpec) -> String {
    let not_null = if column.nullable { "" } else { " NOT NULL" };
    format!("{} {}{not_null}", column.name, column.kind.sql_type())
}

fn insert_rows(tx: &Transaction<'_>, table: &WarehouseTable) -> Result<usize> {
    let columns = table.name.column_names();
    let placeholders = vec!["?"; columns.len()].join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({placeholders})",
        table.name,
        columns.join(", ")
    );
    let mut statement = tx
        .prepare(&sql)
        .map_err(LoadError::sqlite("prepare insert", table.name))?;

    let data = table.data.get_columns();
    let mut row = Vec::with_capacity(columns.len());
    for idx in 0..table.record_count() {
        row.clear();
        for column in data {
            row.push(sql_value(column.get(idx).unwrap_or(AnyValue::Null)));
        }
        statement
            .execute(params_from_iter(row.iter()))
            .map_err(LoadError::sqlite("insert", table.name))?;
    }
    Ok(table.record_count())
}

fn sql_value(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Int32(v) => Value::Integer(i64::from(v)),
        AnyValue::Int64(v) => Value::Integer(v),
        AnyValue::UInt32(v) => Value::Integer(i64::from(v)),
        AnyValue::Float32(v) => Value::Real(f64::from(v)),
        AnyValue::Float64(v) => Value::Real(v),
        AnyValue::Boolean(v) => Value::Integer(i64::from(v)),
        AnyValue::String(v) => Value::Text(v.to_string()),
        AnyValue::StringOwned(v) => Value::Text(v.to_string()),
        other => Value::Text(other.to_string()),
    }
}
