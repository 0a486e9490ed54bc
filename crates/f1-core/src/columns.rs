//! Row-wise column access on Polars frames.

use f1_ingest::{cell_f64, cell_i64, cell_text};
use polars::prelude::{AnyValue, Column, DataFrame, NamedFrom, Series};

use crate::error::Result;

/// Cell values of a column as optional trimmed text.
pub fn text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(cell_text(column.get(idx).unwrap_or(AnyValue::Null)));
    }
    Ok(values)
}

/// Cell values of a column as integers. Cells that are not integral are `None`.
pub fn int_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(cell_i64(column.get(idx).unwrap_or(AnyValue::Null)));
    }
    Ok(values)
}

pub fn real_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(cell_f64(column.get(idx).unwrap_or(AnyValue::Null)));
    }
    Ok(values)
}

/// Typed values for one output column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Integer(Vec<Option<i64>>),
    Real(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Integer(values) => values.len(),
            ColumnValues::Real(values) => values.len(),
            ColumnValues::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnValues::Integer(_) => "INTEGER",
            ColumnValues::Real(_) => "REAL",
            ColumnValues::Text(_) => "TEXT",
        }
    }

    pub fn into_column(self, name: &str) -> Column {
        let series = match self {
            ColumnValues::Integer(values) => Series::new(name.into(), values),
            ColumnValues::Real(values) => Series::new(name.into(), values),
            ColumnValues::Text(values) => Series::new(name.into(), values),
        };
        series.into()
    }
}

impl From<Vec<i64>> for ColumnValues {
    fn from(values: Vec<i64>) -> Self {
        ColumnValues::Integer(values.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<i64>>> for ColumnValues {
    fn from(values: Vec<Option<i64>>) -> Self {
        ColumnValues::Integer(values)
    }
}

impl From<Vec<f64>> for ColumnValues {
    fn from(values: Vec<f64>) -> Self {
        ColumnValues::Real(values.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<String>>> for ColumnValues {
    fn from(values: Vec<Option<String>>) -> Self {
        ColumnValues::Text(values)
    }
}
