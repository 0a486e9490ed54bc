use f1_model::{Dimension, PipelineOptions, SourceTable};
use polars::prelude::DataFrame;

use super::DimensionBuilder;
use crate::columns::{ColumnValues, text_values};
use crate::error::Result;
use crate::keys::pick;

/// `dim_circuits` keeps the original circuit id as its key.
pub struct CircuitsBuilder;

impl DimensionBuilder for CircuitsBuilder {
    fn dimension(&self) -> Dimension {
        Dimension::Circuits
    }

    fn source(&self) -> SourceTable {
        SourceTable::Circuits
    }

    fn id_column(&self) -> &'static str {
        "circuitId"
    }

    fn label_column(&self) -> Option<&'static str> {
        Some("name")
    }

    fn project(
        &self,
        data: &DataFrame,
        rows: &[usize],
        _options: &PipelineOptions,
    ) -> Result<Vec<ColumnValues>> {
        Ok(vec![
            pick(&text_values(data, "circuitRef")?, rows).into(),
            pick(&text_values(data, "name")?, rows).into(),
            pick(&text_values(data, "location")?, rows).into(),
            pick(&text_values(data, "country")?, rows).into(),
        ])
    }
}
