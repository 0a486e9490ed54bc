use f1_model::{Dimension, PipelineOptions, SourceTable};
use polars::prelude::DataFrame;

use super::DimensionBuilder;
use crate::columns::{ColumnValues, text_values};
use crate::error::Result;
use crate::keys::pick;

pub struct ConstructorsBuilder;

impl DimensionBuilder for ConstructorsBuilder {
    fn dimension(&self) -> Dimension {
        Dimension::Constructors
    }

    fn source(&self) -> SourceTable {
        SourceTable::Constructors
    }

    fn id_column(&self) -> &'static str {
        "constructorId"
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
            pick(&text_values(data, "constructorRef")?, rows).into(),
            pick(&text_values(data, "name")?, rows).into(),
            pick(&text_values(data, "nationality")?, rows).into(),
        ])
    }
}
