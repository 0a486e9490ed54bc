use f1_model::{Dimension, PipelineOptions, SourceTable};
use polars::prelude::DataFrame;

use super::DimensionBuilder;
use crate::columns::{ColumnValues, text_values};
use crate::error::Result;
use crate::keys::pick;

pub struct StatusBuilder;

impl DimensionBuilder for StatusBuilder {
    fn dimension(&self) -> Dimension {
        Dimension::Status
    }

    fn source(&self) -> SourceTable {
        SourceTable::Status
    }

    fn id_column(&self) -> &'static str {
        "statusId"
    }

    fn label_column(&self) -> Option<&'static str> {
        Some("status_description")
    }

    fn project(
        &self,
        data: &DataFrame,
        rows: &[usize],
        _options: &PipelineOptions,
    ) -> Result<Vec<ColumnValues>> {
        Ok(vec![pick(&text_values(data, "status")?, rows).into()])
    }
}
