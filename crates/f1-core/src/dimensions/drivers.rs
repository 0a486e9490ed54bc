use f1_model::{Dimension, PipelineOptions, SourceTable};
use f1_transform::full_name;
use polars::prelude::DataFrame;

use super::DimensionBuilder;
use crate::columns::{ColumnValues, text_values};
use crate::error::Result;
use crate::keys::pick;

/// `dim_drivers`: resequenced, with `full_name` derived from forename and surname.
pub struct DriversBuilder;

impl DimensionBuilder for DriversBuilder {
    fn dimension(&self) -> Dimension {
        Dimension::Drivers
    }

    fn source(&self) -> SourceTable {
        SourceTable::Drivers
    }

    fn id_column(&self) -> &'static str {
        "driverId"
    }

    fn label_column(&self) -> Option<&'static str> {
        Some("full_name")
    }

    fn project(
        &self,
        data: &DataFrame,
        rows: &[usize],
        _options: &PipelineOptions,
    ) -> Result<Vec<ColumnValues>> {
        let forename = pick(&text_values(data, "forename")?, rows);
        let surname = pick(&text_values(data, "surname")?, rows);
        let names: Vec<Option<String>> = forename
            .iter()
            .zip(&surname)
            .map(|(forename, surname)| full_name(forename.as_deref(), surname.as_deref()))
            .collect();
        Ok(vec![
            pick(&text_values(data, "driverRef")?, rows).into(),
            names.into(),
            pick(&text_values(data, "dob")?, rows).into(),
            pick(&text_values(data, "nationality")?, rows).into(),
        ])
    }
}
