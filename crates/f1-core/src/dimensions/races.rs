use f1_model::{Dimension, PipelineOptions, SourceTable};
use f1_transform::{clean_race_date, format_iso_date, parse_integer};
use polars::prelude::DataFrame;
use tracing::debug;

use super::DimensionBuilder;
use crate::columns::{ColumnValues, int_values, text_values};
use crate::error::Result;
use crate::keys::pick;

/// `dim_races`: resequenced, with cleaned dates.
///
/// `circuit_id` is the raw circuit id. Circuits keep their original ids, so
/// no map lookup is needed; dangling references surface in the integrity
/// check instead.
pub struct RacesBuilder;

impl DimensionBuilder for RacesBuilder {
    fn dimension(&self) -> Dimension {
        Dimension::Races
    }

    fn source(&self) -> SourceTable {
        SourceTable::Races
    }

    fn id_column(&self) -> &'static str {
        "raceId"
    }

    fn project(
        &self,
        data: &DataFrame,
        rows: &[usize],
        options: &PipelineOptions,
    ) -> Result<Vec<ColumnValues>> {
        let integers = |name: &str| -> Result<Vec<Option<i64>>> {
            Ok(pick(&text_values(data, name)?, rows)
                .iter()
                .map(|value| parse_integer(value.as_deref()))
                .collect())
        };

        let mut substituted = 0usize;
        let dates: Vec<Option<String>> = pick(&text_values(data, "date")?, rows)
            .iter()
            .map(|value| {
                let cleaned = clean_race_date(value.as_deref(), options.sentinel_race_date);
                if cleaned.is_sentinel() {
                    substituted += 1;
                }
                Some(format_iso_date(cleaned.date()))
            })
            .collect();
        if substituted > 0 {
            debug!(
                rows = substituted,
                sentinel = %format_iso_date(options.sentinel_race_date),
                "race dates replaced by sentinel"
            );
        }

        Ok(vec![
            integers("year")?.into(),
            integers("round")?.into(),
            pick(&int_values(data, "circuitId")?, rows).into(),
            pick(&text_values(data, "name")?, rows).into(),
            dates.into(),
            pick(&text_values(data, "time")?, rows).into(),
        ])
    }
}
