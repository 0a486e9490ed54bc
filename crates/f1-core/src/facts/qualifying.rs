use f1_ingest::RawTables;
use f1_model::{SourceTable, TableName, TableReport};
use f1_transform::{parse_integer, parse_lap_time};

use super::{FactBuilder, FactContext, FactKey};
use crate::columns::{ColumnValues, int_values, text_values};
use crate::error::Result;
use crate::keys::first_valid_ids;

/// `fact_qualifying`: keeps `qualifyId` and decodes the three session times.
pub struct QualifyingBuilder;

impl FactBuilder for QualifyingBuilder {
    fn table(&self) -> TableName {
        TableName::FactQualifying
    }

    fn source(&self) -> SourceTable {
        SourceTable::Qualifying
    }

    fn build(
        &self,
        raw: &RawTables,
        context: &FactContext<'_>,
        report: &mut TableReport,
    ) -> Result<Vec<ColumnValues>> {
        let data = raw.get(SourceTable::Qualifying);
        let ids = int_values(data, "qualifyId")?;
        let races = int_values(data, "raceId")?;
        let drivers = int_values(data, "driverId")?;
        let constructors = int_values(data, "constructorId")?;
        let positions = text_values(data, "position")?;
        let q1 = text_values(data, "q1")?;
        let q2 = text_values(data, "q2")?;
        let q3 = text_values(data, "q3")?;

        let mut qualify_id = Vec::new();
        let mut race_id = Vec::new();
        let mut driver_id = Vec::new();
        let mut constructor_id = Vec::new();
        let mut position = Vec::new();
        let mut q1_ms = Vec::new();
        let mut q2_ms = Vec::new();
        let mut q3_ms = Vec::new();

        for (row, id) in first_valid_ids(&ids, report) {
            let keys = [
                (FactKey::Race, races[row]),
                (FactKey::Driver, drivers[row]),
                (FactKey::Constructor, constructors[row]),
            ];
            let Some(resolved) = context.resolve_keys(&keys, report) else {
                continue;
            };
            qualify_id.push(id);
            race_id.push(resolved[0]);
            driver_id.push(resolved[1]);
            constructor_id.push(resolved[2]);
            position.push(parse_integer(positions[row].as_deref()));
            q1_ms.push(parse_lap_time(q1[row].as_deref()).unwrap_or(0));
            q2_ms.push(parse_lap_time(q2[row].as_deref()).unwrap_or(0));
            q3_ms.push(parse_lap_time(q3[row].as_deref()).unwrap_or(0));
        }

        Ok(vec![
            qualify_id.into(),
            race_id.into(),
            driver_id.into(),
            constructor_id.into(),
            position.into(),
            q1_ms.into(),
            q2_ms.into(),
            q3_ms.into(),
        ])
    }
}
