use f1_ingest::RawTables;
use f1_model::{SourceTable, TableName, TableReport};
use f1_transform::{
    integer_or_zero, parse_integer, parse_lap_time, parse_numeric, positions_gained, real_or_zero,
};

use super::{FactBuilder, FactContext, FactKey};
use crate::columns::{ColumnValues, int_values, text_values};
use crate::error::Result;
use crate::keys::first_valid_ids;

/// `fact_race_results`: keeps `resultId`, resolves four keys and derives
/// `positions_gained` before zero-filling the numeric measures.
pub struct RaceResultsBuilder;

impl FactBuilder for RaceResultsBuilder {
    fn table(&self) -> TableName {
        TableName::FactRaceResults
    }

    fn source(&self) -> SourceTable {
        SourceTable::Results
    }

    fn build(
        &self,
        raw: &RawTables,
        context: &FactContext<'_>,
        report: &mut TableReport,
    ) -> Result<Vec<ColumnValues>> {
        let data = raw.get(SourceTable::Results);
        let ids = int_values(data, "resultId")?;
        let races = int_values(data, "raceId")?;
        let drivers = int_values(data, "driverId")?;
        let constructors = int_values(data, "constructorId")?;
        let statuses = int_values(data, "statusId")?;
        let grids = text_values(data, "grid")?;
        let positions = text_values(data, "position")?;
        let points = text_values(data, "points")?;
        let laps = text_values(data, "laps")?;
        let millis = text_values(data, "milliseconds")?;
        let fastest_laps = text_values(data, "fastestLap")?;
        let ranks = text_values(data, "rank")?;
        let fastest_times = text_values(data, "fastestLapTime")?;
        let fastest_speeds = text_values(data, "fastestLapSpeed")?;

        let mut out = ResultColumns::default();
        for (row, id) in first_valid_ids(&ids, report) {
            let keys = [
                (FactKey::Race, races[row]),
                (FactKey::Driver, drivers[row]),
                (FactKey::Constructor, constructors[row]),
                (FactKey::Status, statuses[row]),
            ];
            let Some(resolved) = context.resolve_keys(&keys, report) else {
                continue;
            };
            let grid = grids[row].as_deref();
            let position = positions[row].as_deref();

            out.result_id.push(id);
            out.race_id.push(resolved[0]);
            out.driver_id.push(resolved[1]);
            out.constructor_id.push(resolved[2]);
            out.status_id.push(resolved[3]);
            out.position.push(parse_integer(position));
            out.grid.push(parse_integer(grid));
            out.positions_gained
                .push(positions_gained(parse_numeric(grid), parse_numeric(position)));
            out.points.push(real_or_zero(points[row].as_deref()));
            out.laps.push(integer_or_zero(laps[row].as_deref()));
            out.milliseconds.push(integer_or_zero(millis[row].as_deref()));
            out.fastest_lap.push(integer_or_zero(fastest_laps[row].as_deref()));
            out.rank.push(integer_or_zero(ranks[row].as_deref()));
            out.fastest_lap_time_ms
                .push(parse_lap_time(fastest_times[row].as_deref()).unwrap_or(0));
            out.fastest_lap_speed
                .push(real_or_zero(fastest_speeds[row].as_deref()));
        }
        Ok(out.into_values())
    }
}

#[derive(Default)]
struct ResultColumns {
    result_id: Vec<i64>,
    race_id: Vec<i64>,
    driver_id: Vec<i64>,
    constructor_id: Vec<i64>,
    status_id: Vec<i64>,
    position: Vec<Option<i64>>,
    grid: Vec<Option<i64>>,
    positions_gained: Vec<f64>,
    points: Vec<f64>,
    laps: Vec<i64>,
    milliseconds: Vec<i64>,
    fastest_lap: Vec<i64>,
    rank: Vec<i64>,
    fastest_lap_time_ms: Vec<i64>,
    fastest_lap_speed: Vec<f64>,
}

impl ResultColumns {
    fn into_values(self) -> Vec<ColumnValues> {
        vec![
            self.result_id.into(),
            self.race_id.into(),
            self.driver_id.into(),
            self.constructor_id.into(),
            self.status_id.into(),
            self.position.into(),
            self.grid.into(),
            self.positions_gained.into(),
            self.points.into(),
            self.laps.into(),
            self.milliseconds.into(),
            self.fastest_lap.into(),
            self.rank.into(),
            self.fastest_lap_time_ms.into(),
            self.fastest_lap_speed.into(),
        ]
    }
}
