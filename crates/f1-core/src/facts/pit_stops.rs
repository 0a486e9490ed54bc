use std::collections::{HashMap, HashSet};

use f1_ingest::RawTables;
use f1_model::{PitStopJoinPolicy, SourceTable, TableName, TableReport};
use f1_transform::{integer_or_zero, parse_integer};
use polars::prelude::DataFrame;
use tracing::warn;

use super::{FactBuilder, FactContext, FactKey};
use crate::columns::{ColumnValues, int_values, text_values};
use crate::error::{Result, TransformError};

/// `fact_pit_stops`: recovers each stop's constructor from the results
/// extract and assigns a fresh dense `pit_stop_id`.
pub struct PitStopsBuilder;

/// Original constructor ids of the results rows for each original
/// (race, driver) pair, in input order.
#[derive(Debug, Default)]
pub struct ConstructorLookup {
    entries: HashMap<(i64, i64), Vec<Option<i64>>>,
}

impl ConstructorLookup {
    pub fn from_results(results: &DataFrame) -> Result<Self> {
        let races = int_values(results, "raceId")?;
        let drivers = int_values(results, "driverId")?;
        let constructors = int_values(results, "constructorId")?;
        let mut entries: HashMap<(i64, i64), Vec<Option<i64>>> = HashMap::new();
        for ((race, driver), constructor) in races.iter().zip(&drivers).zip(&constructors) {
            if let (Some(race), Some(driver)) = (race, driver) {
                entries.entry((*race, *driver)).or_default().push(*constructor);
            }
        }
        Ok(Self { entries })
    }

    pub fn matches(&self, race: Option<i64>, driver: Option<i64>) -> &[Option<i64>] {
        match (race, driver) {
            (Some(race), Some(driver)) => self
                .entries
                .get(&(race, driver))
                .map(Vec::as_slice)
                .unwrap_or(&[]),
            _ => &[],
        }
    }
}

/// Distinct (race, driver) keys referenced by pit stops that match more than
/// one results row, in first-reference order.
fn ambiguous_keys(
    lookup: &ConstructorLookup,
    races: &[Option<i64>],
    drivers: &[Option<i64>],
) -> Vec<(i64, i64, usize)> {
    let mut seen = HashSet::new();
    let mut ambiguous = Vec::new();
    for (race, driver) in races.iter().zip(drivers) {
        let (Some(race), Some(driver)) = (*race, *driver) else {
            continue;
        };
        if !seen.insert((race, driver)) {
            continue;
        }
        let matches = lookup.matches(Some(race), Some(driver)).len();
        if matches > 1 {
            ambiguous.push((race, driver, matches));
        }
    }
    ambiguous
}

impl FactBuilder for PitStopsBuilder {
    fn table(&self) -> TableName {
        TableName::FactPitStops
    }

    fn source(&self) -> SourceTable {
        SourceTable::PitStops
    }

    fn build(
        &self,
        raw: &RawTables,
        context: &FactContext<'_>,
        report: &mut TableReport,
    ) -> Result<Vec<ColumnValues>> {
        let data = raw.get(SourceTable::PitStops);
        let races = int_values(data, "raceId")?;
        let drivers = int_values(data, "driverId")?;
        let stops = text_values(data, "stop")?;
        let laps = text_values(data, "lap")?;
        let millis = text_values(data, "milliseconds")?;

        let lookup = ConstructorLookup::from_results(raw.get(SourceTable::Results))?;
        let policy = context.options.pit_stop_join;
        let ambiguous = ambiguous_keys(&lookup, &races, &drivers);
        if let Some((race_id, driver_id, matches)) = ambiguous.first().copied() {
            match policy {
                PitStopJoinPolicy::Error => {
                    return Err(TransformError::AmbiguousPitStopJoin {
                        race_id,
                        driver_id,
                        matches,
                        ambiguous_keys: ambiguous.len(),
                    });
                }
                PitStopJoinPolicy::First | PitStopJoinPolicy::Expand => warn!(
                    policy = %policy,
                    ambiguous_keys = ambiguous.len(),
                    first_race_id = race_id,
                    first_driver_id = driver_id,
                    "pit stop constructor lookup is ambiguous"
                ),
            }
        }

        let mut race_id = Vec::new();
        let mut driver_id = Vec::new();
        let mut constructor_id = Vec::new();
        let mut lap = Vec::new();
        let mut stop_number = Vec::new();
        let mut duration_ms = Vec::new();

        for row in 0..data.height() {
            let matched = lookup.matches(races[row], drivers[row]);
            let candidates: &[Option<i64>] = match (policy, matched) {
                (_, []) => &[None],
                (PitStopJoinPolicy::Expand, all) => all,
                (_, [first, ..]) => std::slice::from_ref(first),
            };
            for constructor in candidates {
                let keys = [
                    (FactKey::Race, races[row]),
                    (FactKey::Driver, drivers[row]),
                    (FactKey::Constructor, *constructor),
                ];
                let Some(resolved) = context.resolve_keys(&keys, report) else {
                    continue;
                };
                race_id.push(resolved[0]);
                driver_id.push(resolved[1]);
                constructor_id.push(resolved[2]);
                lap.push(parse_integer(laps[row].as_deref()));
                stop_number.push(parse_integer(stops[row].as_deref()));
                duration_ms.push(integer_or_zero(millis[row].as_deref()));
            }
        }

        let pit_stop_id: Vec<i64> = (1..).take(race_id.len()).collect();
        Ok(vec![
            pit_stop_id.into(),
            race_id.into(),
            driver_id.into(),
            constructor_id.into(),
            lap.into(),
            stop_number.into(),
            duration_ms.into(),
        ])
    }
}
