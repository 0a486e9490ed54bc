#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::Path;

use f1_core::{WarehouseTable, int_values, real_values, text_values};
use f1_ingest::{CsvTable, RawTables, source_frame};
use f1_model::SourceTable;
use polars::prelude::DataFrame;

/// Parse a small comma-separated fixture the way the ingest layer would.
pub fn frame(table: SourceTable, text: &str) -> DataFrame {
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());
    let headers: Vec<String> = lines
        .next()
        .expect("fixture header")
        .split(',')
        .map(str::to_string)
        .collect();
    let rows: Vec<Vec<String>> = lines
        .map(|line| line.split(',').map(str::to_string).collect())
        .collect();
    let csv = CsvTable { headers, rows };
    let placeholder = SourceTable::default_placeholder_tables().contains(&table);
    source_frame(table, &csv, Path::new(&table.file_name()), placeholder).expect("source frame")
}

/// One driver, constructor, circuit, race and status; no facts.
pub struct Fixture {
    tables: BTreeMap<SourceTable, String>,
}

impl Fixture {
    pub fn new() -> Self {
        let mut tables = BTreeMap::new();
        let defaults = [
            (
                SourceTable::Drivers,
                "driverId,driverRef,forename,surname,dob,nationality\n\
                 1,hamilton,Lewis,Hamilton,1985-01-07,British",
            ),
            (
                SourceTable::Constructors,
                "constructorId,constructorRef,name,nationality\n1,mclaren,McLaren,British",
            ),
            (
                SourceTable::Circuits,
                "circuitId,circuitRef,name,location,country\n\
                 1,albert_park,Albert Park Grand Prix Circuit,Melbourne,Australia",
            ),
            (
                SourceTable::Races,
                "raceId,year,round,circuitId,name,date,time\n\
                 18,2008,1,1,Australian Grand Prix,2008-03-16,04:30:00",
            ),
            (SourceTable::Status, "statusId,status\n1,Finished"),
            (
                SourceTable::Qualifying,
                "qualifyId,raceId,driverId,constructorId,q1,q2,q3,position",
            ),
            (
                SourceTable::PitStops,
                "raceId,driverId,stop,lap,milliseconds",
            ),
            (
                SourceTable::Results,
                "resultId,raceId,driverId,constructorId,statusId,grid,position,points,laps,\
                 milliseconds,fastestLap,rank,fastestLapTime,fastestLapSpeed",
            ),
        ];
        for (table, text) in defaults {
            tables.insert(table, text.to_string());
        }
        Self { tables }
    }

    pub fn with(mut self, table: SourceTable, text: &str) -> Self {
        self.tables.insert(table, text.to_string());
        self
    }

    pub fn raw(&self) -> RawTables {
        let mut raw = RawTables::empty().expect("empty raw tables");
        for (table, text) in &self.tables {
            raw = raw
                .with_table(*table, frame(*table, text))
                .expect("fixture table");
        }
        raw
    }
}

pub fn ints(table: &WarehouseTable, column: &str) -> Vec<Option<i64>> {
    int_values(&table.data, column).expect("int column")
}

pub fn reals(table: &WarehouseTable, column: &str) -> Vec<Option<f64>> {
    real_values(&table.data, column).expect("real column")
}

pub fn texts(table: &WarehouseTable, column: &str) -> Vec<Option<String>> {
    text_values(&table.data, column).expect("text column")
}
