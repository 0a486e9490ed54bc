//! Raw source extracts read by the pipeline.
//!
//! Each source table is one CSV file in the data directory. Column names use
//! the original dataset's camelCase naming; only the columns listed in
//! [`SourceTable::required_columns`] are read, everything else is ignored.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Literal placeholder the raw dataset uses for "no value".
pub const NULL_PLACEHOLDER: &str = "\\N";

/// A raw input table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTable {
    Drivers,
    Constructors,
    Circuits,
    Races,
    Status,
    Qualifying,
    PitStops,
    Results,
}

impl SourceTable {
    /// Every source table, dimensions first.
    pub const ALL: [SourceTable; 8] = [
        SourceTable::Drivers,
        SourceTable::Constructors,
        SourceTable::Circuits,
        SourceTable::Races,
        SourceTable::Status,
        SourceTable::Qualifying,
        SourceTable::PitStops,
        SourceTable::Results,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTable::Drivers => "drivers",
            SourceTable::Constructors => "constructors",
            SourceTable::Circuits => "circuits",
            SourceTable::Races => "races",
            SourceTable::Status => "status",
            SourceTable::Qualifying => "qualifying",
            SourceTable::PitStops => "pit_stops",
            SourceTable::Results => "results",
        }
    }

    /// File name of the extract inside the data directory.
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.as_str())
    }

    /// Minimum column set the pipeline reads from this table.
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            SourceTable::Drivers => &[
                "driverId",
                "driverRef",
                "forename",
                "surname",
                "dob",
                "nationality",
            ],
            SourceTable::Constructors => &["constructorId", "constructorRef", "name", "nationality"],
            SourceTable::Circuits => &["circuitId", "circuitRef", "name", "location", "country"],
            SourceTable::Races => &["raceId", "year", "round", "circuitId", "name", "date", "time"],
            SourceTable::Status => &["statusId", "status"],
            SourceTable::Qualifying => &[
                "qualifyId",
                "raceId",
                "driverId",
                "constructorId",
                "q1",
                "q2",
                "q3",
                "position",
            ],
            SourceTable::PitStops => &["raceId", "driverId", "stop", "lap", "milliseconds"],
            SourceTable::Results => &[
                "resultId",
                "raceId",
                "driverId",
                "constructorId",
                "statusId",
                "grid",
                "position",
                "points",
                "laps",
                "milliseconds",
                "fastestLap",
                "rank",
                "fastestLapTime",
                "fastestLapSpeed",
            ],
        }
    }

    /// Tables where the raw dataset writes [`NULL_PLACEHOLDER`] for missing values.
    pub fn default_placeholder_tables() -> [SourceTable; 3] {
        [SourceTable::Status, SourceTable::PitStops, SourceTable::Results]
    }
}

impl fmt::Display for SourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceTable {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        let normalized = normalized.trim_end_matches(".csv");
        SourceTable::ALL
            .into_iter()
            .find(|table| table.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownSourceTable(s.to_string()))
    }
}
