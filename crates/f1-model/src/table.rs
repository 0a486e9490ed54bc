//! Warehouse table schemas.
//!
//! The warehouse is a star schema: five dimension tables keyed by surrogate
//! integers and three fact tables whose foreign keys reference them. Column
//! order here is the literal output order of every table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Storage type of a warehouse column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Integer,
    Real,
    Text,
}

impl ColumnKind {
    /// SQL type affinity used when creating tables.
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnKind::Integer => "INTEGER",
            ColumnKind::Real => "REAL",
            ColumnKind::Text => "TEXT",
        }
    }
}

/// One column of a warehouse table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub nullable: bool,
}

const fn key(name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        kind: ColumnKind::Integer,
        nullable: false,
    }
}

const fn int(name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        kind: ColumnKind::Integer,
        nullable: false,
    }
}

const fn opt_int(name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        kind: ColumnKind::Integer,
        nullable: true,
    }
}

const fn real(name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        kind: ColumnKind::Real,
        nullable: false,
    }
}

const fn text(name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        kind: ColumnKind::Text,
        nullable: true,
    }
}

const fn req_text(name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        kind: ColumnKind::Text,
        nullable: false,
    }
}

const DIM_DRIVERS: &[ColumnSpec] = &[
    key("driver_id"),
    text("driver_ref"),
    text("full_name"),
    text("dob"),
    text("nationality"),
];

const DIM_CONSTRUCTORS: &[ColumnSpec] = &[
    key("constructor_id"),
    text("constructor_ref"),
    text("name"),
    text("nationality"),
];

const DIM_CIRCUITS: &[ColumnSpec] = &[
    key("circuit_id"),
    text("circuit_ref"),
    text("name"),
    text("location"),
    text("country"),
];

const DIM_RACES: &[ColumnSpec] = &[
    key("race_id"),
    opt_int("year"),
    opt_int("round"),
    opt_int("circuit_id"),
    text("name"),
    req_text("date"),
    text("time"),
];

const DIM_STATUS: &[ColumnSpec] = &[key("status_id"), text("status_description")];

const FACT_QUALIFYING: &[ColumnSpec] = &[
    key("qualify_id"),
    key("race_id"),
    key("driver_id"),
    key("constructor_id"),
    opt_int("position"),
    int("q1_time_ms"),
    int("q2_time_ms"),
    int("q3_time_ms"),
];

const FACT_PIT_STOPS: &[ColumnSpec] = &[
    key("pit_stop_id"),
    key("race_id"),
    key("driver_id"),
    key("constructor_id"),
    opt_int("lap"),
    opt_int("stop_number"),
    int("duration_ms"),
];

const FACT_RACE_RESULTS: &[ColumnSpec] = &[
    key("result_id"),
    key("race_id"),
    key("driver_id"),
    key("constructor_id"),
    key("status_id"),
    opt_int("position"),
    opt_int("grid"),
    real("positions_gained"),
    real("points"),
    int("laps"),
    int("milliseconds"),
    int("fastest_lap"),
    int("rank"),
    int("fastest_lap_time_ms"),
    real("fastest_lap_speed"),
];

/// A foreign-key column and the dimension it references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub column: &'static str,
    pub references: TableName,
}

const fn fk(column: &'static str, references: TableName) -> ForeignKey {
    ForeignKey { column, references }
}

const DIM_RACES_FKS: &[ForeignKey] = &[fk("circuit_id", TableName::DimCircuits)];

const RACE_DRIVER_CONSTRUCTOR_FKS: &[ForeignKey] = &[
    fk("race_id", TableName::DimRaces),
    fk("driver_id", TableName::DimDrivers),
    fk("constructor_id", TableName::DimConstructors),
];

const FACT_RACE_RESULTS_FKS: &[ForeignKey] = &[
    fk("race_id", TableName::DimRaces),
    fk("driver_id", TableName::DimDrivers),
    fk("constructor_id", TableName::DimConstructors),
    fk("status_id", TableName::DimStatus),
];

/// An output table of the warehouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
    DimDrivers,
    DimConstructors,
    DimCircuits,
    DimRaces,
    DimStatus,
    FactQualifying,
    FactPitStops,
    FactRaceResults,
}

impl TableName {
    /// Mandatory load order: every dimension before any fact.
    pub const LOAD_ORDER: [TableName; 8] = [
        TableName::DimDrivers,
        TableName::DimConstructors,
        TableName::DimCircuits,
        TableName::DimRaces,
        TableName::DimStatus,
        TableName::FactQualifying,
        TableName::FactPitStops,
        TableName::FactRaceResults,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::DimDrivers => "dim_drivers",
            TableName::DimConstructors => "dim_constructors",
            TableName::DimCircuits => "dim_circuits",
            TableName::DimRaces => "dim_races",
            TableName::DimStatus => "dim_status",
            TableName::FactQualifying => "fact_qualifying",
            TableName::FactPitStops => "fact_pit_stops",
            TableName::FactRaceResults => "fact_race_results",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TableName::DimDrivers => "Drivers",
            TableName::DimConstructors => "Constructors",
            TableName::DimCircuits => "Circuits",
            TableName::DimRaces => "Races",
            TableName::DimStatus => "Finishing status codes",
            TableName::FactQualifying => "Qualifying results",
            TableName::FactPitStops => "Pit stops",
            TableName::FactRaceResults => "Race results",
        }
    }

    pub fn is_dimension(&self) -> bool {
        matches!(
            self,
            TableName::DimDrivers
                | TableName::DimConstructors
                | TableName::DimCircuits
                | TableName::DimRaces
                | TableName::DimStatus
        )
    }

    /// Columns in literal output order.
    pub fn columns(&self) -> &'static [ColumnSpec] {
        match self {
            TableName::DimDrivers => DIM_DRIVERS,
            TableName::DimConstructors => DIM_CONSTRUCTORS,
            TableName::DimCircuits => DIM_CIRCUITS,
            TableName::DimRaces => DIM_RACES,
            TableName::DimStatus => DIM_STATUS,
            TableName::FactQualifying => FACT_QUALIFYING,
            TableName::FactPitStops => FACT_PIT_STOPS,
            TableName::FactRaceResults => FACT_RACE_RESULTS,
        }
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns().iter().map(|column| column.name).collect()
    }

    /// The primary key is always the first column.
    pub fn primary_key(&self) -> &'static str {
        self.columns()[0].name
    }

    pub fn foreign_keys(&self) -> &'static [ForeignKey] {
        match self {
            TableName::DimRaces => DIM_RACES_FKS,
            TableName::FactQualifying | TableName::FactPitStops => {
                RACE_DRIVER_CONSTRUCTOR_FKS
            }
            TableName::FactRaceResults => FACT_RACE_RESULTS_FKS,
            _ => &[],
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableName {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        TableName::LOAD_ORDER
            .into_iter()
            .find(|table| table.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownTable(s.to_string()))
    }
}

/// How a dimension's warehouse key relates to its original identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStrategy {
    /// Dense surrogate sequence starting at 1 in surviving row order.
    Resequenced,
    /// The original identifier is kept as the warehouse key.
    Original,
}

/// A dimension entity and its identifier map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Drivers,
    Constructors,
    Circuits,
    Races,
    Status,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Drivers,
        Dimension::Constructors,
        Dimension::Circuits,
        Dimension::Races,
        Dimension::Status,
    ];

    pub fn table(&self) -> TableName {
        match self {
            Dimension::Drivers => TableName::DimDrivers,
            Dimension::Constructors => TableName::DimConstructors,
            Dimension::Circuits => TableName::DimCircuits,
            Dimension::Races => TableName::DimRaces,
            Dimension::Status => TableName::DimStatus,
        }
    }

    pub fn key_strategy(&self) -> KeyStrategy {
        match self {
            Dimension::Circuits | Dimension::Status => KeyStrategy::Original,
            Dimension::Drivers | Dimension::Constructors | Dimension::Races => {
                KeyStrategy::Resequenced
            }
        }
    }

    /// Name of the "Unknown" row added in sentinel mode, if this dimension has one.
    pub fn unknown_label(&self) -> Option<&'static str> {
        match self {
            Dimension::Drivers => Some("Unknown Driver"),
            Dimension::Constructors => Some("Unknown Constructor"),
            Dimension::Circuits => Some("Unknown Circuit"),
            Dimension::Status => Some("Unknown"),
            Dimension::Races => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Drivers => "drivers",
            Dimension::Constructors => "constructors",
            Dimension::Circuits => "circuits",
            Dimension::Races => "races",
            Dimension::Status => "status",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
