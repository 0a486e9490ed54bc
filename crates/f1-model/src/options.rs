//! Pipeline options.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::source::SourceTable;

/// What happens to a fact row whose foreign key does not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedKeyPolicy {
    /// Drop the row.
    #[default]
    Drop,
    /// Point driver, constructor and status keys at an "Unknown" row with
    /// key 0. Rows with an unresolved race are still dropped.
    Sentinel,
}

impl UnresolvedKeyPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drop => "drop",
            Self::Sentinel => "sentinel",
        }
    }
}

impl fmt::Display for UnresolvedKeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnresolvedKeyPolicy {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "drop" => Ok(Self::Drop),
            "sentinel" | "unknown" => Ok(Self::Sentinel),
            _ => Err(ModelError::UnknownPolicy {
                kind: "unresolved key",
                value: s.to_string(),
            }),
        }
    }
}

/// How a pit stop picks its constructor when several results rows share the
/// same (race, driver) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitStopJoinPolicy {
    /// Fail the run.
    #[default]
    Error,
    /// Use the first matching results row in input order.
    First,
    /// Emit one pit-stop row per matching results row.
    Expand,
}

impl PitStopJoinPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::First => "first",
            Self::Expand => "expand",
        }
    }
}

impl fmt::Display for PitStopJoinPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PitStopJoinPolicy {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "first" => Ok(Self::First),
            "expand" => Ok(Self::Expand),
            _ => Err(ModelError::UnknownPolicy {
                kind: "pit stop join",
                value: s.to_string(),
            }),
        }
    }
}

/// Sentinel written to `dim_races.date` when the source date is missing or unparsable.
pub fn default_sentinel_race_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Options for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineOptions {
    pub unresolved_keys: UnresolvedKeyPolicy,
    pub pit_stop_join: PitStopJoinPolicy,
    pub sentinel_race_date: NaiveDate,
    /// Source tables where the `\N` placeholder is read as a missing value.
    pub placeholder_tables: BTreeSet<SourceTable>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            unresolved_keys: UnresolvedKeyPolicy::default(),
            pit_stop_join: PitStopJoinPolicy::default(),
            sentinel_race_date: default_sentinel_race_date(),
            placeholder_tables: SourceTable::default_placeholder_tables()
                .into_iter()
                .collect(),
        }
    }
}

impl PipelineOptions {
    #[must_use]
    pub fn with_unresolved_keys(mut self, policy: UnresolvedKeyPolicy) -> Self {
        self.unresolved_keys = policy;
        self
    }

    #[must_use]
    pub fn with_pit_stop_join(mut self, policy: PitStopJoinPolicy) -> Self {
        self.pit_stop_join = policy;
        self
    }

    #[must_use]
    pub fn with_sentinel_race_date(mut self, date: NaiveDate) -> Self {
        self.sentinel_race_date = date;
        self
    }

    pub fn uses_sentinel_keys(&self) -> bool {
        self.unresolved_keys == UnresolvedKeyPolicy::Sentinel
    }

    pub fn treats_placeholder_as_null(&self, table: SourceTable) -> bool {
        self.placeholder_tables.contains(&table)
    }
}
