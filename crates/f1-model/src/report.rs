//! Per-run reporting: row accounting and referential integrity findings.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::table::TableName;

/// Why a raw row did not make it into a warehouse table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// The row's own identifier was missing or not an integer.
    MissingId,
    /// An earlier row already used the same identifier.
    DuplicateId,
    /// The identifier is the key of the "Unknown" row in sentinel mode.
    ReservedKey,
    UnresolvedRace,
    UnresolvedDriver,
    UnresolvedConstructor,
    UnresolvedStatus,
}

impl DropReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropReason::MissingId => "missing_id",
            DropReason::DuplicateId => "duplicate_id",
            DropReason::ReservedKey => "reserved_key",
            DropReason::UnresolvedRace => "unresolved_race",
            DropReason::UnresolvedDriver => "unresolved_driver",
            DropReason::UnresolvedConstructor => "unresolved_constructor",
            DropReason::UnresolvedStatus => "unresolved_status",
        }
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row accounting for one warehouse table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableReport {
    pub table: TableName,
    pub input_rows: usize,
    pub output_rows: usize,
    pub dropped: BTreeMap<DropReason, usize>,
    /// Foreign keys pointed at the "Unknown" row instead of dropping the row.
    pub sentinel_keys: usize,
}

impl TableReport {
    pub fn new(table: TableName, input_rows: usize) -> Self {
        Self {
            table,
            input_rows,
            output_rows: 0,
            dropped: BTreeMap::new(),
            sentinel_keys: 0,
        }
    }

    pub fn record_drop(&mut self, reason: DropReason) {
        *self.dropped.entry(reason).or_insert(0) += 1;
    }

    pub fn dropped_count(&self, reason: DropReason) -> usize {
        self.dropped.get(&reason).copied().unwrap_or(0)
    }

    pub fn total_dropped(&self) -> usize {
        self.dropped.values().sum()
    }
}

/// Row accounting for a whole run, in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub tables: Vec<TableReport>,
}

impl RunReport {
    pub fn push(&mut self, report: TableReport) {
        self.tables.push(report);
    }

    pub fn table(&self, name: TableName) -> Option<&TableReport> {
        self.tables.iter().find(|report| report.table == name)
    }

    pub fn total_output_rows(&self) -> usize {
        self.tables.iter().map(|report| report.output_rows).sum()
    }

    pub fn total_dropped(&self) -> usize {
        self.tables.iter().map(TableReport::total_dropped).sum()
    }
}

/// A broken warehouse invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrityViolation {
    DuplicateKey {
        table: TableName,
        key: i64,
    },
    /// A resequenced dimension's keys are not the dense sequence it should hold.
    NonContiguousKeys {
        table: TableName,
        expected_first: i64,
        expected_last: i64,
    },
    MissingKey {
        table: TableName,
        row: usize,
        column: String,
    },
    OrphanForeignKey {
        table: TableName,
        column: String,
        references: TableName,
        value: i64,
        rows: usize,
    },
}

impl fmt::Display for IntegrityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityViolation::DuplicateKey { table, key } => {
                write!(f, "{table}: duplicate key {key}")
            }
            IntegrityViolation::NonContiguousKeys {
                table,
                expected_first,
                expected_last,
            } => write!(
                f,
                "{table}: keys are not the contiguous range {expected_first}..={expected_last}"
            ),
            IntegrityViolation::MissingKey { table, row, column } => {
                write!(f, "{table}: row {row} has no value for {column}")
            }
            IntegrityViolation::OrphanForeignKey {
                table,
                column,
                references,
                value,
                rows,
            } => write!(
                f,
                "{table}.{column} = {value} not found in {references} ({rows} rows)"
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub violations: Vec<IntegrityViolation>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    pub fn for_table(&self, table: TableName) -> impl Iterator<Item = &IntegrityViolation> {
        self.violations.iter().filter(move |violation| match violation {
            IntegrityViolation::DuplicateKey { table: t, .. }
            | IntegrityViolation::NonContiguousKeys { table: t, .. }
            | IntegrityViolation::MissingKey { table: t, .. }
            | IntegrityViolation::OrphanForeignKey { table: t, .. } => *t == table,
        })
    }
}
