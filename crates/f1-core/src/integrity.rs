//! Referential integrity checks over a built warehouse.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use f1_model::{Dimension, IntegrityReport, IntegrityViolation, KeyStrategy, TableName};
use tracing::{info, info_span, warn};

use crate::columns::int_values;
use crate::error::Result;
use crate::facts::UNKNOWN_KEY;
use crate::frame::WarehouseTable;
use crate::warehouse::Warehouse;

/// Check key uniqueness, key density and foreign-key coverage.
///
/// - every table's primary key is present and unique
/// - resequenced dimensions hold exactly `1..=n` (plus the key-0 "Unknown"
///   row when the dimension has one)
/// - every foreign key, including `dim_races.circuit_id`, exists in the
///   dimension it references
pub fn verify_integrity(warehouse: &Warehouse) -> Result<IntegrityReport> {
    let span = info_span!("verify");
    let _guard = span.enter();
    let start = Instant::now();

    let mut report = IntegrityReport::default();
    let mut dimension_keys: BTreeMap<TableName, BTreeSet<i64>> = BTreeMap::new();
    for table in warehouse.tables() {
        let keys = check_primary_key(table, &mut report)?;
        if table.is_dimension() {
            dimension_keys.insert(table.name, keys);
        }
    }
    for dimension in Dimension::ALL {
        if dimension.key_strategy() == KeyStrategy::Resequenced {
            let table = warehouse.table(dimension.table());
            check_contiguous(table, dimension, &mut report)?;
        }
    }
    for table in warehouse.tables() {
        check_foreign_keys(table, &dimension_keys, &mut report)?;
    }

    if report.is_clean() {
        info!(
            tables = warehouse.tables().len(),
            duration_ms = start.elapsed().as_millis(),
            "referential integrity verified"
        );
    } else {
        warn!(
            violations = report.violation_count(),
            "referential integrity violations found"
        );
    }
    Ok(report)
}

fn check_primary_key(
    table: &WarehouseTable,
    report: &mut IntegrityReport,
) -> Result<BTreeSet<i64>> {
    let column = table.name.primary_key();
    let mut keys = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    for (row, key) in int_values(&table.data, column)?.into_iter().enumerate() {
        match key {
            None => report.violations.push(IntegrityViolation::MissingKey {
                table: table.name,
                row,
                column: column.to_string(),
            }),
            Some(key) => {
                if !keys.insert(key) {
                    duplicates.insert(key);
                }
            }
        }
    }
    for key in duplicates {
        report.violations.push(IntegrityViolation::DuplicateKey {
            table: table.name,
            key,
        });
    }
    Ok(keys)
}

fn check_contiguous(
    table: &WarehouseTable,
    dimension: Dimension,
    report: &mut IntegrityReport,
) -> Result<()> {
    let mut keys: Vec<i64> = int_values(&table.data, table.name.primary_key())?
        .into_iter()
        .flatten()
        .collect();
    if dimension.unknown_label().is_some() && keys.first() == Some(&UNKNOWN_KEY) {
        keys.remove(0);
    }
    let expected_last = i64::try_from(keys.len()).unwrap_or(i64::MAX);
    let contiguous = keys.iter().copied().eq(1..=expected_last);
    if !contiguous {
        report.violations.push(IntegrityViolation::NonContiguousKeys {
            table: table.name,
            expected_first: 1,
            expected_last,
        });
    }
    Ok(())
}

fn check_foreign_keys(
    table: &WarehouseTable,
    dimension_keys: &BTreeMap<TableName, BTreeSet<i64>>,
    report: &mut IntegrityReport,
) -> Result<()> {
    for foreign_key in table.name.foreign_keys() {
        let nullable = table
            .name
            .columns()
            .iter()
            .any(|column| column.name == foreign_key.column && column.nullable);
        let empty = BTreeSet::new();
        let known = dimension_keys.get(&foreign_key.references).unwrap_or(&empty);
        let mut orphans: BTreeMap<i64, usize> = BTreeMap::new();
        for (row, value) in int_values(&table.data, foreign_key.column)?
            .into_iter()
            .enumerate()
        {
            match value {
                None if nullable => {}
                None => report.violations.push(IntegrityViolation::MissingKey {
                    table: table.name,
                    row,
                    column: foreign_key.column.to_string(),
                }),
                Some(value) if !known.contains(&value) => {
                    *orphans.entry(value).or_insert(0) += 1;
                }
                Some(_) => {}
            }
        }
        for (value, rows) in orphans {
            report.violations.push(IntegrityViolation::OrphanForeignKey {
                table: table.name,
                column: foreign_key.column.to_string(),
                references: foreign_key.references,
                value,
                rows,
            });
        }
    }
    Ok(())
}
