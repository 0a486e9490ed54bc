use std::collections::HashSet;

use f1_model::{DropReason, TableReport};

/// Rows that can carry a primary key: the id is present and this is its
/// first occurrence. Returns `(row index, id)` pairs in input order and
/// records every other row as dropped.
pub(crate) fn first_valid_ids(ids: &[Option<i64>], report: &mut TableReport) -> Vec<(usize, i64)> {
    let mut seen = HashSet::with_capacity(ids.len());
    let mut kept = Vec::with_capacity(ids.len());
    for (row, id) in ids.iter().enumerate() {
        match id {
            None => report.record_drop(DropReason::MissingId),
            Some(id) if !seen.insert(*id) => report.record_drop(DropReason::DuplicateId),
            Some(id) => kept.push((row, *id)),
        }
    }
    kept
}

/// Values at the given row indices.
pub(crate) fn pick<T: Clone>(values: &[Option<T>], rows: &[usize]) -> Vec<Option<T>> {
    rows.iter()
        .map(|row| values.get(*row).cloned().flatten())
        .collect()
}
