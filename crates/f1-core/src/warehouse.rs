use f1_model::TableName;

use crate::error::{Result, TransformError};
use crate::frame::WarehouseTable;

/// The eight warehouse tables of one run, held in load order.
#[derive(Debug, Clone)]
pub struct Warehouse {
    tables: Vec<WarehouseTable>,
}

impl Warehouse {
    /// Assemble from built tables in any order. Every table must appear
    /// exactly once.
    pub fn from_tables(tables: Vec<WarehouseTable>) -> Result<Self> {
        let mut slots: Vec<Option<WarehouseTable>> = vec![None; TableName::LOAD_ORDER.len()];
        for table in tables {
            let index = load_index(table.name);
            if slots[index].is_some() {
                return Err(TransformError::DuplicateTable { table: table.name });
            }
            slots[index] = Some(table);
        }
        let mut ordered = Vec::with_capacity(slots.len());
        for (name, slot) in TableName::LOAD_ORDER.into_iter().zip(slots) {
            ordered.push(slot.ok_or(TransformError::MissingTable { table: name })?);
        }
        Ok(Self { tables: ordered })
    }

    pub fn table(&self, name: TableName) -> &WarehouseTable {
        &self.tables[load_index(name)]
    }

    /// Tables in load order: every dimension before any fact.
    pub fn tables(&self) -> &[WarehouseTable] {
        &self.tables
    }

    pub fn dimensions(&self) -> impl Iterator<Item = &WarehouseTable> {
        self.tables.iter().filter(|table| table.is_dimension())
    }

    pub fn facts(&self) -> impl Iterator<Item = &WarehouseTable> {
        self.tables.iter().filter(|table| !table.is_dimension())
    }

    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(WarehouseTable::record_count).sum()
    }
}

fn load_index(name: TableName) -> usize {
    TableName::LOAD_ORDER
        .iter()
        .position(|candidate| *candidate == name)
        .unwrap_or_default()
}
