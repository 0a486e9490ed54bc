//! Run manifests: row counts and content digests per table.

use std::fs;
use std::path::Path;

use f1_core::Warehouse;
use f1_model::TableName;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{LoadError, Result};
use crate::render::render_csv;

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub table: TableName,
    pub rows: usize,
    /// Hex SHA-256 of the table's canonical CSV rendering.
    pub sha256: String,
}

/// Per-table digests of one build, in load order.
///
/// Two builds from identical input produce identical manifests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub tables: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn from_warehouse(warehouse: &Warehouse) -> Result<Self> {
        let mut tables = Vec::with_capacity(warehouse.tables().len());
        for table in warehouse.tables() {
            let bytes = render_csv(table)?;
            tables.push(ManifestEntry {
                table: table.name,
                rows: table.record_count(),
                sha256: sha256_hex(&bytes),
            });
        }
        Ok(Self { tables })
    }

    pub fn entry(&self, table: TableName) -> Option<&ManifestEntry> {
        self.tables.iter().find(|entry| entry.table == table)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|source| LoadError::Manifest { source })
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let mut json = self.to_json()?;
        json.push('\n');
        fs::write(path, json).map_err(LoadError::io("write", path))
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
