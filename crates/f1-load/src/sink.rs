use std::path::PathBuf;

use f1_core::Warehouse;

use crate::error::Result;

/// What a sink wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    pub sink: &'static str,
    pub target: PathBuf,
    pub tables: usize,
    pub rows: usize,
}

/// A destination for a complete warehouse.
///
/// A load replaces everything the target held before. It either succeeds
/// for every table or leaves the previous contents in place.
pub trait WarehouseSink {
    fn name(&self) -> &'static str;

    fn load(&self, warehouse: &Warehouse) -> Result<LoadSummary>;
}
