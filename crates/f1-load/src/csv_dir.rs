//! CSV directory sink.

use std::fs;
use std::path::{Path, PathBuf};

use f1_core::Warehouse;
use tracing::debug;

use crate::error::{LoadError, Result};
use crate::manifest::{MANIFEST_FILE, Manifest};
use crate::render::render_csv;
use crate::sink::{LoadSummary, WarehouseSink};

/// Writes one `<table>.csv` per table plus `manifest.json`.
///
/// Files are written to a staging directory beside the target, which is
/// then renamed into place. The previous directory is kept until the rename
/// succeeds. An existing target is only replaced if it is empty or holds a
/// manifest from an earlier export.
#[derive(Debug, Clone)]
pub struct CsvSink {
    dir: PathBuf,
}

impl CsvSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let name = self
            .dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "warehouse".to_string());
        self.dir.with_file_name(format!(".{name}.{suffix}"))
    }
}

impl WarehouseSink for CsvSink {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn load(&self, warehouse: &Warehouse) -> Result<LoadSummary> {
        ensure_replaceable(&self.dir)?;
        if let Some(parent) = self.dir.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(LoadError::io("create directory", parent))?;
        }
        let staging = self.sibling("staging");
        if staging.exists() {
            fs::remove_dir_all(&staging).map_err(LoadError::io("remove", &staging))?;
        }
        fs::create_dir_all(&staging).map_err(LoadError::io("create directory", &staging))?;

        for table in warehouse.tables() {
            let path = staging.join(format!("{}.csv", table.name));
            fs::write(&path, render_csv(table)?).map_err(LoadError::io("write", &path))?;
            debug!(table = %table.name, rows = table.record_count(), "table written");
        }
        Manifest::from_warehouse(warehouse)?.write(&staging.join(MANIFEST_FILE))?;

        swap_into_place(&staging, &self.dir, &self.sibling("previous"))?;
        Ok(LoadSummary {
            sink: self.name(),
            target: self.dir.clone(),
            tables: warehouse.tables().len(),
            rows: warehouse.total_rows(),
        })
    }
}

/// Fail unless `dir` is absent, empty, or a previous export.
fn ensure_replaceable(dir: &Path) -> Result<()> {
    let unmanaged = || LoadError::UnmanagedDirectory {
        path: dir.to_path_buf(),
        manifest: MANIFEST_FILE,
    };
    if !dir.exists() {
        return Ok(());
    }
    if !dir.is_dir() {
        return Err(unmanaged());
    }
    if dir.join(MANIFEST_FILE).is_file() {
        return Ok(());
    }
    let mut entries = fs::read_dir(dir).map_err(LoadError::io("read directory", dir))?;
    if entries.next().is_some() {
        return Err(unmanaged());
    }
    Ok(())
}

/// Replace `target` with `staging`, keeping `target` at `backup` until the
/// new directory is in place.
fn swap_into_place(staging: &Path, target: &Path, backup: &Path) -> Result<()> {
    if backup.exists() {
        fs::remove_dir_all(backup).map_err(LoadError::io("remove", backup))?;
    }
    let had_previous = target.exists();
    if had_previous {
        fs::rename(target, backup).map_err(LoadError::io("move aside", target))?;
    }
    if let Err(source) = fs::rename(staging, target) {
        if had_previous {
            fs::rename(backup, target).map_err(LoadError::io("restore", backup))?;
        }
        return Err(LoadError::AtomicSwapFailed {
            staging: staging.to_path_buf(),
            target: target.to_path_buf(),
            source,
        });
    }
    if had_previous {
        fs::remove_dir_all(backup).map_err(LoadError::io("remove", backup))?;
    }
    Ok(())
}
