//! One ETL run: ingest, build, verify, load.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use f1_core::{run_pipeline, verify_integrity};
use f1_ingest::{IngestOptions, load_raw_tables};
use f1_load::{CsvSink, LoadSummary, Manifest, SqliteSink, WarehouseSink, load_warehouse};
use f1_model::{IntegrityReport, PipelineOptions, RunReport};
use tracing::{info, warn};

/// Everything a run needs to know.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub data_dir: PathBuf,
    pub options: PipelineOptions,
    pub sqlite: Option<PathBuf>,
    pub csv_dir: Option<PathBuf>,
    /// Build and verify only.
    pub dry_run: bool,
}

impl RunRequest {
    pub fn new(data_dir: impl Into<PathBuf>, options: PipelineOptions) -> Self {
        Self {
            data_dir: data_dir.into(),
            options,
            sqlite: None,
            csv_dir: None,
            dry_run: false,
        }
    }

    fn sinks(&self) -> Vec<Box<dyn WarehouseSink>> {
        let mut sinks: Vec<Box<dyn WarehouseSink>> = Vec::new();
        if let Some(path) = &self.sqlite {
            sinks.push(Box::new(SqliteSink::new(path.clone())));
        }
        if let Some(dir) = &self.csv_dir {
            sinks.push(Box::new(CsvSink::new(dir.clone())));
        }
        sinks
    }
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: RunReport,
    pub integrity: IntegrityReport,
    pub manifest: Manifest,
    pub loads: Vec<LoadSummary>,
    /// Loads were skipped because the warehouse failed verification.
    pub load_blocked: bool,
    pub dry_run: bool,
    pub duration_ms: u128,
}

impl RunOutcome {
    pub fn has_errors(&self) -> bool {
        !self.integrity.is_clean()
    }
}

/// Run the whole pipeline for `request`.
///
/// A warehouse that fails verification is never loaded: the outcome carries
/// the violations and `load_blocked` is set.
pub fn execute_run(request: &RunRequest) -> Result<RunOutcome> {
    let start = Instant::now();
    if let Some(csv_dir) = &request.csv_dir {
        ensure_outside(csv_dir, &request.data_dir)?;
    }
    let ingest = IngestOptions::from(&request.options);
    let raw = load_raw_tables(&request.data_dir, &ingest).with_context(|| {
        format!("read raw extracts from {}", request.data_dir.display())
    })?;
    let output = run_pipeline(&raw, &request.options)?;
    let integrity =
        verify_integrity(&output.warehouse).context("verify warehouse integrity")?;
    let manifest =
        Manifest::from_warehouse(&output.warehouse).context("compute table digests")?;

    let sinks = request.sinks();
    let mut loads = Vec::with_capacity(sinks.len());
    let mut load_blocked = false;
    if !integrity.is_clean() {
        for violation in &integrity.violations {
            warn!(%violation, "integrity violation");
        }
        if !sinks.is_empty() {
            warn!(
                violations = integrity.violation_count(),
                "warehouse failed verification, nothing was loaded"
            );
            load_blocked = true;
        }
    } else if !request.dry_run {
        for sink in &sinks {
            loads.push(load_warehouse(sink.as_ref(), &output.warehouse)?);
        }
    }

    let duration_ms = start.elapsed().as_millis();
    info!(
        rows = output.report.total_output_rows(),
        dropped = output.report.total_dropped(),
        violations = integrity.violation_count(),
        sinks = loads.len(),
        duration_ms,
        "run complete"
    );
    Ok(RunOutcome {
        report: output.report,
        integrity,
        manifest,
        loads,
        load_blocked,
        dry_run: request.dry_run,
        duration_ms,
    })
}

/// The CSV export replaces its whole directory, so it must not hold the extracts.
fn ensure_outside(csv_dir: &Path, data_dir: &Path) -> Result<()> {
    let resolve = |path: &Path| {
        path.canonicalize()
            .or_else(|_| std::path::absolute(path))
            .with_context(|| format!("resolve path {}", path.display()))
    };
    let csv_dir = resolve(csv_dir)?;
    let data_dir = resolve(data_dir)?;
    if data_dir.starts_with(&csv_dir) {
        bail!(
            "CSV output directory {} contains the data directory {}",
            csv_dir.display(),
            data_dir.display()
        );
    }
    Ok(())
}
