//! Pipeline options from a TOML file and command-line overrides.
//!
//! ```toml
//! unresolved_keys = "sentinel"
//! pit_stop_join = "first"
//! sentinel_race_date = "1900-01-01"
//! placeholder_tables = ["status", "pit_stops", "results"]
//! ```
//!
//! Every key is optional. Flags given on the command line win over the file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use f1_model::{PipelineOptions, PitStopJoinPolicy, UnresolvedKeyPolicy};

/// Options set explicitly on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptionOverrides {
    pub unresolved_keys: Option<UnresolvedKeyPolicy>,
    pub pit_stop_join: Option<PitStopJoinPolicy>,
}

impl OptionOverrides {
    pub fn apply(self, mut options: PipelineOptions) -> PipelineOptions {
        if let Some(policy) = self.unresolved_keys {
            options.unresolved_keys = policy;
        }
        if let Some(policy) = self.pit_stop_join {
            options.pit_stop_join = policy;
        }
        options
    }
}

pub fn parse_options(text: &str) -> Result<PipelineOptions> {
    toml::from_str(text).context("parse pipeline options")
}

pub fn load_options_file(path: &Path) -> Result<PipelineOptions> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read config file {}", path.display()))?;
    parse_options(&text).with_context(|| format!("invalid config file {}", path.display()))
}

/// Defaults, then the config file if any, then command-line overrides.
pub fn resolve_options(
    config: Option<&Path>,
    overrides: OptionOverrides,
) -> Result<PipelineOptions> {
    let options = match config {
        Some(path) => load_options_file(path)?,
        None => PipelineOptions::default(),
    };
    Ok(overrides.apply(options))
}
