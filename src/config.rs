//! Rotation configuration.
//!
//! Settings come from three layers, later layers overriding earlier ones:
//!
//! ```text
//! stock defaults  →  --config rotate.toml  →  command-line flags
//! ```
//!
//! Each layer is a sparse TOML table merged on top of the previous one with
//! [`merge_toml`]; the result is deserialized into [`RotateConfig`] and
//! validated.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [processing]
//! parallel = true           # Render rows on a thread pool
//! max_threads = 4           # Max worker threads (omit for auto = CPU cores)
//!
//! [output]
//! quality = 90              # JPEG quality (1-100)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::raster::{Execution, Quality};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Rotation settings loaded from a TOML file and command-line overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RotateConfig {
    /// Thread pool and row scheduling.
    pub processing: ProcessingConfig,
    /// Encoder settings.
    pub output: OutputConfig,
}

impl RotateConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.output.quality) {
            return Err(ConfigError::Validation(
                "output.quality must be 1-100".into(),
            ));
        }
        if self.processing.max_threads == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_threads must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn quality(&self) -> Quality {
        Quality::new(self.output.quality)
    }

    pub fn execution(&self) -> Execution {
        if self.processing.parallel {
            Execution::Parallel
        } else {
            Execution::Sequential
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Render output rows on the rayon pool. `false` renders on one thread.
    pub parallel: bool,
    /// Maximum number of worker threads.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_threads: Option<usize>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            max_threads: None,
        }
    }
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_threads.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Encoder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// JPEG quality, 1 = worst, 100 = best. Lossless formats ignore it.
    pub quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default().value(),
        }
    }
}

/// Command-line flags that override config file values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub max_threads: Option<usize>,
    pub sequential: bool,
    pub quality: Option<u32>,
}

impl CliOverrides {
    /// The flags as a sparse TOML table, or `None` when no flag was given.
    pub fn to_overlay(&self) -> Option<toml::Value> {
        let mut processing = toml::Table::new();
        if let Some(threads) = self.max_threads {
            processing.insert("max_threads".into(), toml::Value::Integer(threads as i64));
        }
        if self.sequential {
            processing.insert("parallel".into(), toml::Value::Boolean(false));
        }

        let mut output = toml::Table::new();
        if let Some(quality) = self.quality {
            output.insert("quality".into(), toml::Value::Integer(quality as i64));
        }

        let mut root = toml::Table::new();
        if !processing.is_empty() {
            root.insert("processing".into(), toml::Value::Table(processing));
        }
        if !output.is_empty() {
            root.insert("output".into(), toml::Value::Table(output));
        }
        (!root.is_empty()).then_some(toml::Value::Table(root))
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// Base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(RotateConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(value)
}

/// Merge overlays onto a base value in order, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<RotateConfig, ConfigError> {
    let merged = overlays.into_iter().fold(base, merge_toml);
    let config: RotateConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the effective config: stock defaults, then `path` if given, then
/// command-line overrides.
pub fn load_config(path: Option<&Path>, cli: &CliOverrides) -> Result<RotateConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let file = path.map(load_raw_config).transpose()?;
    resolve_config(base, file.into_iter().chain(cli.to_overlay()))
}

/// Returns a fully-commented stock config file with all keys and explanations.
///
/// Printed by `--print-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# raster-rotate configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Load with: raster-rotate --config rotate.toml <INPUT> <OUTPUT> <ANGLE>
# Command-line flags (--threads, --sequential, --quality) override this file.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Render output rows in parallel. Set to false for a single-threaded run.
parallel = true

# Maximum worker threads.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_threads = 4

# ---------------------------------------------------------------------------
# Output encoding
# ---------------------------------------------------------------------------
[output]
# JPEG quality (1 = worst, 100 = best). PNG, TIFF, WebP and BMP are lossless.
quality = 90
"##
}
