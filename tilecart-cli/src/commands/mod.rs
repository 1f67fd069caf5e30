//! CLI command implementations.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (path, list, init, get, set)
//! - [`convert`] - Promote every tile's barcodes to global coordinates
//! - [`hexagon`] - Centroid table to hexagon polygons
//! - [`locate`] - Single-point conversion
//! - [`meta`] - Dataset survey and metadata export

pub mod config;
pub mod convert;
pub mod hexagon;
pub mod locate;
pub mod meta;

use std::path::PathBuf;

use clap::ValueEnum;
use tilecart::config::{config_file_path, ConfigFile};
use tilecart::mosaic::TileFailure;
use tilecart::pipeline::MosaicConfig;
use tilecart::promote::PromotionMode;

use crate::error::CliError;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub config: Option<PathBuf>,
    pub debug: bool,
}

impl GlobalArgs {
    /// Config file in effect: `--config` or the default location.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config_file_path)
    }

    pub fn load_config(&self) -> Result<ConfigFile, CliError> {
        Ok(ConfigFile::load_from(&self.config_path())?)
    }
}

/// Promotion mode as accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Place tiles by layout row and column
    FalseOrigin,
    /// Place tiles by the mosaic position encoded in the tile number
    TileRelative,
}

impl From<ModeArg> for PromotionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::FalseOrigin => PromotionMode::FalseOrigin,
            ModeArg::TileRelative => PromotionMode::TileRelative,
        }
    }
}

/// Command-line overrides for the mosaic settings in the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct MosaicOverrides {
    pub gap: Option<i64>,
    pub unit_scale: Option<f64>,
    pub mode: Option<ModeArg>,
    pub threads: Option<usize>,
}

/// Merge config file values with command-line overrides.
pub fn resolve_mosaic_config(
    config: &ConfigFile,
    overrides: MosaicOverrides,
) -> Result<MosaicConfig, CliError> {
    let mut resolved = config.mosaic_config()?;
    if let Some(gap) = overrides.gap {
        resolved = resolved.with_grid_gap(gap)?;
    }
    if let Some(unit_scale) = overrides.unit_scale {
        resolved = resolved.with_unit_scale(unit_scale)?;
    }
    if let Some(mode) = overrides.mode {
        resolved = resolved.with_mode(mode.into());
    }
    if let Some(threads) = overrides.threads {
        resolved = resolved.with_threads(threads)?;
    }
    Ok(resolved)
}

/// Print skipped tiles, one per line.
pub fn print_failures(failures: &[TileFailure]) {
    if failures.is_empty() {
        return;
    }
    println!();
    println!("Skipped {} tile(s):", failures.len());
    for failure in failures {
        println!("  {}: {}", failure.key, failure.error);
    }
}
