//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization and pipeline
//! construction to reduce duplication across command handlers.

use std::path::Path;
use std::sync::Arc;

use tilecart::config::ConfigFile;
use tilecart::io::read_manifest;
use tilecart::layout::{load_layout, LayoutTable};
use tilecart::log::TracingLogger;
use tilecart::logging::{init_logging, LoggingGuard};
use tilecart::pipeline::{MosaicConfig, MosaicPipeline};
use tracing::info;

use crate::commands::GlobalArgs;
use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Load config (explicit path or ~/.tilecart/config.ini) and start
    /// logging to the configured log file.
    pub fn new(global: &GlobalArgs) -> Result<Self, CliError> {
        let config = global.load_config()?;

        let log_path = &config.logging.file;
        let log_dir = log_path
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| ".".to_string());
        let log_file = log_path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "tilecart.log".to_string());

        let logging_guard = init_logging(&log_dir, &log_file, false, global.debug)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("Tilecart v{}", tilecart::VERSION);
        info!("Tilecart CLI: {} command", command);
    }

    /// Resolve the layout scheme, preferring the command-line value.
    ///
    /// Returns the scheme name as recorded in metadata, and the table.
    pub fn layout(&self, scheme: Option<&str>) -> Result<(String, Arc<LayoutTable>), CliError> {
        let scheme = scheme.unwrap_or(&self.config.grid.scheme).to_string();
        let table = load_layout(&scheme).map_err(CliError::table(&scheme))?;
        info!(scheme = %scheme, tiles = table.len(), max_row = table.max_row(), "Loaded layout");
        Ok((scheme, Arc::new(table)))
    }

    /// Build a pipeline, optionally seeded with manifest extents.
    pub fn pipeline(
        &self,
        layout: Arc<LayoutTable>,
        config: MosaicConfig,
        manifest: Option<&Path>,
    ) -> Result<MosaicPipeline, CliError> {
        let pipeline = MosaicPipeline::new(layout, config, Arc::new(TracingLogger))?;
        match manifest {
            Some(path) => {
                let extents = read_manifest(path).map_err(CliError::table(path))?;
                println!("Using {} tile extents from {}", extents.len(), path.display());
                Ok(pipeline.with_known_extents(extents))
            }
            None => Ok(pipeline),
        }
    }
}
