//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::path::PathBuf;
use std::process;

use tilecart::config::ConfigFileError;
use tilecart::io::TableError;
use tilecart::metadata::MetadataError;
use tilecart::MosaicError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Config file could not be read or written
    ConfigFile(ConfigFileError),
    /// Input table could not be read
    Table { path: PathBuf, error: TableError },
    /// Dataset root contained no tiles
    NoTiles(PathBuf),
    /// Grid or promotion failure
    Mosaic(MosaicError),
    /// Metadata file could not be read or written
    Metadata(MetadataError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::NoTiles(_) | CliError::Mosaic(MosaicError::IncompleteGridGeometry(_)) => {
                eprintln!();
                eprintln!("Expected dataset layout:");
                eprintln!("  <data-dir>/<lane>/<tile>/barcodes.tsv.gz");
                eprintln!("Lane and tile directory names must be integers.");
            }
            CliError::ConfigFile(ConfigFileError::InvalidValue { .. }) => {
                eprintln!();
                eprintln!("Fix the value in your config file or reset it with:");
                eprintln!("  tilecart config set <section.key> <value>");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Table { path, error } => {
                write!(f, "Failed to read '{}': {}", path.display(), error)
            }
            CliError::NoTiles(path) => write!(f, "No tiles found under '{}'", path.display()),
            CliError::Mosaic(e) => write!(f, "{}", e),
            CliError::Metadata(e) => write!(f, "Metadata error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Table { error, .. } => Some(error),
            CliError::Mosaic(e) => Some(e),
            CliError::Metadata(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<MosaicError> for CliError {
    fn from(e: MosaicError) -> Self {
        CliError::Mosaic(e)
    }
}

impl From<MetadataError> for CliError {
    fn from(e: MetadataError) -> Self {
        CliError::Metadata(e)
    }
}

impl CliError {
    /// Attach the offending path to a table error.
    pub fn table(path: impl Into<PathBuf>) -> impl FnOnce(TableError) -> Self {
        let path = path.into();
        move |error| CliError::Table { path, error }
    }
}
