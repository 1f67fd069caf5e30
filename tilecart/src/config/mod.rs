//! User configuration stored in `~/.tilecart/config.ini`.
//!
//! ```text
//! [grid]
//! gap = 0
//! scheme = hiseq
//!
//! [promotion]
//! unit_scale = 26.67
//! mode = false_origin
//! ```
//!
//! A missing file or key falls back to the defaults in [`defaults`].
//! [`ConfigFile::mosaic_config`] and [`ConfigFile::hexagon_config`] turn
//! the file into validated runtime settings.

pub mod defaults;
mod file;
mod keys;
mod parser;
mod settings;
mod writer;

pub use file::{config_directory, config_file_path, ConfigFileError};
pub use keys::{ConfigKey, ConfigKeyError};
pub use settings::{
    ConfigFile, GridSettings, HexagonSettings, LoggingSettings, PipelineSettings,
    PromotionSettings,
};
