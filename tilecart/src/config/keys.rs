//! Configuration key access and validation.
//!
//! Every supported `section.key` pair maps to one field of [`ConfigFile`].
//! The INI parser and `config list` both go through this table, so a key
//! is validated the same way wherever it is set.

use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use super::settings::ConfigFile;
use crate::promote::PromotionMode;

/// Errors that can occur when getting or setting configuration values.
#[derive(Debug, Error)]
pub enum ConfigKeyError {
    /// Unknown configuration key.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// Validation failed for the value.
    #[error("Invalid value for {key}: {reason}")]
    ValidationFailed { key: String, reason: String },
}

/// Supported configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    GridGap,
    GridScheme,

    PromotionUnitScale,
    PromotionMode,

    HexagonInnerRadius,
    HexagonRotation,
    HexagonScale,

    PipelineThreads,

    LoggingFile,
}

impl FromStr for ConfigKey {
    type Err = ConfigKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == lower)
            .ok_or_else(|| ConfigKeyError::UnknownKey(s.to_string()))
    }
}

impl ConfigKey {
    /// Canonical key name (e.g., "grid.gap").
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::GridGap => "grid.gap",
            ConfigKey::GridScheme => "grid.scheme",
            ConfigKey::PromotionUnitScale => "promotion.unit_scale",
            ConfigKey::PromotionMode => "promotion.mode",
            ConfigKey::HexagonInnerRadius => "hexagon.inner_radius",
            ConfigKey::HexagonRotation => "hexagon.rotation",
            ConfigKey::HexagonScale => "hexagon.scale",
            ConfigKey::PipelineThreads => "pipeline.threads",
            ConfigKey::LoggingFile => "logging.file",
        }
    }

    /// Section name (e.g., "grid").
    pub fn section(&self) -> &'static str {
        self.name().split('.').next().unwrap_or("")
    }

    /// Key name within the section (e.g., "gap").
    pub fn key_name(&self) -> &'static str {
        self.name().split('.').nth(1).unwrap_or(self.name())
    }

    /// Current value from a config file as a string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::GridGap => config.grid.gap.to_string(),
            ConfigKey::GridScheme => config.grid.scheme.clone(),
            ConfigKey::PromotionUnitScale => config.promotion.unit_scale.to_string(),
            ConfigKey::PromotionMode => config.promotion.mode.to_string(),
            ConfigKey::HexagonInnerRadius => config.hexagon.inner_radius.to_string(),
            ConfigKey::HexagonRotation => config.hexagon.rotation.to_string(),
            ConfigKey::HexagonScale => config.hexagon.scale.to_string(),
            ConfigKey::PipelineThreads => config.pipeline.threads.to_string(),
            ConfigKey::LoggingFile => path_to_display(&config.logging.file),
        }
    }

    /// Parse, validate and store a value.
    ///
    /// The config is left untouched when the value is rejected.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigKeyError> {
        let value = value.trim();
        match self {
            ConfigKey::GridGap => {
                let gap: i64 = self.parse(value, "must be an integer")?;
                if gap < 0 {
                    return Err(self.invalid("must be zero or positive"));
                }
                config.grid.gap = gap;
            }
            ConfigKey::GridScheme => {
                if value.is_empty() {
                    return Err(self.invalid("must be 'hiseq' or a layout file path"));
                }
                config.grid.scheme = value.to_string();
            }
            ConfigKey::PromotionUnitScale => {
                config.promotion.unit_scale = self.positive(value)?;
            }
            ConfigKey::PromotionMode => {
                config.promotion.mode = value
                    .parse::<PromotionMode>()
                    .map_err(|_| self.invalid("must be 'false_origin' or 'tile_relative'"))?;
            }
            ConfigKey::HexagonInnerRadius => {
                config.hexagon.inner_radius = self.positive(value)?;
            }
            ConfigKey::HexagonRotation => {
                let rotation: f64 = self.parse(value, "must be a number of degrees")?;
                if !rotation.is_finite() {
                    return Err(self.invalid("must be a number of degrees"));
                }
                config.hexagon.rotation = rotation;
            }
            ConfigKey::HexagonScale => {
                config.hexagon.scale = self.positive(value)?;
            }
            ConfigKey::PipelineThreads => {
                let threads: usize = self.parse(value, "must be a positive integer")?;
                if threads == 0 {
                    return Err(self.invalid("must be at least 1"));
                }
                config.pipeline.threads = threads;
            }
            ConfigKey::LoggingFile => {
                if value.is_empty() {
                    return Err(self.invalid("must not be empty"));
                }
                config.logging.file = super::parser::expand_tilde(value);
            }
        }
        Ok(())
    }

    /// All keys, in the order they appear in config.ini.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::GridGap,
            ConfigKey::GridScheme,
            ConfigKey::PromotionUnitScale,
            ConfigKey::PromotionMode,
            ConfigKey::HexagonInnerRadius,
            ConfigKey::HexagonRotation,
            ConfigKey::HexagonScale,
            ConfigKey::PipelineThreads,
            ConfigKey::LoggingFile,
        ]
    }

    fn parse<T: FromStr>(&self, value: &str, reason: &str) -> Result<T, ConfigKeyError> {
        value.parse().map_err(|_| self.invalid(reason))
    }

    fn positive(&self, value: &str) -> Result<f64, ConfigKeyError> {
        let v: f64 = self.parse(value, "must be a positive number")?;
        if !v.is_finite() || v <= 0.0 {
            return Err(self.invalid("must be a positive number"));
        }
        Ok(v)
    }

    fn invalid(&self, reason: &str) -> ConfigKeyError {
        ConfigKeyError::ValidationFailed {
            key: self.name().to_string(),
            reason: reason.to_string(),
        }
    }
}

fn path_to_display(path: &Path) -> String {
    path.display().to_string()
}
