//! Settings structs, one per `[section]` of the INI file.

use std::path::PathBuf;

use crate::error::MosaicError;
use crate::hexagon::HexagonConfig;
use crate::pipeline::MosaicConfig;
use crate::promote::PromotionMode;

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub grid: GridSettings,
    pub promotion: PromotionSettings,
    pub hexagon: HexagonSettings,
    pub pipeline: PipelineSettings,
    pub logging: LoggingSettings,
}

/// Tile grid configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSettings {
    /// Gap between adjacent tiles in pixels
    pub gap: i64,
    /// `hiseq` or a path to a layout TSV
    pub scheme: String,
}

/// Coordinate promotion configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionSettings {
    /// Pixels per output unit (26.67 pixels per micron on HiSeq)
    pub unit_scale: f64,
    pub mode: PromotionMode,
}

/// Hexagon binning configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct HexagonSettings {
    /// Center to edge-midpoint distance
    pub inner_radius: f64,
    /// Degrees, applied to every hexagon
    pub rotation: f64,
    /// Multiplier applied to centroid coordinates
    pub scale: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    /// Worker threads
    pub threads: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub file: PathBuf,
}

impl ConfigFile {
    /// Runtime configuration for the mosaic pipeline.
    pub fn mosaic_config(&self) -> Result<MosaicConfig, MosaicError> {
        MosaicConfig::new(
            self.grid.gap,
            self.promotion.unit_scale,
            self.promotion.mode,
            self.pipeline.threads,
        )
    }

    /// Runtime configuration for the hexagon binner.
    pub fn hexagon_config(
        &self,
        false_easting: f64,
        false_northing: f64,
    ) -> Result<HexagonConfig, MosaicError> {
        HexagonConfig::new(
            self.hexagon.inner_radius,
            self.hexagon.rotation,
            self.hexagon.scale,
            false_easting,
            false_northing,
        )
    }
}
