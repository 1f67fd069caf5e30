//! Default values for all configuration settings.

use std::path::PathBuf;

use super::settings::*;
use crate::promote::PromotionMode;

pub use crate::hexagon::{DEFAULT_CENTROID_SCALE, DEFAULT_INNER_RADIUS};
pub use crate::pipeline::default_threads;
pub use crate::promote::DEFAULT_UNIT_SCALE;

/// Gap between adjacent tiles, in pixels.
pub const DEFAULT_GRID_GAP: i64 = 0;

/// Built-in layout scheme.
pub const DEFAULT_LAYOUT_SCHEME: &str = "hiseq";

/// Hexagon rotation in degrees.
pub const DEFAULT_HEXAGON_ROTATION: f64 = 0.0;

/// Log file, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "logs/tilecart.log";

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            grid: GridSettings {
                gap: DEFAULT_GRID_GAP,
                scheme: DEFAULT_LAYOUT_SCHEME.to_string(),
            },
            promotion: PromotionSettings {
                unit_scale: DEFAULT_UNIT_SCALE,
                mode: PromotionMode::FalseOrigin,
            },
            hexagon: HexagonSettings {
                inner_radius: DEFAULT_INNER_RADIUS,
                rotation: DEFAULT_HEXAGON_ROTATION,
                scale: DEFAULT_CENTROID_SCALE,
            },
            pipeline: PipelineSettings {
                threads: default_threads(),
            },
            logging: LoggingSettings {
                file: PathBuf::from(DEFAULT_LOG_FILE),
            },
        }
    }
}
