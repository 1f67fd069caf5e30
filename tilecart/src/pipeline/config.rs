//! Run configuration for the mosaic pipeline.

use crate::error::MosaicError;
use crate::layout::TileNumbering;
use crate::promote::{PromotionMode, DEFAULT_UNIT_SCALE};

/// Validated settings for one mosaic run.
#[derive(Debug, Clone, PartialEq)]
pub struct MosaicConfig {
    grid_gap: i64,
    unit_scale: f64,
    mode: PromotionMode,
    numbering: TileNumbering,
    threads: usize,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            grid_gap: 0,
            unit_scale: DEFAULT_UNIT_SCALE,
            mode: PromotionMode::FalseOrigin,
            numbering: TileNumbering::hiseq(),
            threads: default_threads(),
        }
    }
}

/// Worker count when none is configured.
pub fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

impl MosaicConfig {
    /// Build a config, rejecting a negative gap, a non-positive unit scale
    /// or zero threads.
    pub fn new(
        grid_gap: i64,
        unit_scale: f64,
        mode: PromotionMode,
        threads: usize,
    ) -> Result<Self, MosaicError> {
        Self::default()
            .with_grid_gap(grid_gap)?
            .with_unit_scale(unit_scale)?
            .with_mode(mode)
            .with_threads(threads)
    }

    pub fn with_grid_gap(mut self, grid_gap: i64) -> Result<Self, MosaicError> {
        if grid_gap < 0 {
            return Err(MosaicError::invalid_config(
                "grid_gap",
                format!("must not be negative, got {}", grid_gap),
            ));
        }
        self.grid_gap = grid_gap;
        Ok(self)
    }

    pub fn with_unit_scale(mut self, unit_scale: f64) -> Result<Self, MosaicError> {
        if !(unit_scale.is_finite() && unit_scale > 0.0) {
            return Err(MosaicError::invalid_config(
                "unit_scale",
                format!("must be a positive number, got {}", unit_scale),
            ));
        }
        self.unit_scale = unit_scale;
        Ok(self)
    }

    pub fn with_mode(mut self, mode: PromotionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_numbering(mut self, numbering: TileNumbering) -> Self {
        self.numbering = numbering;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Result<Self, MosaicError> {
        if threads == 0 {
            return Err(MosaicError::invalid_config("threads", "must be at least 1"));
        }
        self.threads = threads;
        Ok(self)
    }

    pub fn grid_gap(&self) -> i64 {
        self.grid_gap
    }

    pub fn unit_scale(&self) -> f64 {
        self.unit_scale
    }

    pub fn mode(&self) -> PromotionMode {
        self.mode
    }

    pub fn numbering(&self) -> &TileNumbering {
        &self.numbering
    }

    pub fn threads(&self) -> usize {
        self.threads
    }
}
