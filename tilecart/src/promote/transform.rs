//! The two promotion formulas.
//!
//! Both produce the same output unit. With the default unit scale of 26.67
//! pixels per micron, global coordinates are in microns.

use crate::error::MosaicError;
use crate::layout::{TileKey, TileNumbering};
use crate::mosaic::{FalseOrigin, GridGeometry, TileExtent};

/// Pixels per micron on HiSeq flow cells.
pub const DEFAULT_UNIT_SCALE: f64 = 26.67;

fn check_positive(field: &'static str, value: f64) -> Result<f64, MosaicError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(MosaicError::invalid_config(
            field,
            format!("must be a positive number, got {}", value),
        ))
    }
}

/// Scale, then subtract a false origin.
///
/// ```text
/// x_global = x_local * scale - false_easting
/// y_global = y_local * scale - false_northing
/// ```
///
/// `scale` converts the source unit into the unit of the offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreOffset {
    false_easting: f64,
    false_northing: f64,
    scale: f64,
}

impl PreOffset {
    pub fn new(false_easting: f64, false_northing: f64, scale: f64) -> Result<Self, MosaicError> {
        Ok(Self {
            false_easting,
            false_northing,
            scale: check_positive("scale", scale)?,
        })
    }

    /// Zero offsets with a known-positive scale.
    pub(crate) const fn at_origin(scale: f64) -> Self {
        Self {
            false_easting: 0.0,
            false_northing: 0.0,
            scale,
        }
    }

    /// Pixel false origin expressed in output units.
    ///
    /// Equivalent to `(x_local - false_easting) / unit_scale`.
    pub fn from_false_origin(origin: FalseOrigin, unit_scale: f64) -> Result<Self, MosaicError> {
        let unit_scale = check_positive("unit_scale", unit_scale)?;
        Ok(Self {
            false_easting: origin.false_easting as f64 / unit_scale,
            false_northing: origin.false_northing as f64 / unit_scale,
            scale: 1.0 / unit_scale,
        })
    }

    pub fn false_easting(&self) -> f64 {
        self.false_easting
    }

    pub fn false_northing(&self) -> f64 {
        self.false_northing
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x * self.scale - self.false_easting,
            y * self.scale - self.false_northing,
        )
    }

    pub fn revert(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x + self.false_easting) / self.scale,
            (y + self.false_northing) / self.scale,
        )
    }
}

/// `cell * (position - 1) - min`, rejecting results that do not fit in `i64`.
fn tile_offset(field: &'static str, cell: i64, position: i64, min: i64) -> Result<i64, MosaicError> {
    cell.checked_mul(position - 1)
        .and_then(|offset| offset.checked_sub(min))
        .ok_or_else(|| {
            MosaicError::invalid_config(
                field,
                format!("cell size {} at position {} overflows", cell, position),
            )
        })
}

/// Promotion from a tile's decoded mosaic position.
///
/// ```text
/// x_global = (x_local + grid_width  * (m - 1) - ymin) / unit_scale
/// y_global = (y_local + grid_height * (n - 1) - xmin) / unit_scale
/// ```
///
/// `m` and `n` come from the tile number (see
/// [`TileNumbering::mosaic_position`]). The x output is offset by the
/// tile's y minimum and the y output by its x minimum: local `x_` runs
/// along the mosaic's row axis. Downstream consumers rely on this
/// orientation, so the cross-over is kept as is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileRelative {
    offset_x: i64,
    offset_y: i64,
    unit_scale: f64,
}

impl TileRelative {
    pub fn new(
        key: TileKey,
        extent: &TileExtent,
        geometry: &GridGeometry,
        numbering: &TileNumbering,
        unit_scale: f64,
    ) -> Result<Self, MosaicError> {
        let unit_scale = check_positive("unit_scale", unit_scale)?;
        let position = numbering.mosaic_position(key)?;
        let m = i64::from(position.row_from_bottom);
        let n = i64::from(position.col_from_left);
        Ok(Self {
            offset_x: tile_offset("offset_x", geometry.grid_width(), m, extent.ymin)?,
            offset_y: tile_offset("offset_y", geometry.grid_height(), n, extent.xmin)?,
            unit_scale,
        })
    }

    /// Pixel offset added to local x before scaling.
    pub fn offset_x(&self) -> i64 {
        self.offset_x
    }

    /// Pixel offset added to local y before scaling.
    pub fn offset_y(&self) -> i64 {
        self.offset_y
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x + self.offset_x as f64) / self.unit_scale,
            (y + self.offset_y as f64) / self.unit_scale,
        )
    }

    pub fn revert(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x * self.unit_scale - self.offset_x as f64,
            y * self.unit_scale - self.offset_y as f64,
        )
    }
}
