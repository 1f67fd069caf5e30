//! Grid sizing and false-origin placement.
//!
//! The global origin is the local origin of the bottom-left tile
//! (`row = max_row`, `col = 1`). Every other tile is offset by whole grid
//! cells:
//!
//! ```text
//! false_easting  = -(grid_width  + grid_gap) * (col - 1)
//! false_northing = -(grid_height + grid_gap) * (max_row - row)
//! ```
//!
//! and a local coordinate is promoted by subtracting the offset.

use serde::{Deserialize, Serialize};

use crate::error::MosaicError;
use crate::layout::LayoutEntry;

use super::TileExtent;

/// Uniform cell size derived from the largest observed tile extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    /// Largest `ymax - ymin` over all tiles
    pub width: i64,
    /// Largest `xmax - xmin` over all tiles
    pub height: i64,
}

/// Reduce every tile extent to the grid cell size.
///
/// This is the one global barrier of a mosaic run: it must see all extents
/// before any tile can be placed. The result does not depend on the order
/// of the extents.
pub fn size_grid<'a, I>(extents: I) -> Result<GridSize, MosaicError>
where
    I: IntoIterator<Item = &'a TileExtent>,
{
    extents
        .into_iter()
        .fold(None, |acc: Option<GridSize>, extent| {
            let size = acc.unwrap_or(GridSize {
                width: 0,
                height: 0,
            });
            Some(GridSize {
                width: size.width.max(extent.width()),
                height: size.height.max(extent.height()),
            })
        })
        .ok_or_else(|| {
            MosaicError::IncompleteGridGeometry("no tile extents were collected".to_string())
        })
}

/// Write-once grid constants shared by every placement in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridGeometry {
    grid_width: i64,
    grid_height: i64,
    grid_gap: i64,
    max_row: u32,
}

impl GridGeometry {
    /// Build geometry from explicit values.
    pub fn new(
        grid_width: i64,
        grid_height: i64,
        grid_gap: i64,
        max_row: u32,
    ) -> Result<Self, MosaicError> {
        if grid_width < 0 {
            return Err(MosaicError::invalid_config(
                "grid_width",
                format!("must not be negative, got {}", grid_width),
            ));
        }
        if grid_height < 0 {
            return Err(MosaicError::invalid_config(
                "grid_height",
                format!("must not be negative, got {}", grid_height),
            ));
        }
        if grid_gap < 0 {
            return Err(MosaicError::invalid_config(
                "grid_gap",
                format!("must not be negative, got {}", grid_gap),
            ));
        }
        if max_row == 0 {
            return Err(MosaicError::invalid_config("max_row", "must be at least 1"));
        }
        Ok(Self {
            grid_width,
            grid_height,
            grid_gap,
            max_row,
        })
    }

    /// Build geometry from a sized grid plus the configured gap and rows.
    pub fn from_size(size: GridSize, grid_gap: i64, max_row: u32) -> Result<Self, MosaicError> {
        Self::new(size.width, size.height, grid_gap, max_row)
    }

    pub fn grid_width(&self) -> i64 {
        self.grid_width
    }

    pub fn grid_height(&self) -> i64 {
        self.grid_height
    }

    pub fn grid_gap(&self) -> i64 {
        self.grid_gap
    }

    pub fn max_row(&self) -> u32 {
        self.max_row
    }

    /// Offset that moves a tile's local origin into the global grid.
    pub fn false_origin(&self, entry: LayoutEntry) -> Result<FalseOrigin, MosaicError> {
        if entry.row == 0 || entry.col == 0 || entry.row > self.max_row {
            return Err(MosaicError::OutsideGrid {
                row: entry.row,
                col: entry.col,
                max_row: self.max_row,
            });
        }
        let col_steps = i64::from(entry.col - 1);
        let row_steps = i64::from(self.max_row - entry.row);
        Ok(FalseOrigin {
            false_easting: cell_offset("false_easting", self.grid_width, self.grid_gap, col_steps)?,
            false_northing: cell_offset(
                "false_northing",
                self.grid_height,
                self.grid_gap,
                row_steps,
            )?,
        })
    }
}

/// `-(cell + gap) * steps`, rejecting results that do not fit in `i64`.
fn cell_offset(field: &'static str, cell: i64, gap: i64, steps: i64) -> Result<i64, MosaicError> {
    cell.checked_add(gap)
        .and_then(|pitch| pitch.checked_mul(steps))
        .and_then(i64::checked_neg)
        .ok_or_else(|| {
            MosaicError::invalid_config(
                field,
                format!(
                    "grid pitch {} + {} over {} cells overflows",
                    cell, gap, steps
                ),
            )
        })
}

/// Per-tile offset subtracted from local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FalseOrigin {
    pub false_easting: i64,
    pub false_northing: i64,
}

impl FalseOrigin {
    /// Local to global: `(x - false_easting, y - false_northing)`.
    pub fn apply(&self, x: i64, y: i64) -> (i64, i64) {
        (x - self.false_easting, y - self.false_northing)
    }

    /// Global to local.
    pub fn revert(&self, x: i64, y: i64) -> (i64, i64) {
        (x + self.false_easting, y + self.false_northing)
    }

    /// Spherical Mercator definition shifted by this origin.
    ///
    /// Assigning it to a tile's raw pixel coordinates and reprojecting to
    /// EPSG:3857 reproduces the false-origin promotion in GIS tooling.
    pub fn proj4(&self) -> String {
        format!(
            "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 \
             +x_0={} +y_0={} +k=1 +units=m +nadgrids=@null +wktext +no_defs",
            self.false_easting, self.false_northing
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(row: u32, col: u32) -> LayoutEntry {
        LayoutEntry { row, col }
    }

    #[test]
    fn test_single_tile_grid_has_zero_origin() {
        let geometry = GridGeometry::new(100, 50, 0, 1).unwrap();
        let origin = geometry.false_origin(entry(1, 1)).unwrap();
        assert_eq!(origin.false_easting, 0);
        assert_eq!(origin.false_northing, 0);
    }

    #[test]
    fn test_second_column_shifts_by_grid_width() {
        let geometry = GridGeometry::new(100, 50, 0, 1).unwrap();
        let origin = geometry.false_origin(entry(1, 2)).unwrap();
        assert_eq!(origin.false_easting, -100);
        assert_eq!(origin.false_northing, 0);
    }

    #[test]
    fn test_gap_is_added_per_step() {
        let geometry = GridGeometry::new(100, 50, 20, 3).unwrap();
        let origin = geometry.false_origin(entry(1, 3)).unwrap();
        assert_eq!(origin.false_easting, -240);
        assert_eq!(origin.false_northing, -140);
    }

    #[test]
    fn test_easting_monotonic_in_column() {
        let geometry = GridGeometry::new(98, 20, 2, 4).unwrap();
        let eastings: Vec<i64> = (1..=6)
            .map(|col| geometry.false_origin(entry(2, col)).unwrap().false_easting)
            .collect();
        assert_eq!(eastings[0], 0);
        assert!(eastings.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_northing_zero_only_on_bottom_row() {
        let geometry = GridGeometry::new(98, 20, 0, 4).unwrap();
        let northings: Vec<i64> = (1..=4)
            .map(|row| geometry.false_origin(entry(row, 1)).unwrap().false_northing)
            .collect();
        assert_eq!(northings, vec![-60, -40, -20, 0]);
    }

    #[test]
    fn test_row_outside_grid() {
        let geometry = GridGeometry::new(100, 50, 0, 2).unwrap();
        assert_eq!(
            geometry.false_origin(entry(3, 1)).unwrap_err(),
            MosaicError::OutsideGrid {
                row: 3,
                col: 1,
                max_row: 2
            }
        );
        assert!(geometry.false_origin(entry(1, 0)).is_err());
    }

    #[test]
    fn test_invalid_geometry() {
        assert!(GridGeometry::new(-1, 50, 0, 1).is_err());
        assert!(GridGeometry::new(100, 50, -5, 1).is_err());
        assert!(GridGeometry::new(100, 50, 0, 0).is_err());
    }

    #[test]
    fn test_oversized_geometry_is_rejected_not_wrapped() {
        let geometry = GridGeometry::new(i64::MAX, 1, 1, 1).unwrap();
        assert!(geometry.false_origin(entry(1, 1)).is_err());

        let geometry = GridGeometry::new(i64::MAX / 2, 1, 0, 1).unwrap();
        let err = geometry.false_origin(entry(1, 4)).unwrap_err();
        assert!(matches!(
            err,
            MosaicError::InvalidConfiguration {
                field: "false_easting",
                ..
            }
        ));

        let geometry = GridGeometry::new(1, i64::MAX, 0, 3).unwrap();
        let err = geometry.false_origin(entry(1, 1)).unwrap_err();
        assert!(matches!(
            err,
            MosaicError::InvalidConfiguration {
                field: "false_northing",
                ..
            }
        ));
        assert!(geometry.false_origin(entry(3, 1)).is_ok());
    }

    #[test]
    fn test_size_grid_takes_maximum_per_axis() {
        let extents = [
            TileExtent::new(1, 1, 4, 3).unwrap(),
            TileExtent::new(0, 0, 5, 2).unwrap(),
        ];
        let size = size_grid(&extents).unwrap();
        assert_eq!(size.width, 2);
        assert_eq!(size.height, 5);
    }

    #[test]
    fn test_size_grid_is_order_independent() {
        let mut extents = vec![
            TileExtent::new(0, 10, 90, 60).unwrap(),
            TileExtent::new(3, 0, 40, 80).unwrap(),
            TileExtent::new(5, 5, 99, 7).unwrap(),
            TileExtent::new(1, 2, 3, 4).unwrap(),
        ];
        let forward = size_grid(&extents).unwrap();
        extents.reverse();
        assert_eq!(size_grid(&extents).unwrap(), forward);
        extents.swap(0, 2);
        assert_eq!(size_grid(&extents).unwrap(), forward);
        assert_eq!(size_grid(&extents).unwrap(), forward);
    }

    #[test]
    fn test_size_grid_without_extents() {
        let err = size_grid(&Vec::<TileExtent>::new()).unwrap_err();
        assert!(matches!(err, MosaicError::IncompleteGridGeometry(_)));
    }

    #[test]
    fn test_origin_apply_revert() {
        let origin = FalseOrigin {
            false_easting: -200,
            false_northing: -40,
        };
        assert_eq!(origin.apply(5, 7), (205, 47));
        assert_eq!(origin.revert(205, 47), (5, 7));
    }
}
