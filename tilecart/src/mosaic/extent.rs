//! Observed pixel extent of a tile.

use serde::{Deserialize, Serialize};

use crate::error::MosaicError;
use crate::layout::TileKey;

/// Bounding box of a tile's point records in local pixel units.
///
/// Width and height are taken from swapped axes: `width` spans the local
/// y axis and `height` the local x axis, matching how the instrument's
/// pixel columns map onto the mosaic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileExtent {
    pub xmin: i64,
    pub ymin: i64,
    pub xmax: i64,
    pub ymax: i64,
}

impl TileExtent {
    /// Create an extent, returning `None` if a minimum exceeds its maximum.
    pub fn new(xmin: i64, ymin: i64, xmax: i64, ymax: i64) -> Option<Self> {
        (xmin <= xmax && ymin <= ymax).then_some(Self {
            xmin,
            ymin,
            xmax,
            ymax,
        })
    }

    /// Extent of a single point.
    pub fn of_point(x: i64, y: i64) -> Self {
        Self {
            xmin: x,
            ymin: y,
            xmax: x,
            ymax: y,
        }
    }

    /// Scan a tile's local coordinates once and return their bounding box.
    ///
    /// Fails with [`MosaicError::EmptyTileExtent`] when there are no points;
    /// a tile without points cannot be placed.
    pub fn estimate<I>(key: TileKey, points: I) -> Result<Self, MosaicError>
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let mut points = points.into_iter();
        let (x, y) = points
            .next()
            .ok_or(MosaicError::EmptyTileExtent { key })?;
        Ok(points.fold(Self::of_point(x, y), |mut extent, (x, y)| {
            extent.include(x, y);
            extent
        }))
    }

    /// Grow the extent to cover a point.
    pub fn include(&mut self, x: i64, y: i64) {
        self.xmin = self.xmin.min(x);
        self.ymin = self.ymin.min(y);
        self.xmax = self.xmax.max(x);
        self.ymax = self.ymax.max(y);
    }

    /// `ymax - ymin`
    pub fn width(&self) -> i64 {
        self.ymax - self.ymin
    }

    /// `xmax - xmin`
    pub fn height(&self) -> i64 {
        self.xmax - self.xmin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> TileKey {
        TileKey::new(2, 2113)
    }

    #[test]
    fn test_estimate_bounds() {
        let points = vec![(3, 1), (1, 3), (4, 2), (2, 2)];
        let extent = TileExtent::estimate(key(), points).unwrap();
        assert_eq!(extent, TileExtent::new(1, 1, 4, 3).unwrap());
    }

    #[test]
    fn test_width_height_use_swapped_axes() {
        let extent = TileExtent::new(1, 1, 4, 3).unwrap();
        assert_eq!(extent.width(), 2);
        assert_eq!(extent.height(), 3);
    }

    #[test]
    fn test_single_point_has_zero_size() {
        let extent = TileExtent::estimate(key(), [(7, 9)]).unwrap();
        assert_eq!(extent.width(), 0);
        assert_eq!(extent.height(), 0);
    }

    #[test]
    fn test_empty_tile_is_error() {
        let err = TileExtent::estimate(key(), Vec::<(i64, i64)>::new()).unwrap_err();
        assert_eq!(err, MosaicError::EmptyTileExtent { key: key() });
    }

    #[test]
    fn test_new_rejects_inverted_bounds() {
        assert!(TileExtent::new(5, 0, 4, 1).is_none());
        assert!(TileExtent::new(0, 2, 4, 1).is_none());
        assert!(TileExtent::new(0, 0, 0, 0).is_some());
    }
}
