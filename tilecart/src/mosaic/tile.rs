//! Tile records before and after placement.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::MosaicError;
use crate::layout::{LayoutEntry, TileKey};

use super::{FalseOrigin, GridGeometry, TileExtent};

/// A tile whose extent and layout position are known but which has not
/// been placed on the grid yet.
#[derive(Debug, Clone, PartialEq)]
pub struct UnplacedTile {
    pub key: TileKey,
    pub source: PathBuf,
    pub placement: LayoutEntry,
    pub extent: TileExtent,
}

impl UnplacedTile {
    pub fn new(
        key: TileKey,
        source: impl Into<PathBuf>,
        placement: LayoutEntry,
        extent: TileExtent,
    ) -> Self {
        Self {
            key,
            source: source.into(),
            placement,
            extent,
        }
    }

    /// Compute the false origin against finalized geometry.
    pub fn place(self, geometry: &GridGeometry) -> Result<Tile, MosaicError> {
        let origin = geometry.false_origin(self.placement)?;
        Ok(Tile {
            key: self.key,
            source: self.source,
            placement: self.placement,
            extent: self.extent,
            origin,
        })
    }
}

/// A placed tile. The false origin is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    key: TileKey,
    source: PathBuf,
    placement: LayoutEntry,
    extent: TileExtent,
    origin: FalseOrigin,
}

impl Tile {
    pub fn key(&self) -> TileKey {
        self.key
    }

    /// Location of the tile's external data source.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn placement(&self) -> LayoutEntry {
        self.placement
    }

    pub fn extent(&self) -> &TileExtent {
        &self.extent
    }

    pub fn origin(&self) -> FalseOrigin {
        self.origin
    }

    /// Flat metadata record for this tile.
    pub fn metadata(&self) -> TileMetadata {
        TileMetadata {
            lane_id: self.key.lane,
            tile_id: self.key.tile,
            data_dir: self.source.clone(),
            row: self.placement.row,
            col: self.placement.col,
            false_easting: self.origin.false_easting,
            false_northing: self.origin.false_northing,
            xmin: self.extent.xmin,
            ymin: self.extent.ymin,
            xmax: self.extent.xmax,
            ymax: self.extent.ymax,
            shifted_srs: self.origin.proj4(),
        }
    }
}

/// Serialized per-tile record in dataset metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileMetadata {
    pub lane_id: u32,
    pub tile_id: u32,
    pub data_dir: PathBuf,
    pub row: u32,
    pub col: u32,
    pub false_easting: i64,
    pub false_northing: i64,
    pub xmin: i64,
    pub ymin: i64,
    pub xmax: i64,
    pub ymax: i64,
    /// Shifted Mercator definition for the tile's raw pixel coordinates
    pub shifted_srs: String,
}

impl TileMetadata {
    pub fn key(&self) -> TileKey {
        TileKey::new(self.lane_id, self.tile_id)
    }

    pub fn origin(&self) -> FalseOrigin {
        FalseOrigin {
            false_easting: self.false_easting,
            false_northing: self.false_northing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unplaced(row: u32, col: u32) -> UnplacedTile {
        UnplacedTile::new(
            TileKey::new(2, 2113),
            "/data/2/2113",
            LayoutEntry { row, col },
            TileExtent::new(0, 0, 50, 100).unwrap(),
        )
    }

    #[test]
    fn test_place_sets_origin() {
        let geometry = GridGeometry::new(100, 50, 0, 2).unwrap();
        let tile = unplaced(1, 2).place(&geometry).unwrap();
        assert_eq!(
            tile.origin(),
            FalseOrigin {
                false_easting: -100,
                false_northing: -50
            }
        );
        assert_eq!(tile.source(), Path::new("/data/2/2113"));
    }

    #[test]
    fn test_place_outside_grid_fails() {
        let geometry = GridGeometry::new(100, 50, 0, 1).unwrap();
        assert!(unplaced(2, 1).place(&geometry).is_err());
    }

    #[test]
    fn test_metadata_carries_shifted_srs() {
        let geometry = GridGeometry::new(100, 50, 0, 2).unwrap();
        let meta = unplaced(1, 3).place(&geometry).unwrap().metadata();
        assert!(meta.shifted_srs.starts_with("+proj=merc"));
        assert!(meta.shifted_srs.contains("+x_0=-200 "));
        assert!(meta.shifted_srs.contains("+y_0=-50 "));
    }

    #[test]
    fn test_metadata_record() {
        let geometry = GridGeometry::new(100, 50, 0, 1).unwrap();
        let meta = unplaced(1, 1).place(&geometry).unwrap().metadata();
        assert_eq!(meta.key(), TileKey::new(2, 2113));
        assert_eq!(meta.xmax, 50);
        assert_eq!(meta.ymax, 100);
        assert_eq!(meta.origin().false_easting, 0);
    }
}
