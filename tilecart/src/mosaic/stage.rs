//! Ordering of mosaic construction.
//!
//! A mosaic moves through three stages and never back:
//!
//! ```text
//! Collecting ──finalize_grid()──► Sized ──place()──► Placed
//! (extents)                       (GridGeometry)      (Tiles with origins)
//! ```
//!
//! Asking for placement while extents are still being collected is an
//! ordering error reported as [`MosaicError::IncompleteGridGeometry`].

use crate::error::MosaicError;
use crate::layout::TileKey;

use super::{size_grid, GridGeometry, Tile, UnplacedTile};

/// A tile that was skipped, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct TileFailure {
    pub key: TileKey,
    pub error: MosaicError,
}

/// Current stage of a mosaic.
#[derive(Debug, Clone)]
pub enum MosaicStage {
    /// Extents are being gathered, grid size unknown
    Collecting(Vec<UnplacedTile>),
    /// Grid geometry is final, tiles not yet placed
    Sized {
        tiles: Vec<UnplacedTile>,
        geometry: GridGeometry,
    },
    /// Every placeable tile has its false origin
    Placed {
        tiles: Vec<Tile>,
        geometry: GridGeometry,
    },
}

impl MosaicStage {
    pub fn name(&self) -> &'static str {
        match self {
            MosaicStage::Collecting(_) => "collecting",
            MosaicStage::Sized { .. } => "sized",
            MosaicStage::Placed { .. } => "placed",
        }
    }
}

/// A set of tiles being assembled into one grid, plus the tiles that were
/// dropped along the way.
#[derive(Debug, Clone)]
pub struct Mosaic {
    stage: MosaicStage,
    failures: Vec<TileFailure>,
}

impl Default for Mosaic {
    fn default() -> Self {
        Self::new()
    }
}

impl Mosaic {
    pub fn new() -> Self {
        Self {
            stage: MosaicStage::Collecting(Vec::new()),
            failures: Vec::new(),
        }
    }

    pub fn stage(&self) -> &MosaicStage {
        &self.stage
    }

    /// Add a tile whose extent is known. Only valid while collecting.
    pub fn add_tile(&mut self, tile: UnplacedTile) -> Result<(), MosaicError> {
        match &mut self.stage {
            MosaicStage::Collecting(tiles) => {
                tiles.push(tile);
                Ok(())
            }
            other => Err(MosaicError::IncompleteGridGeometry(format!(
                "cannot add tile {} once the mosaic is {}",
                tile.key,
                other.name()
            ))),
        }
    }

    /// Record a tile that could not be processed.
    pub fn record_failure(&mut self, key: TileKey, error: MosaicError) {
        self.failures.push(TileFailure { key, error });
    }

    /// Run the grid reduction over every collected extent.
    ///
    /// Fails if no tile was collected, or if called twice.
    pub fn finalize_grid(
        &mut self,
        grid_gap: i64,
        max_row: u32,
    ) -> Result<GridGeometry, MosaicError> {
        let tiles = match &mut self.stage {
            MosaicStage::Collecting(tiles) => std::mem::take(tiles),
            other => {
                return Err(MosaicError::IncompleteGridGeometry(format!(
                    "grid already finalized (mosaic is {})",
                    other.name()
                )))
            }
        };
        let geometry = match size_grid(tiles.iter().map(|t| &t.extent))
            .and_then(|size| GridGeometry::from_size(size, grid_gap, max_row))
        {
            Ok(geometry) => geometry,
            Err(e) => {
                self.stage = MosaicStage::Collecting(tiles);
                return Err(e);
            }
        };
        self.stage = MosaicStage::Sized { tiles, geometry };
        Ok(geometry)
    }

    /// Use externally supplied geometry instead of the reduction.
    pub fn finalize_with(&mut self, geometry: GridGeometry) -> Result<(), MosaicError> {
        match &mut self.stage {
            MosaicStage::Collecting(tiles) => {
                let tiles = std::mem::take(tiles);
                self.stage = MosaicStage::Sized { tiles, geometry };
                Ok(())
            }
            other => Err(MosaicError::IncompleteGridGeometry(format!(
                "grid already finalized (mosaic is {})",
                other.name()
            ))),
        }
    }

    /// Compute the false origin of every tile.
    ///
    /// Tiles that fall outside the grid are moved to the failure list; the
    /// remaining tiles are placed.
    pub fn place(&mut self) -> Result<&[Tile], MosaicError> {
        let (tiles, geometry) = match &mut self.stage {
            MosaicStage::Sized { tiles, geometry } => (std::mem::take(tiles), *geometry),
            MosaicStage::Collecting(_) => {
                return Err(MosaicError::IncompleteGridGeometry(
                    "tiles cannot be placed before the grid is sized".to_string(),
                ))
            }
            MosaicStage::Placed { .. } => {
                return Err(MosaicError::IncompleteGridGeometry(
                    "tiles are already placed".to_string(),
                ))
            }
        };

        let mut placed = Vec::with_capacity(tiles.len());
        for tile in tiles {
            let key = tile.key;
            match tile.place(&geometry) {
                Ok(tile) => placed.push(tile),
                Err(error) => self.record_failure(key, error),
            }
        }
        placed.sort_by_key(|t| t.key());

        self.stage = MosaicStage::Placed {
            tiles: placed,
            geometry,
        };
        Ok(self.tiles())
    }

    /// Grid geometry, once sized.
    pub fn geometry(&self) -> Option<&GridGeometry> {
        match &self.stage {
            MosaicStage::Collecting(_) => None,
            MosaicStage::Sized { geometry, .. } | MosaicStage::Placed { geometry, .. } => {
                Some(geometry)
            }
        }
    }

    /// Placed tiles, sorted by key. Empty until [`Mosaic::place`] ran.
    pub fn tiles(&self) -> &[Tile] {
        match &self.stage {
            MosaicStage::Placed { tiles, .. } => tiles,
            _ => &[],
        }
    }

    pub fn failures(&self) -> &[TileFailure] {
        &self.failures
    }

    /// Split into placed tiles and failures.
    pub fn into_parts(self) -> (Vec<Tile>, Vec<TileFailure>) {
        let tiles = match self.stage {
            MosaicStage::Placed { tiles, .. } => tiles,
            _ => Vec::new(),
        };
        (tiles, self.failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutEntry;
    use crate::mosaic::TileExtent;

    fn tile(tile: u32, row: u32, col: u32, extent: (i64, i64, i64, i64)) -> UnplacedTile {
        UnplacedTile::new(
            TileKey::new(1, tile),
            format!("/data/1/{}", tile),
            LayoutEntry { row, col },
            TileExtent::new(extent.0, extent.1, extent.2, extent.3).unwrap(),
        )
    }

    #[test]
    fn test_full_sequence() {
        let mut mosaic = Mosaic::new();
        mosaic.add_tile(tile(1101, 2, 1, (1, 1, 4, 3))).unwrap();
        mosaic.add_tile(tile(1102, 1, 2, (0, 0, 5, 2))).unwrap();

        let geometry = mosaic.finalize_grid(0, 2).unwrap();
        assert_eq!(geometry.grid_width(), 2);
        assert_eq!(geometry.grid_height(), 5);

        let tiles = mosaic.place().unwrap();
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[0].origin().false_easting, 0);
        assert_eq!(tiles[0].origin().false_northing, 0);
        assert_eq!(tiles[1].origin().false_easting, -2);
        assert_eq!(tiles[1].origin().false_northing, -5);
    }

    #[test]
    fn test_place_before_sizing_is_rejected() {
        let mut mosaic = Mosaic::new();
        mosaic.add_tile(tile(1101, 1, 1, (0, 0, 1, 1))).unwrap();
        let err = mosaic.place().unwrap_err();
        assert!(matches!(err, MosaicError::IncompleteGridGeometry(_)));
        assert!(mosaic.geometry().is_none());
    }

    #[test]
    fn test_empty_mosaic_cannot_be_sized() {
        let mut mosaic = Mosaic::new();
        assert!(matches!(
            mosaic.finalize_grid(0, 1),
            Err(MosaicError::IncompleteGridGeometry(_))
        ));
        assert_eq!(mosaic.stage().name(), "collecting");
    }

    #[test]
    fn test_add_after_sizing_is_rejected() {
        let mut mosaic = Mosaic::new();
        mosaic.add_tile(tile(1101, 1, 1, (0, 0, 1, 1))).unwrap();
        mosaic.finalize_grid(0, 1).unwrap();
        assert!(mosaic.add_tile(tile(1102, 1, 2, (0, 0, 1, 1))).is_err());
        assert!(mosaic.finalize_grid(0, 1).is_err());
    }

    #[test]
    fn test_out_of_grid_tile_becomes_failure() {
        let mut mosaic = Mosaic::new();
        mosaic.add_tile(tile(1101, 1, 1, (0, 0, 10, 10))).unwrap();
        mosaic.add_tile(tile(1102, 9, 1, (0, 0, 10, 10))).unwrap();
        mosaic.finalize_grid(0, 2).unwrap();

        assert_eq!(mosaic.place().unwrap().len(), 1);
        assert_eq!(mosaic.failures().len(), 1);
        assert_eq!(mosaic.failures()[0].key, TileKey::new(1, 1102));
        assert!(mosaic.place().is_err());
    }

    #[test]
    fn test_finalize_with_explicit_geometry() {
        let mut mosaic = Mosaic::new();
        mosaic.add_tile(tile(1101, 1, 2, (0, 0, 1, 1))).unwrap();
        mosaic
            .finalize_with(GridGeometry::new(100, 50, 0, 1).unwrap())
            .unwrap();
        let tiles = mosaic.place().unwrap();
        assert_eq!(tiles[0].origin().false_easting, -100);
    }
}
