//! Tile mosaic geometry.
//!
//! Builds the shared grid in three steps:
//!
//! 1. [`TileExtent::estimate`] scans each tile's local points
//! 2. [`size_grid`] reduces all extents to one [`GridGeometry`]
//! 3. [`GridGeometry::false_origin`] places each tile on the grid
//!
//! [`Mosaic`] enforces that order at runtime.

mod extent;
mod grid;
mod stage;
mod tile;

pub use extent::TileExtent;
pub use grid::{size_grid, FalseOrigin, GridGeometry, GridSize};
pub use stage::{Mosaic, MosaicStage, TileFailure};
pub use tile::{Tile, TileMetadata, UnplacedTile};

use crate::error::MosaicError;
use crate::layout::{LayoutTable, TileKey};

/// Promote a single local pixel coordinate to the global grid.
///
/// One-off form of the false-origin promotion, useful to find where a known
/// feature of one tile lands in the mosaic.
pub fn locate(
    layout: &LayoutTable,
    geometry: &GridGeometry,
    key: TileKey,
    x: i64,
    y: i64,
) -> Result<(i64, i64), MosaicError> {
    let entry = layout.lookup(key)?;
    let origin = geometry.false_origin(entry)?;
    Ok(origin.apply(x, y))
}
