//! Two-phase parallel mosaic run.
//!
//! ```text
//!   sources ──► Phase 1 (parallel) ──► size_grid ──► place ──► Phase 2 (parallel) ──► sink
//!               layout lookup +        single         false     read, promote,
//!               extent per tile        barrier        origins   write per tile
//! ```
//!
//! Tiles never share mutable state. The layout table and the finalized
//! grid geometry are the only data every worker reads. A failing tile is
//! recorded in the [`MosaicReport`] and its siblings carry on; a failure of
//! the grid reduction aborts the run.

mod config;
mod runner;

use std::path::Path;

pub use config::{default_threads, MosaicConfig};
pub use runner::{MosaicPipeline, MosaicReport};

use crate::error::MosaicError;
use crate::layout::TileKey;
use crate::mosaic::{Tile, TileExtent};
use crate::promote::{GlobalPoint, PointRecord};

/// Provider of one tile's local point records.
pub trait TileSource: Send + Sync {
    /// Passthrough data carried by each point.
    type Payload: Send;

    fn key(&self) -> TileKey;

    /// Where the tile's data lives, recorded on the placed tile.
    fn location(&self) -> &Path;

    /// Read every point of the tile.
    fn read_points(&self) -> Result<Vec<PointRecord<Self::Payload>>, MosaicError>;

    /// Bounding box of the tile's points.
    ///
    /// The default reads all points; sources that can stream should
    /// override it.
    fn read_extent(&self) -> Result<TileExtent, MosaicError> {
        let points = self.read_points()?;
        TileExtent::estimate(self.key(), points.iter().map(|p| p.local()))
    }
}

/// Destination for one tile's promoted points.
pub trait TileSink<P>: Send + Sync {
    fn write_tile(&self, tile: &Tile, points: &[GlobalPoint<P>]) -> Result<(), MosaicError>;
}
