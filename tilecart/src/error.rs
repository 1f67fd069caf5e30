//! Error types for mosaic construction and coordinate promotion.
//!
//! Per-tile errors ([`MosaicError::MissingLayoutEntry`],
//! [`MosaicError::EmptyTileExtent`], source and sink failures) only abort the
//! affected tile. Grid-level errors abort the whole run, since every tile's
//! placement depends on the grid geometry.

use thiserror::Error;

use crate::layout::TileKey;

/// Errors that can occur while building a mosaic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MosaicError {
    /// The layout table has no row/column for this tile
    #[error("no layout entry for tile {key}")]
    MissingLayoutEntry { key: TileKey },

    /// The tile has no point records, so no extent can be estimated
    #[error("tile {key} has no points, extent cannot be estimated")]
    EmptyTileExtent { key: TileKey },

    /// Grid geometry was requested before it could be computed
    #[error("grid geometry is incomplete: {0}")]
    IncompleteGridGeometry(String),

    /// A configuration value is out of range
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },

    /// A tile number does not follow the lane/surface/swath encoding
    #[error("invalid tile number {tile}: {reason}")]
    InvalidTileNumber { tile: u32, reason: String },

    /// A layout position falls outside the grid
    #[error("tile at row {row}, col {col} lies outside a grid with {max_row} rows")]
    OutsideGrid { row: u32, col: u32, max_row: u32 },

    /// Reading a tile's point records failed
    #[error("failed to read tile {key}: {message}")]
    Source { key: TileKey, message: String },

    /// Writing a tile's promoted points failed
    #[error("failed to write tile {key}: {message}")]
    Sink { key: TileKey, message: String },
}

impl MosaicError {
    /// Shorthand for an [`MosaicError::InvalidConfiguration`] error.
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        MosaicError::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }

    /// Whether this error only concerns a single tile.
    ///
    /// Tile-scoped errors are recorded and skipped during a batch run;
    /// everything else aborts the run.
    pub fn is_tile_scoped(&self) -> bool {
        matches!(
            self,
            MosaicError::MissingLayoutEntry { .. }
                | MosaicError::EmptyTileExtent { .. }
                | MosaicError::InvalidTileNumber { .. }
                | MosaicError::OutsideGrid { .. }
                | MosaicError::Source { .. }
                | MosaicError::Sink { .. }
        )
    }
}
