//! Physical tile layout.
//!
//! Two independent ways of knowing where a tile sits on the scan bed:
//!
//! - [`LayoutTable`]: reference data mapping `(lane, tile)` to a
//!   `(row, col)` grid position, used for false-origin placement
//! - [`TileNumbering`]: decodes the position directly from the digits of a
//!   tile number, used by tile-relative promotion
//!
//! The built-in HiSeq table is generated from the numbering scheme, so both
//! agree for HiSeq flow cells.

mod key;
mod table;
mod tile_number;

pub use key::{ParseTileKeyError, TileKey};
pub use table::{LayoutEntry, LayoutTable};
pub use tile_number::{MosaicPosition, TileNumber, TileNumbering};

/// Resolve a layout scheme name or file path to a table.
///
/// `hiseq` selects the built-in table; anything else is read as a layout
/// TSV path.
pub fn load_layout(scheme: &str) -> Result<LayoutTable, crate::io::TableError> {
    match scheme.trim().to_lowercase().as_str() {
        "hiseq" => Ok(LayoutTable::hiseq()),
        _ => LayoutTable::from_file(scheme.trim()),
    }
}
