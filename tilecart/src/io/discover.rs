//! Dataset discovery.
//!
//! A dataset is laid out as `<root>/<lane>/<tile>/barcodes.tsv[.gz]`,
//! with integer lane and tile directory names.

use std::fs;
use std::path::Path;

use crate::layout::TileKey;
use crate::pipeline::TileSource;

use super::{BarcodeSource, TableError};

/// Accepted barcode file names, in lookup order.
pub const BARCODE_FILE_NAMES: [&str; 2] = ["barcodes.tsv.gz", "barcodes.tsv"];

fn numeric_subdirs(dir: &Path) -> Result<Vec<(u32, std::path::PathBuf)>, TableError> {
    let mut found = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name();
        match name.to_str().and_then(|n| n.parse::<u32>().ok()) {
            Some(number) => found.push((number, path)),
            None => tracing::debug!(path = %path.display(), "Skipping non-numeric directory"),
        }
    }
    Ok(found)
}

/// Find every tile of a dataset, sorted by key.
///
/// `lane` restricts discovery to one lane. A tile directory without a
/// barcode file still yields a source, so that the failure is reported
/// when the tile is read instead of the tile vanishing.
pub fn discover_barcode_sources(
    data_root: &Path,
    lane: Option<u32>,
) -> Result<Vec<BarcodeSource>, TableError> {
    let mut sources = Vec::new();
    for (lane_id, lane_dir) in numeric_subdirs(data_root)? {
        if lane.is_some_and(|l| l != lane_id) {
            continue;
        }
        for (tile_id, tile_dir) in numeric_subdirs(&lane_dir)? {
            let file = BARCODE_FILE_NAMES
                .iter()
                .map(|name| tile_dir.join(name))
                .find(|p| p.is_file())
                .unwrap_or_else(|| tile_dir.join(BARCODE_FILE_NAMES[0]));
            sources.push(BarcodeSource::new(TileKey::new(lane_id, tile_id), file));
        }
    }
    sources.sort_by_key(|s| s.key());
    tracing::info!(
        root = %data_root.display(),
        tiles = sources.len(),
        "Discovered tiles"
    );
    Ok(sources)
}
