//! Dataset metadata: the persisted result of a mosaic survey.
//!
//! Records every placed tile with its extent and false origin, plus the
//! grid constants, so later steps can promote tiles without rescanning.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::MosaicError;
use crate::layout::TileKey;
use crate::mosaic::{GridGeometry, Mosaic, TileMetadata};

/// Errors reading or writing metadata files.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid metadata JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Mosaic(#[from] MosaicError),
}

/// Grid block of the metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayoutInfo {
    /// Layout scheme name or layout file path
    pub scheme: String,
    pub max_row: u32,
    pub grid_gap: i64,
    pub grid_width: i64,
    pub grid_height: i64,
}

impl TileLayoutInfo {
    pub fn geometry(&self) -> Result<GridGeometry, MosaicError> {
        GridGeometry::new(self.grid_width, self.grid_height, self.grid_gap, self.max_row)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub dataset: String,
    pub data_dir: PathBuf,
    /// Per-tile records keyed by `lane-tile`
    pub tiles: BTreeMap<String, TileMetadata>,
    pub number_of_tiles: usize,
    pub list_of_tiles: Vec<String>,
    pub tile_layout: TileLayoutInfo,
}

impl DatasetMetadata {
    /// Collect metadata from a placed mosaic.
    pub fn from_mosaic(
        dataset: impl Into<String>,
        data_dir: impl Into<PathBuf>,
        scheme: impl Into<String>,
        mosaic: &Mosaic,
    ) -> Result<Self, MosaicError> {
        let geometry = mosaic.geometry().ok_or_else(|| {
            MosaicError::IncompleteGridGeometry("metadata requires a sized grid".to_string())
        })?;
        let tiles: BTreeMap<String, TileMetadata> = mosaic
            .tiles()
            .iter()
            .map(|t| (t.key().to_string(), t.metadata()))
            .collect();
        let list_of_tiles: Vec<String> = tiles.keys().cloned().collect();
        Ok(Self {
            dataset: dataset.into(),
            data_dir: data_dir.into(),
            number_of_tiles: tiles.len(),
            list_of_tiles,
            tiles,
            tile_layout: TileLayoutInfo {
                scheme: scheme.into(),
                max_row: geometry.max_row(),
                grid_gap: geometry.grid_gap(),
                grid_width: geometry.grid_width(),
                grid_height: geometry.grid_height(),
            },
        })
    }

    /// Record for one tile.
    pub fn tile(&self, key: TileKey) -> Option<&TileMetadata> {
        self.tiles.get(&key.to_string())
    }

    pub fn to_json(&self) -> Result<String, MetadataError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), MetadataError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_json()?)?;
        tracing::info!(path = %path.display(), tiles = self.number_of_tiles, "Wrote dataset metadata");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, MetadataError> {
        let text = fs::read_to_string(path)?;
        let metadata: Self = serde_json::from_str(&text)?;
        metadata.tile_layout.geometry()?;
        Ok(metadata)
    }
}
