//! Per-tile barcode tables.
//!
//! Headerless rows of
//! `barcode  barcode_id  col1  lane  tile  y_  x_  counts...`.
//! Note that the file stores `y_` before `x_`.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::error::MosaicError;
use crate::layout::TileKey;
use crate::mosaic::TileExtent;
use crate::pipeline::TileSource;
use crate::promote::PointRecord;

use super::{open_text, parse_field, TableError};

const LANE: usize = 3;
const TILE: usize = 4;
const Y_LOCAL: usize = 5;
const X_LOCAL: usize = 6;
const FIRST_COUNT: usize = 7;

/// Passthrough columns of a barcode row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Barcode {
    pub barcode: String,
    pub barcode_id: u64,
    pub col1: String,
    /// `counts` and any further columns, untouched
    pub counts: Vec<String>,
}

/// Parse one barcode row.
pub fn parse_barcode_line(line: &str, line_no: usize) -> Result<PointRecord<Barcode>, TableError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < FIRST_COUNT {
        return Err(TableError::InvalidFormat {
            line: line_no,
            message: format!(
                "expected at least {} columns, found {}",
                FIRST_COUNT,
                fields.len()
            ),
        });
    }
    let key = TileKey::new(
        parse_field(&fields, LANE, "lane", line_no)?,
        parse_field(&fields, TILE, "tile", line_no)?,
    );
    Ok(PointRecord {
        key,
        x_local: parse_field(&fields, X_LOCAL, "x_", line_no)?,
        y_local: parse_field(&fields, Y_LOCAL, "y_", line_no)?,
        payload: Barcode {
            barcode: fields[0].to_string(),
            barcode_id: parse_field(&fields, 1, "barcode_id", line_no)?,
            col1: fields[2].to_string(),
            counts: fields[FIRST_COUNT..].iter().map(|f| f.to_string()).collect(),
        },
    })
}

fn for_each_row<R, F>(reader: R, mut f: F) -> Result<(), TableError>
where
    R: BufRead,
    F: FnMut(usize, PointRecord<Barcode>) -> Result<(), TableError>,
{
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        f(idx + 1, parse_barcode_line(&line, idx + 1)?)?;
    }
    Ok(())
}

/// Barcode table of one tile, read on demand.
#[derive(Debug, Clone)]
pub struct BarcodeSource {
    key: TileKey,
    path: PathBuf,
}

impl BarcodeSource {
    pub fn new(key: TileKey, path: impl Into<PathBuf>) -> Self {
        Self {
            key,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn source_error(&self, e: TableError) -> MosaicError {
        MosaicError::Source {
            key: self.key,
            message: format!("{}: {}", self.path.display(), e),
        }
    }

    /// Rows belonging to another tile are a data error, not a silent skip.
    fn check_key(&self, row: &PointRecord<Barcode>, line: usize) -> Result<(), TableError> {
        if row.key != self.key {
            return Err(TableError::InvalidFormat {
                line,
                message: format!("row belongs to tile {}, expected {}", row.key, self.key),
            });
        }
        Ok(())
    }
}

impl TileSource for BarcodeSource {
    type Payload = Barcode;

    fn key(&self) -> TileKey {
        self.key
    }

    fn location(&self) -> &Path {
        self.path.parent().unwrap_or(&self.path)
    }

    fn read_points(&self) -> Result<Vec<PointRecord<Barcode>>, MosaicError> {
        let mut rows = Vec::new();
        let reader = open_text(&self.path).map_err(|e| self.source_error(e.into()))?;
        for_each_row(reader, |line, row| {
            self.check_key(&row, line)?;
            rows.push(row);
            Ok(())
        })
        .map_err(|e| self.source_error(e))?;
        tracing::debug!(tile = %self.key, path = %self.path.display(), rows = rows.len(), "Read barcode table");
        Ok(rows)
    }

    /// Streams the file without keeping rows in memory.
    fn read_extent(&self) -> Result<TileExtent, MosaicError> {
        let mut extent: Option<TileExtent> = None;
        let reader = open_text(&self.path).map_err(|e| self.source_error(e.into()))?;
        for_each_row(reader, |line, row| {
            self.check_key(&row, line)?;
            extent = Some(match extent {
                Some(mut e) => {
                    e.include(row.x_local, row.y_local);
                    e
                }
                None => TileExtent::of_point(row.x_local, row.y_local),
            });
            Ok(())
        })
        .map_err(|e| self.source_error(e))?;
        extent.ok_or(MosaicError::EmptyTileExtent { key: self.key })
    }
}
