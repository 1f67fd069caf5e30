//! Row/column layout of every tile on the scan bed.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::MosaicError;
use crate::io::TableError;

use super::{TileKey, TileNumbering};

/// Grid position of one tile. Rows count from the top, columns from the
/// left, both starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutEntry {
    pub row: u32,
    pub col: u32,
}

/// Immutable lookup table from tile key to layout position.
///
/// Loaded once per run and shared read-only between workers.
#[derive(Debug, Clone, Default)]
pub struct LayoutTable {
    entries: BTreeMap<TileKey, LayoutEntry>,
    max_row: u32,
}

impl LayoutTable {
    /// Build a table from entries, rejecting duplicates and zero rows/cols.
    pub fn from_entries<I>(entries: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (TileKey, LayoutEntry)>,
    {
        let mut table = Self::default();
        for (key, entry) in entries {
            table.insert(key, entry, 0)?;
        }
        Ok(table)
    }

    /// Built-in HiSeq layout.
    ///
    /// Positions are derived from the tile numbers: the mosaic row counted
    /// from the bottom becomes `row = max_row - m + 1`, so the first tile of
    /// surface 1 sits on the bottom row.
    pub fn hiseq() -> Self {
        Self::from_numbering(&TileNumbering::hiseq())
    }

    /// Layout for every tile of a numbering scheme.
    pub fn from_numbering(numbering: &TileNumbering) -> Self {
        let max_row = numbering.rows();
        let entries = numbering
            .keys()
            .filter_map(|key| {
                let pos = numbering.mosaic_position(key).ok()?;
                Some((
                    key,
                    LayoutEntry {
                        row: max_row - pos.row_from_bottom + 1,
                        col: pos.col_from_left,
                    },
                ))
            })
            .collect::<BTreeMap<_, _>>();
        Self { entries, max_row }
    }

    /// Load a layout TSV file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let table = Self::from_reader(BufReader::new(file))?;
        tracing::info!(
            path = %path.display(),
            tiles = table.len(),
            max_row = table.max_row(),
            "Loaded tile layout"
        );
        Ok(table)
    }

    /// Parse a tab-separated layout table.
    ///
    /// The first non-empty line is a header that must name `lane`, `tile`,
    /// `row` and `col` columns, in any order.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut lines = BufReader::new(reader).lines().enumerate();
        let mut table = Self::default();

        let header = loop {
            match lines.next() {
                Some((_, line)) => {
                    let line = line?;
                    if !line.trim().is_empty() {
                        break line;
                    }
                }
                None => return Ok(table),
            }
        };
        let columns: Vec<&str> = header.split('\t').map(str::trim).collect();
        let find = |name: &str| {
            columns
                .iter()
                .position(|c| *c == name)
                .ok_or_else(|| TableError::MissingColumn(name.to_string()))
        };
        let (lane_idx, tile_idx, row_idx, col_idx) =
            (find("lane")?, find("tile")?, find("row")?, find("col")?);

        for (idx, line) in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let line_no = idx + 1;
            let fields: Vec<&str> = line.split('\t').collect();
            let field = |i: usize, name: &str| -> Result<u32, TableError> {
                let raw = fields.get(i).ok_or_else(|| TableError::InvalidFormat {
                    line: line_no,
                    message: format!("missing {} column", name),
                })?;
                raw.trim().parse().map_err(|_| TableError::InvalidFormat {
                    line: line_no,
                    message: format!("{} '{}' is not an integer", name, raw.trim()),
                })
            };
            let key = TileKey::new(field(lane_idx, "lane")?, field(tile_idx, "tile")?);
            let entry = LayoutEntry {
                row: field(row_idx, "row")?,
                col: field(col_idx, "col")?,
            };
            table.insert(key, entry, line_no)?;
        }

        Ok(table)
    }

    fn insert(&mut self, key: TileKey, entry: LayoutEntry, line: usize) -> Result<(), TableError> {
        if entry.row == 0 || entry.col == 0 {
            return Err(TableError::InvalidFormat {
                line,
                message: format!("tile {} has row/col below 1", key),
            });
        }
        if self.entries.insert(key, entry).is_some() {
            return Err(TableError::InvalidFormat {
                line,
                message: format!("duplicate layout entry for tile {}", key),
            });
        }
        self.max_row = self.max_row.max(entry.row);
        Ok(())
    }

    /// Row and column of a tile.
    ///
    /// A missing entry is an error, never a default position: without it the
    /// tile's physical location is unknown.
    pub fn lookup(&self, key: TileKey) -> Result<LayoutEntry, MosaicError> {
        self.entries
            .get(&key)
            .copied()
            .ok_or(MosaicError::MissingLayoutEntry { key })
    }

    /// Largest row number in the table.
    pub fn max_row(&self) -> u32 {
        self.max_row
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TileKey, &LayoutEntry)> {
        self.entries.iter()
    }
}
