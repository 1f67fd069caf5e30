//! Hexagon centroid tables from factor analysis.
//!
//! `Hex_center_y` is read as the local x and `Hex_center_x` as the local y.
//! The centroid and hexagon-index columns are consumed; every other column
//! passes through in its original order.

use std::io::BufRead;
use std::path::Path;

use crate::promote::Centroid;

use super::{open_text, parse_field, Header, TableError};

const X_COLUMN: &str = "Hex_center_y";
const Y_COLUMN: &str = "Hex_center_x";
const DROPPED: [&str; 6] = [
    "Hex_center_x",
    "Hex_center_y",
    "offs_x",
    "offs_y",
    "hex_x",
    "hex_y",
];

/// Centroids plus the header of their passthrough columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CentroidTable {
    pub columns: Vec<String>,
    pub rows: Vec<Centroid<Vec<String>>>,
}

impl CentroidTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn parse<R: BufRead>(reader: R) -> Result<Self, TableError> {
        let mut lines = reader.lines().enumerate();
        let header = match lines.next() {
            Some((_, line)) => Header::parse(&line?),
            None => return Ok(Self::default()),
        };
        let x_idx = header.position(X_COLUMN)?;
        let y_idx = header.position(Y_COLUMN)?;
        let kept: Vec<usize> = (0..header.columns.len())
            .filter(|&i| !DROPPED.contains(&header.columns[i].as_str()))
            .collect();

        let mut table = Self {
            columns: kept.iter().map(|&i| header.columns[i].clone()).collect(),
            rows: Vec::new(),
        };
        for (idx, line) in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let line_no = idx + 1;
            let fields: Vec<&str> = line.split('\t').collect();
            table.rows.push(Centroid {
                x_local: parse_field(&fields, x_idx, X_COLUMN, line_no)?,
                y_local: parse_field(&fields, y_idx, Y_COLUMN, line_no)?,
                payload: kept
                    .iter()
                    .map(|&i| fields.get(i).copied().unwrap_or_default().to_string())
                    .collect(),
            });
        }
        Ok(table)
    }
}

/// Read a centroid TSV (optionally gzipped).
pub fn read_centroids(path: &Path) -> Result<CentroidTable, TableError> {
    let table = CentroidTable::parse(open_text(path)?)?;
    tracing::info!(
        path = %path.display(),
        rows = table.len(),
        columns = table.columns.len(),
        "Read centroid table"
    );
    Ok(table)
}
