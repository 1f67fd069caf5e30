//! TSV output for promoted points and hexagons.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::MosaicError;
use crate::hexagon::HexagonRecord;
use crate::mosaic::Tile;
use crate::pipeline::TileSink;
use crate::promote::GlobalPoint;

use super::{create_text, Barcode, TableError};

/// Payload columns written after `x` and `y`.
pub trait Passthrough {
    /// Column names for this row's values.
    fn column_names(&self) -> Vec<String>;
    /// Values, one per column name.
    fn values(&self) -> Vec<String>;
}

impl Passthrough for () {
    fn column_names(&self) -> Vec<String> {
        Vec::new()
    }

    fn values(&self) -> Vec<String> {
        Vec::new()
    }
}

impl Passthrough for Barcode {
    fn column_names(&self) -> Vec<String> {
        let mut names = vec![
            "barcode".to_string(),
            "barcode_id".to_string(),
            "col1".to_string(),
        ];
        names.extend((0..self.counts.len()).map(|i| match i {
            0 => "counts".to_string(),
            i => format!("counts_{}", i + 1),
        }));
        names
    }

    fn values(&self) -> Vec<String> {
        let mut values = vec![
            self.barcode.clone(),
            self.barcode_id.to_string(),
            self.col1.clone(),
        ];
        values.extend(self.counts.iter().cloned());
        values
    }
}

/// Write promoted points with an `x  y  <passthrough>` header.
///
/// The passthrough header is taken from the first row. A later row with a
/// different number of passthrough values is rejected, since its columns
/// would no longer line up with the header.
pub fn write_points<W, P>(out: &mut W, points: &[GlobalPoint<P>]) -> Result<(), TableError>
where
    W: Write + ?Sized,
    P: Passthrough,
{
    let mut header = vec!["x".to_string(), "y".to_string()];
    if let Some(first) = points.first() {
        header.extend(first.payload.column_names());
    }
    let width = header.len() - 2;
    writeln!(out, "{}", header.join("\t"))?;
    for (i, point) in points.iter().enumerate() {
        let values = point.payload.values();
        if values.len() != width {
            return Err(TableError::InvalidFormat {
                line: i + 2,
                message: format!(
                    "{} passthrough values where the header has {}",
                    values.len(),
                    width
                ),
            });
        }
        let mut fields = vec![point.x.to_string(), point.y.to_string()];
        fields.extend(values);
        writeln!(out, "{}", fields.join("\t"))?;
    }
    out.flush()?;
    Ok(())
}

/// Write hexagon rows: `x  y  geometry  <columns>`, geometry as WKT.
pub fn write_hexagons(
    path: &Path,
    columns: &[String],
    records: &[HexagonRecord<Vec<String>>],
) -> Result<(), TableError> {
    let mut out = create_text(path)?;
    let mut header = vec!["x".to_string(), "y".to_string(), "geometry".to_string()];
    header.extend(columns.iter().cloned());
    writeln!(out, "{}", header.join("\t"))?;
    for record in records {
        write!(
            out,
            "{}\t{}\t{}",
            record.center.x,
            record.center.y,
            record.hexagon.to_wkt()
        )?;
        for value in &record.payload {
            write!(out, "\t{}", value)?;
        }
        writeln!(out)?;
    }
    out.finish()?;
    tracing::info!(path = %path.display(), rows = records.len(), "Wrote hexagon table");
    Ok(())
}

/// Writes one `<lane>-<tile>.tsv.gz` file per tile into a directory.
#[derive(Debug, Clone)]
pub struct PointTsvSink {
    out_dir: PathBuf,
    extension: &'static str,
}

impl PointTsvSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            extension: "tsv.gz",
        }
    }

    /// Write plain, uncompressed TSV instead.
    pub fn uncompressed(mut self) -> Self {
        self.extension = "tsv";
        self
    }

    pub fn path_for(&self, tile: &Tile) -> PathBuf {
        self.out_dir
            .join(format!("{}.{}", tile.key(), self.extension))
    }
}

impl<P: Passthrough + Sync> TileSink<P> for PointTsvSink {
    fn write_tile(&self, tile: &Tile, points: &[GlobalPoint<P>]) -> Result<(), MosaicError> {
        let path = self.path_for(tile);
        let sink_error = |e: TableError| MosaicError::Sink {
            key: tile.key(),
            message: format!("{}: {}", path.display(), e),
        };
        let mut out = create_text(&path).map_err(|e| sink_error(e.into()))?;
        write_points(&mut out, points).map_err(sink_error)?;
        out.finish().map_err(|e| sink_error(e.into()))?;
        tracing::debug!(tile = %tile.key(), path = %path.display(), rows = points.len(), "Wrote tile");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hexagon::{HexagonBinner, HexagonConfig};
    use crate::io::open_text;
    use crate::layout::{LayoutEntry, TileKey};
    use crate::log::NoOpLogger;
    use crate::mosaic::{GridGeometry, TileExtent, UnplacedTile};
    use crate::promote::Centroid;
    use std::io::Read;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn barcode() -> Barcode {
        Barcode {
            barcode: "ACGT".to_string(),
            barcode_id: 9,
            col1: "1".to_string(),
            counts: vec!["4".to_string()],
        }
    }

    #[test]
    fn test_write_points_header_and_rows() {
        let mut out = Vec::new();
        let points = vec![GlobalPoint {
            x: 1.5,
            y: -2.0,
            payload: barcode(),
        }];
        write_points(&mut out, &points).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "x\ty\tbarcode\tbarcode_id\tcol1\tcounts\n1.5\t-2\tACGT\t9\t1\t4\n"
        );
    }

    #[test]
    fn test_write_points_rejects_ragged_counts() {
        let mut wide = barcode();
        wide.counts.push("2".to_string());
        let points = vec![
            GlobalPoint {
                x: 0.0,
                y: 0.0,
                payload: barcode(),
            },
            GlobalPoint {
                x: 1.0,
                y: 1.0,
                payload: wide,
            },
        ];
        let mut out = Vec::new();
        let err = write_points(&mut out, &points).unwrap_err();
        assert!(matches!(err, TableError::InvalidFormat { line: 3, .. }));
        assert!(err.to_string().contains("5 passthrough values where the header has 4"));
    }

    #[test]
    fn test_sink_writes_gzip_per_tile() {
        let temp = TempDir::new().unwrap();
        let tile = UnplacedTile::new(
            TileKey::new(2, 2113),
            "/data",
            LayoutEntry { row: 1, col: 1 },
            TileExtent::new(0, 0, 1, 1).unwrap(),
        )
        .place(&GridGeometry::new(1, 1, 0, 1).unwrap())
        .unwrap();
        let sink = PointTsvSink::new(temp.path());
        let points = vec![GlobalPoint {
            x: 0.0,
            y: 0.0,
            payload: (),
        }];
        TileSink::write_tile(&sink, &tile, &points).unwrap();

        let path = temp.path().join("2-2113.tsv.gz");
        let raw = std::fs::read(&path).unwrap();
        let trailer = &raw[raw.len() - 8..];
        assert_eq!(u32::from_le_bytes(trailer[4..].try_into().unwrap()), 8);

        let mut text = String::new();
        open_text(&path).unwrap().read_to_string(&mut text).unwrap();
        assert_eq!(text, "x\ty\n0\t0\n");
    }

    #[test]
    fn test_write_hexagons() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("hex.tsv");
        let binner = HexagonBinner::new(
            HexagonConfig::new(80.0, 0.0, 1.0, 0.0, 0.0).unwrap(),
            Arc::new(NoOpLogger),
        );
        let records = binner.bin(vec![Centroid {
            x_local: 0.0,
            y_local: 0.0,
            payload: vec!["7".to_string()],
        }]);
        write_hexagons(&path, &["topK".to_string()], &records).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("x\ty\tgeometry\ttopK"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("0\t0\tPOLYGON (("));
        assert!(row.ends_with("))\t7"));
    }
}
