//! Tile manifest: precomputed extents keyed by `lane_tile` id.

use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::Path;

use crate::layout::TileKey;
use crate::mosaic::TileExtent;

use super::{open_text, parse_field, Header, TableError};

/// One manifest row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestEntry {
    pub key: TileKey,
    pub extent: TileExtent,
}

/// Parse a manifest from any reader.
///
/// Requires `id`, `xmin`, `ymin`, `xmax` and `ymax` columns; any other
/// columns are ignored.
pub fn parse_manifest<R: BufRead>(reader: R) -> Result<BTreeMap<TileKey, TileExtent>, TableError> {
    let mut lines = reader.lines().enumerate();
    let mut extents = BTreeMap::new();

    let header = match lines.next() {
        Some((_, line)) => Header::parse(&line?),
        None => return Ok(extents),
    };
    let id = header.position("id")?;
    let cols = [
        header.position("xmin")?,
        header.position("ymin")?,
        header.position("xmax")?,
        header.position("ymax")?,
    ];

    for (idx, line) in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;
        let fields: Vec<&str> = line.split('\t').collect();
        let raw_id = fields.get(id).map(|s| s.trim()).unwrap_or_default();
        let key: TileKey = raw_id.parse().map_err(|e| TableError::InvalidFormat {
            line: line_no,
            message: format!("{}", e),
        })?;
        let entry = ManifestEntry {
            key,
            extent: TileExtent::new(
                parse_field(&fields, cols[0], "xmin", line_no)?,
                parse_field(&fields, cols[1], "ymin", line_no)?,
                parse_field(&fields, cols[2], "xmax", line_no)?,
                parse_field(&fields, cols[3], "ymax", line_no)?,
            )
            .ok_or_else(|| TableError::InvalidFormat {
                line: line_no,
                message: format!("tile {} has a minimum above its maximum", key),
            })?,
        };
        if extents.insert(entry.key, entry.extent).is_some() {
            return Err(TableError::InvalidFormat {
                line: line_no,
                message: format!("duplicate manifest entry for tile {}", key),
            });
        }
    }
    Ok(extents)
}

/// Read a manifest file.
pub fn read_manifest(path: &Path) -> Result<BTreeMap<TileKey, TileExtent>, TableError> {
    let extents = parse_manifest(open_text(path)?)?;
    tracing::info!(path = %path.display(), tiles = extents.len(), "Loaded tile manifest");
    Ok(extents)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = "id\tnpixels\txmin\txmax\tymin\tymax\n\
                            2_2113\t9\t1\t4\t1\t3\n\
                            2_2114\t7\t0\t5\t0\t2\n";

    #[test]
    fn test_parse_manifest() {
        let extents = parse_manifest(MANIFEST.as_bytes()).unwrap();
        assert_eq!(extents.len(), 2);
        assert_eq!(
            extents[&TileKey::new(2, 2113)],
            TileExtent::new(1, 1, 4, 3).unwrap()
        );
    }

    #[test]
    fn test_bad_id() {
        let text = "id\txmin\tymin\txmax\tymax\nfoo\t0\t0\t1\t1\n";
        assert!(matches!(
            parse_manifest(text.as_bytes()),
            Err(TableError::InvalidFormat { line: 2, .. })
        ));
    }

    #[test]
    fn test_inverted_extent() {
        let text = "id\txmin\tymin\txmax\tymax\n1_1101\t5\t0\t1\t1\n";
        assert!(parse_manifest(text.as_bytes()).is_err());
    }

    #[test]
    fn test_missing_column() {
        let text = "id\txmin\tymin\txmax\n";
        assert!(matches!(
            parse_manifest(text.as_bytes()),
            Err(TableError::MissingColumn(ref c)) if c == "ymax"
        ));
    }
}
