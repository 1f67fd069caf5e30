//! Tab-separated readers and writers around the coordinate core.
//!
//! These are thin adapters: they turn files into [`PointRecord`]s,
//! [`Centroid`]s and tile extents, and write promoted rows back out. Any
//! file ending in `.gz` is transparently gzip-decoded or encoded.
//!
//! [`PointRecord`]: crate::promote::PointRecord
//! [`Centroid`]: crate::promote::Centroid

mod barcodes;
mod centroids;
mod discover;
mod manifest;
mod writer;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use thiserror::Error;

pub use barcodes::{parse_barcode_line, Barcode, BarcodeSource};
pub use centroids::{read_centroids, CentroidTable};
pub use discover::{discover_barcode_sources, BARCODE_FILE_NAMES};
pub use manifest::{parse_manifest, read_manifest, ManifestEntry};
pub use writer::{write_hexagons, write_points, Passthrough, PointTsvSink};

/// Errors from reading or writing a table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A row could not be parsed
    #[error("line {line}: {message}")]
    InvalidFormat { line: usize, message: String },

    /// The header lacks a required column
    #[error("missing required column '{0}'")]
    MissingColumn(String),
}

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// Open a text file for line reading, decoding gzip for `.gz` paths.
pub fn open_text(path: &Path) -> io::Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    if is_gzip(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Output file opened by [`create_text`].
///
/// Call [`TextWriter::finish`] once all rows are written. Dropping the
/// writer instead loses any error from the final flush, and for gzip
/// output the trailer may be missing.
pub enum TextWriter {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl TextWriter {
    /// Flush buffered rows and, for gzip output, write the trailer.
    pub fn finish(self) -> io::Result<()> {
        let buffered = match self {
            TextWriter::Plain(out) => out,
            TextWriter::Gzip(encoder) => encoder.finish()?,
        };
        buffered.into_inner().map_err(|e| e.into_error())?;
        Ok(())
    }
}

impl Write for TextWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            TextWriter::Plain(out) => out.write(buf),
            TextWriter::Gzip(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            TextWriter::Plain(out) => out.flush(),
            TextWriter::Gzip(encoder) => encoder.flush(),
        }
    }
}

/// Create a text file, gzip-encoding for `.gz` paths.
///
/// Parent directories are created as needed.
pub fn create_text(path: &Path) -> io::Result<TextWriter> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = BufWriter::new(File::create(path)?);
    if is_gzip(path) {
        Ok(TextWriter::Gzip(GzEncoder::new(file, Compression::default())))
    } else {
        Ok(TextWriter::Plain(file))
    }
}

/// Parse one tab-separated field, naming the column in the error.
fn parse_field<T: FromStr>(
    fields: &[&str],
    index: usize,
    name: &str,
    line: usize,
) -> Result<T, TableError> {
    let raw = fields.get(index).ok_or_else(|| TableError::InvalidFormat {
        line,
        message: format!("missing {} column", name),
    })?;
    raw.trim().parse().map_err(|_| TableError::InvalidFormat {
        line,
        message: format!("{} '{}' is not a number", name, raw.trim()),
    })
}

/// Column positions from a header line.
#[derive(Debug, Clone)]
struct Header {
    columns: Vec<String>,
}

impl Header {
    fn parse(line: &str) -> Self {
        Self {
            columns: line.split('\t').map(|c| c.trim().to_string()).collect(),
        }
    }

    fn position(&self, name: &str) -> Result<usize, TableError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }
}
