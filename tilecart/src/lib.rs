//! Tilecart - tile mosaic coordinates for spatial transcriptomics output
//!
//! Sequencing-based spatial transcriptomics instruments scan a flow cell as
//! independent imaging tiles, each with its own local pixel origin. This
//! library places every tile on one shared grid and promotes per-tile point
//! coordinates into that global coordinate system.
//!
//! # High-Level API
//!
//! ```ignore
//! use std::sync::Arc;
//! use tilecart::layout::LayoutTable;
//! use tilecart::log::TracingLogger;
//! use tilecart::pipeline::{MosaicConfig, MosaicPipeline};
//!
//! let layout = Arc::new(LayoutTable::hiseq());
//! let pipeline = MosaicPipeline::new(layout, MosaicConfig::default(), Arc::new(TracingLogger))?;
//! let report = pipeline.run(&sources, &sink)?;
//! ```
//!
//! # Modules
//!
//! - [`layout`] - physical row/column layout and tile-number decoding
//! - [`mosaic`] - extents, grid sizing, false origins and placed tiles
//! - [`promote`] - local to global coordinate promotion
//! - [`hexagon`] - hexagon polygons for factor-analysis centroids
//! - [`pipeline`] - two-phase parallel mosaic run
//! - [`io`] - thin TSV readers and writers around the core

pub mod config;
pub mod error;
pub mod hexagon;
pub mod io;
pub mod layout;
pub mod log;
pub mod logging;
pub mod metadata;
pub mod mosaic;
pub mod pipeline;
pub mod promote;

pub use error::MosaicError;

/// Version of the tilecart library and CLI.
///
/// The version is defined in the workspace `Cargo.toml` and injected at
/// compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
