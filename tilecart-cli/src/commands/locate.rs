//! Locate command - where one local pixel lands on the global grid.

use std::path::PathBuf;

use tilecart::layout::TileKey;
use tilecart::metadata::DatasetMetadata;
use tilecart::mosaic::{locate, GridGeometry};

use super::GlobalArgs;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the locate command.
pub struct LocateArgs {
    pub lane: u32,
    pub tile: u32,
    pub x: i64,
    pub y: i64,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub metadata: Option<PathBuf>,
    pub layout: Option<String>,
    pub gap: Option<i64>,
}

/// Run the locate command.
///
/// Prints the global `x  y` pair in pixels.
pub fn run(global: &GlobalArgs, args: LocateArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(global)?;
    runner.log_startup("locate");

    let key = TileKey::new(args.lane, args.tile);

    let (scheme, geometry) = match &args.metadata {
        Some(path) => {
            let metadata = DatasetMetadata::load(path)?;
            let geometry = metadata.tile_layout.geometry()?;
            (
                args.layout.clone().unwrap_or(metadata.tile_layout.scheme),
                Some(geometry),
            )
        }
        None => (
            args.layout
                .clone()
                .unwrap_or_else(|| runner.config().grid.scheme.clone()),
            None,
        ),
    };
    let (_, layout) = runner.layout(Some(scheme.as_str()))?;

    let geometry = match geometry {
        Some(geometry) => geometry,
        None => {
            let (width, height) = match (args.width, args.height) {
                (Some(w), Some(h)) => (w, h),
                _ => {
                    return Err(CliError::Config(
                        "--width and --height are required without --metadata".to_string(),
                    ))
                }
            };
            GridGeometry::new(
                width,
                height,
                args.gap.unwrap_or(runner.config().grid.gap),
                layout.max_row(),
            )?
        }
    };

    let (x, y) = locate(&layout, &geometry, key, args.x, args.y)?;
    println!("{}\t{}", x, y);

    Ok(())
}
