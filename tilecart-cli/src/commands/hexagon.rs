//! Hexagon command - centroid table to hexagon polygons.

use std::path::PathBuf;
use std::sync::Arc;

use tilecart::hexagon::{HexagonBinner, HexagonConfig};
use tilecart::io::{read_centroids, write_hexagons};
use tilecart::log::TracingLogger;

use super::GlobalArgs;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the hexagon command.
pub struct HexagonArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub false_easting: f64,
    pub false_northing: f64,
    pub scale: Option<f64>,
    pub radius: Option<f64>,
    pub angle: Option<f64>,
}

/// Run the hexagon command.
pub fn run(global: &GlobalArgs, args: HexagonArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(global)?;
    runner.log_startup("hexagon");

    let settings = &runner.config().hexagon;
    let config = HexagonConfig::new(
        args.radius.unwrap_or(settings.inner_radius),
        args.angle.unwrap_or(settings.rotation),
        args.scale.unwrap_or(settings.scale),
        args.false_easting,
        args.false_northing,
    )?;

    let table = read_centroids(&args.input).map_err(CliError::table(&args.input))?;
    println!("Read {} centroids from {}", table.len(), args.input.display());

    let binner = HexagonBinner::new(config, Arc::new(TracingLogger));
    let records = binner.bin(table.rows);
    write_hexagons(&args.output, &table.columns, &records)
        .map_err(CliError::table(&args.output))?;

    println!(
        "Wrote {} hexagons (inner radius {}, edge {:.3}) to {}",
        records.len(),
        binner.config().inner_radius(),
        binner.config().edge_length(),
        args.output.display()
    );

    Ok(())
}
