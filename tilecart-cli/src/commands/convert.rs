//! Convert command - promote every tile's barcodes to global coordinates.

use std::path::PathBuf;
use std::time::Instant;

use tilecart::io::{discover_barcode_sources, PointTsvSink};
use tracing::info;

use super::{print_failures, resolve_mosaic_config, GlobalArgs, ModeArg, MosaicOverrides};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the convert command.
pub struct ConvertArgs {
    pub data_dir: PathBuf,
    pub out_dir: PathBuf,
    pub mode: Option<ModeArg>,
    pub lane: Option<u32>,
    pub layout: Option<String>,
    pub gap: Option<i64>,
    pub unit_scale: Option<f64>,
    pub threads: Option<usize>,
    pub manifest: Option<PathBuf>,
    pub plain: bool,
}

/// Run the convert command.
pub fn run(global: &GlobalArgs, args: ConvertArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(global)?;
    runner.log_startup("convert");

    let (_, layout) = runner.layout(args.layout.as_deref())?;
    let config = resolve_mosaic_config(
        runner.config(),
        MosaicOverrides {
            gap: args.gap,
            unit_scale: args.unit_scale,
            mode: args.mode,
            threads: args.threads,
        },
    )?;

    let sources = discover_barcode_sources(&args.data_dir, args.lane)
        .map_err(CliError::table(&args.data_dir))?;
    if sources.is_empty() {
        return Err(CliError::NoTiles(args.data_dir));
    }

    println!("Converting {} tiles", sources.len());
    println!("  Mode: {}", config.mode());
    println!("  Unit scale: {}", config.unit_scale());
    println!("  Threads: {}", config.threads());
    println!();

    let mut sink = PointTsvSink::new(&args.out_dir);
    if args.plain {
        sink = sink.uncompressed();
    }

    let start = Instant::now();
    let pipeline = runner.pipeline(layout, config, args.manifest.as_deref())?;
    let report = pipeline.run(&sources, &sink)?;
    let elapsed = start.elapsed();

    info!(
        tiles = report.points_written.len(),
        points = report.total_points(),
        failed = report.failures.len(),
        "Convert finished"
    );
    println!(
        "Grid width: {}, height: {}",
        report.geometry.grid_width(),
        report.geometry.grid_height()
    );
    println!(
        "Wrote {} points from {} tiles to {} in {:.2}s",
        report.total_points(),
        report.points_written.len(),
        args.out_dir.display(),
        elapsed.as_secs_f64()
    );
    print_failures(&report.failures);

    Ok(())
}
