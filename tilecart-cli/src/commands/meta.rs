//! Meta command - survey a dataset and write its metadata.

use std::path::PathBuf;

use tilecart::io::discover_barcode_sources;
use tilecart::metadata::DatasetMetadata;

use super::{print_failures, resolve_mosaic_config, GlobalArgs, MosaicOverrides};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the meta command.
pub struct MetaArgs {
    pub name: String,
    pub data_dir: PathBuf,
    pub output: PathBuf,
    pub lane: Option<u32>,
    pub layout: Option<String>,
    pub gap: Option<i64>,
    pub manifest: Option<PathBuf>,
}

/// Run the meta command.
pub fn run(global: &GlobalArgs, args: MetaArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(global)?;
    runner.log_startup("meta");

    let (scheme, layout) = runner.layout(args.layout.as_deref())?;
    let config = resolve_mosaic_config(
        runner.config(),
        MosaicOverrides {
            gap: args.gap,
            ..Default::default()
        },
    )?;

    let sources = discover_barcode_sources(&args.data_dir, args.lane)
        .map_err(CliError::table(&args.data_dir))?;
    if sources.is_empty() {
        return Err(CliError::NoTiles(args.data_dir));
    }
    println!("Found {} tiles in {}", sources.len(), args.data_dir.display());

    let pipeline = runner.pipeline(layout, config, args.manifest.as_deref())?;
    let mosaic = pipeline.survey(&sources)?;

    let metadata = DatasetMetadata::from_mosaic(&args.name, &args.data_dir, scheme, &mosaic)?;
    println!(
        "Grid width: {}, height: {}",
        metadata.tile_layout.grid_width, metadata.tile_layout.grid_height
    );
    metadata.save(&args.output)?;

    println!(
        "Wrote metadata for {} tiles to {}",
        metadata.number_of_tiles,
        args.output.display()
    );
    print_failures(mosaic.failures());

    Ok(())
}
