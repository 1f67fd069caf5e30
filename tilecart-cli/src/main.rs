//! Tilecart CLI - Command-line interface
//!
//! Places spatial transcriptomics tiles on a shared grid and converts their
//! coordinates.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::convert::ConvertArgs;
use commands::hexagon::HexagonArgs;
use commands::locate::LocateArgs;
use commands::meta::MetaArgs;
use commands::ModeArg;

#[derive(Parser)]
#[command(name = "tilecart")]
#[command(version = tilecart::VERSION)]
#[command(about = "Tile mosaic coordinates for spatial transcriptomics data", long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.tilecart/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging regardless of RUST_LOG
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Survey a dataset and write its tile metadata as JSON
    Meta {
        /// Dataset name, e.g. RD2-Liver-All
        #[arg(short, long)]
        name: String,

        /// Dataset root laid out as <lane>/<tile>/barcodes.tsv[.gz]
        #[arg(short, long)]
        data_dir: PathBuf,

        /// Output file
        #[arg(short, long, default_value = "metadata.json")]
        output: PathBuf,

        /// Only this lane (default: all lanes)
        #[arg(short, long)]
        lane: Option<u32>,

        /// Layout scheme: 'hiseq' or a layout TSV (default from config)
        #[arg(short = 'y', long)]
        layout: Option<String>,

        /// Gap between tiles in pixels (default from config)
        #[arg(short, long)]
        gap: Option<i64>,

        /// Manifest TSV with precomputed tile extents
        #[arg(long)]
        manifest: Option<PathBuf>,
    },

    /// Convert every tile's barcodes to global coordinates
    Convert {
        /// Dataset root laid out as <lane>/<tile>/barcodes.tsv[.gz]
        #[arg(short, long)]
        data_dir: PathBuf,

        /// Output directory, one <lane>-<tile> file per tile
        #[arg(short, long)]
        out_dir: PathBuf,

        /// Promotion mode (default from config)
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,

        /// Only this lane (default: all lanes)
        #[arg(short, long)]
        lane: Option<u32>,

        /// Layout scheme: 'hiseq' or a layout TSV (default from config)
        #[arg(short = 'y', long)]
        layout: Option<String>,

        /// Gap between tiles in pixels (default from config)
        #[arg(short, long)]
        gap: Option<i64>,

        /// Pixels per output unit (default from config)
        #[arg(long)]
        unit_scale: Option<f64>,

        /// Worker threads (default from config)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Manifest TSV with precomputed tile extents
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Write plain .tsv instead of .tsv.gz
        #[arg(long)]
        plain: bool,
    },

    /// Turn factor-analysis centroids into hexagon polygons
    Hexagon {
        /// Centroid TSV (optionally gzipped)
        #[arg(short, long)]
        input: PathBuf,

        /// Output TSV with WKT geometry
        #[arg(short, long, default_value = "hexagons.tsv")]
        output: PathBuf,

        /// False easting subtracted after scaling
        #[arg(long = "x0", visible_alias = "false-easting", default_value = "0", allow_negative_numbers = true)]
        false_easting: f64,

        /// False northing subtracted after scaling
        #[arg(long = "y0", visible_alias = "false-northing", default_value = "0", allow_negative_numbers = true)]
        false_northing: f64,

        /// Multiplier applied to centroid coordinates (default from config)
        #[arg(short, long)]
        scale: Option<f64>,

        /// Inner radius of each hexagon (default from config)
        #[arg(short, long)]
        radius: Option<f64>,

        /// Rotation in degrees (default from config)
        #[arg(short, long, allow_negative_numbers = true)]
        angle: Option<f64>,
    },

    /// Convert one local pixel coordinate to the global grid
    Locate {
        #[arg(long)]
        lane: u32,

        #[arg(long)]
        tile: u32,

        /// Local x in pixels
        #[arg(long, allow_negative_numbers = true)]
        x: i64,

        /// Local y in pixels
        #[arg(long, allow_negative_numbers = true)]
        y: i64,

        /// Grid cell width; required unless --metadata is given
        #[arg(long, required_unless_present = "metadata")]
        width: Option<i64>,

        /// Grid cell height; required unless --metadata is given
        #[arg(long, required_unless_present = "metadata")]
        height: Option<i64>,

        /// Take the grid from a metadata file written by `tilecart meta`
        #[arg(long, conflicts_with_all = ["width", "height", "gap"])]
        metadata: Option<PathBuf>,

        /// Layout scheme: 'hiseq' or a layout TSV (default from config)
        #[arg(short = 'y', long)]
        layout: Option<String>,

        /// Gap between tiles in pixels (default from config)
        #[arg(short, long)]
        gap: Option<i64>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();
    let global = commands::GlobalArgs {
        config: cli.config,
        debug: cli.debug,
    };

    let result = match cli.command {
        Commands::Meta {
            name,
            data_dir,
            output,
            lane,
            layout,
            gap,
            manifest,
        } => commands::meta::run(
            &global,
            MetaArgs {
                name,
                data_dir,
                output,
                lane,
                layout,
                gap,
                manifest,
            },
        ),

        Commands::Convert {
            data_dir,
            out_dir,
            mode,
            lane,
            layout,
            gap,
            unit_scale,
            threads,
            manifest,
            plain,
        } => commands::convert::run(
            &global,
            ConvertArgs {
                data_dir,
                out_dir,
                mode,
                lane,
                layout,
                gap,
                unit_scale,
                threads,
                manifest,
                plain,
            },
        ),

        Commands::Hexagon {
            input,
            output,
            false_easting,
            false_northing,
            scale,
            radius,
            angle,
        } => commands::hexagon::run(
            &global,
            HexagonArgs {
                input,
                output,
                false_easting,
                false_northing,
                scale,
                radius,
                angle,
            },
        ),

        Commands::Locate {
            lane,
            tile,
            x,
            y,
            width,
            height,
            metadata,
            layout,
            gap,
        } => commands::locate::run(
            &global,
            LocateArgs {
                lane,
                tile,
                x,
                y,
                width,
                height,
                metadata,
                layout,
                gap,
            },
        ),

        Commands::Config { command } => commands::config::run(&global, command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
