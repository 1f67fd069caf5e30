//! INI serialization logic for converting `ConfigFile` → INI string.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"# Tilecart configuration
# Missing keys fall back to their defaults.

[grid]
# Gap between adjacent tiles in pixels
gap = {gap}
# Layout scheme: 'hiseq' or a path to a TSV with columns lane, tile, row, col
scheme = {scheme}

[promotion]
# Pixels per output unit (HiSeq: 26.67 pixels per micron)
unit_scale = {unit_scale}
# false_origin: place tiles by layout row/column
# tile_relative: place tiles by the mosaic position in the tile number
mode = {mode}

[hexagon]
# Distance from hexagon center to edge midpoint
inner_radius = {inner_radius}
# Rotation in degrees
rotation = {rotation}
# Multiplier applied to centroid coordinates before offsetting
scale = {scale}

[pipeline]
# Worker threads (default: number of CPU cores)
threads = {threads}

[logging]
# Log file location
file = {log_file}
"#,
        gap = config.grid.gap,
        scheme = config.grid.scheme,
        unit_scale = config.promotion.unit_scale,
        mode = config.promotion.mode,
        inner_radius = config.hexagon.inner_radius,
        rotation = config.hexagon.rotation,
        scale = config.hexagon.scale,
        threads = config.pipeline.threads,
        log_file = path_to_string(&config.logging.file),
    )
}

fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
