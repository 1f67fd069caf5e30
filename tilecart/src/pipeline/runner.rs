//! Mosaic pipeline execution.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::MosaicError;
use crate::layout::{LayoutTable, TileKey};
use crate::log::Logger;
use crate::mosaic::{GridGeometry, Mosaic, Tile, TileExtent, TileFailure, UnplacedTile};
use crate::promote::CoordinatePromoter;
use crate::{log_debug, log_info, log_warn};

use super::{MosaicConfig, TileSink, TileSource};

/// Outcome of a full run.
#[derive(Debug, Clone)]
pub struct MosaicReport {
    pub geometry: GridGeometry,
    /// Every tile that was placed on the grid, sorted by key
    pub tiles: Vec<Tile>,
    /// Points written per successfully promoted tile
    pub points_written: BTreeMap<TileKey, usize>,
    /// Tiles skipped in either phase, with the reason
    pub failures: Vec<TileFailure>,
}

impl MosaicReport {
    pub fn total_points(&self) -> usize {
        self.points_written.values().sum()
    }

    /// True when no tile failed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs extent estimation, grid sizing and promotion on a worker pool.
pub struct MosaicPipeline {
    layout: Arc<LayoutTable>,
    config: MosaicConfig,
    logger: Arc<dyn Logger>,
    pool: ThreadPool,
    known_extents: BTreeMap<TileKey, TileExtent>,
}

impl MosaicPipeline {
    /// Create a pipeline with a dedicated pool of `config.threads()` workers.
    pub fn new(
        layout: Arc<LayoutTable>,
        config: MosaicConfig,
        logger: Arc<dyn Logger>,
    ) -> Result<Self, MosaicError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.threads())
            .thread_name(|i| format!("tilecart-worker-{}", i))
            .build()
            .map_err(|e| MosaicError::invalid_config("threads", e.to_string()))?;
        Ok(Self {
            layout,
            config,
            logger,
            pool,
            known_extents: BTreeMap::new(),
        })
    }

    /// Use precomputed extents (e.g. from a manifest) instead of scanning
    /// those tiles.
    pub fn with_known_extents(mut self, extents: BTreeMap<TileKey, TileExtent>) -> Self {
        self.known_extents = extents;
        self
    }

    pub fn config(&self) -> &MosaicConfig {
        &self.config
    }

    fn unplaced<S: TileSource>(&self, source: &S) -> Result<UnplacedTile, MosaicError> {
        let key = source.key();
        let placement = self.layout.lookup(key)?;
        let extent = match self.known_extents.get(&key) {
            Some(extent) => *extent,
            None => source.read_extent()?,
        };
        log_debug!(
            self.logger,
            "Tile {} at row {}, col {} spans x {}..{}, y {}..{}",
            key,
            placement.row,
            placement.col,
            extent.xmin,
            extent.xmax,
            extent.ymin,
            extent.ymax
        );
        Ok(UnplacedTile::new(key, source.location(), placement, extent))
    }

    /// Phase 1 and the grid reduction: returns a mosaic with every
    /// placeable tile placed.
    ///
    /// Fails only if the grid cannot be sized, e.g. when no tile produced
    /// an extent.
    pub fn survey<S: TileSource>(&self, sources: &[S]) -> Result<Mosaic, MosaicError> {
        let mut seen = BTreeSet::new();
        if let Some(dup) = sources.iter().map(|s| s.key()).find(|k| !seen.insert(*k)) {
            return Err(MosaicError::invalid_config(
                "sources",
                format!("tile {} is listed more than once", dup),
            ));
        }

        let start = Instant::now();
        log_info!(
            self.logger,
            "Estimating extents of {} tiles on {} workers",
            sources.len(),
            self.config.threads()
        );
        let results: Vec<(TileKey, Result<UnplacedTile, MosaicError>)> = self.pool.install(|| {
            sources
                .par_iter()
                .map(|source| (source.key(), self.unplaced(source)))
                .collect()
        });

        let mut mosaic = Mosaic::new();
        for (key, result) in results {
            match result {
                Ok(tile) => mosaic.add_tile(tile)?,
                Err(error) => {
                    log_warn!(self.logger, "Skipping tile {}: {}", key, error);
                    mosaic.record_failure(key, error);
                }
            }
        }

        let geometry = mosaic.finalize_grid(self.config.grid_gap(), self.layout.max_row())?;
        log_info!(
            self.logger,
            "Grid {} x {} (gap {}, {} rows) after {:?}",
            geometry.grid_width(),
            geometry.grid_height(),
            geometry.grid_gap(),
            geometry.max_row(),
            start.elapsed()
        );

        let failed_before = mosaic.failures().len();
        let placed = mosaic.place()?.len();
        for failure in &mosaic.failures()[failed_before..] {
            log_warn!(self.logger, "Skipping tile {}: {}", failure.key, failure.error);
        }
        log_info!(self.logger, "Placed {} tiles", placed);
        Ok(mosaic)
    }

    fn promote_tile<S, K>(
        &self,
        source: &S,
        tile: &Tile,
        geometry: &GridGeometry,
        sink: &K,
    ) -> Result<usize, MosaicError>
    where
        S: TileSource,
        K: TileSink<S::Payload> + ?Sized,
    {
        let promoter = CoordinatePromoter::for_tile(
            self.config.mode(),
            tile,
            geometry,
            self.config.numbering(),
            self.config.unit_scale(),
        )?;
        let points = source.read_points()?;
        let count = points.len();
        let global = promoter.promote(points);
        sink.write_tile(tile, &global)?;
        log_debug!(self.logger, "Tile {}: wrote {} points", tile.key(), count);
        Ok(count)
    }

    /// Run both phases and write every placed tile to `sink`.
    pub fn run<S, K>(&self, sources: &[S], sink: &K) -> Result<MosaicReport, MosaicError>
    where
        S: TileSource,
        K: TileSink<S::Payload> + ?Sized,
    {
        let mut mosaic = self.survey(sources)?;
        let geometry = *mosaic.geometry().ok_or_else(|| {
            MosaicError::IncompleteGridGeometry("survey returned an unsized mosaic".to_string())
        })?;

        let start = Instant::now();
        let by_key: HashMap<TileKey, &S> = sources.iter().map(|s| (s.key(), s)).collect();
        let outcomes: Vec<(TileKey, Result<usize, MosaicError>)> = self.pool.install(|| {
            mosaic
                .tiles()
                .par_iter()
                .map(|tile| {
                    let result = match by_key.get(&tile.key()) {
                        Some(source) => self.promote_tile(*source, tile, &geometry, sink),
                        None => Err(MosaicError::Source {
                            key: tile.key(),
                            message: "no source for placed tile".to_string(),
                        }),
                    };
                    (tile.key(), result)
                })
                .collect()
        });

        let mut points_written = BTreeMap::new();
        for (key, outcome) in outcomes {
            match outcome {
                Ok(count) => {
                    points_written.insert(key, count);
                }
                Err(error) => {
                    log_warn!(self.logger, "Tile {} failed: {}", key, error);
                    mosaic.record_failure(key, error);
                }
            }
        }

        let (tiles, failures) = mosaic.into_parts();
        let report = MosaicReport {
            geometry,
            tiles,
            points_written,
            failures,
        };
        log_info!(
            self.logger,
            "Promoted {} points in {} tiles ({} failed) in {:?}",
            report.total_points(),
            report.points_written.len(),
            report.failures.len(),
            start.elapsed()
        );
        Ok(report)
    }
}
