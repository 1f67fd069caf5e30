//! Parallel promotion of centroids to hexagons.

use std::sync::Arc;

use rayon::prelude::*;

use crate::error::MosaicError;
use crate::log::Logger;
use crate::promote::{Centroid, GlobalPoint, PreOffset};
use crate::{log_debug, log_info};

use super::{edge_length_from_inner_radius, make_hexagon, Hexagon};

/// Default inner radius and centroid scale for factor-analysis output.
pub const DEFAULT_INNER_RADIUS: f64 = 80.0;
pub const DEFAULT_CENTROID_SCALE: f64 = 80.0;

/// Validated hexagon parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexagonConfig {
    inner_radius: f64,
    rotation_degrees: f64,
    offset: PreOffset,
}

impl HexagonConfig {
    /// Build a config; rejects a non-positive radius or scale.
    pub fn new(
        inner_radius: f64,
        rotation_degrees: f64,
        scale: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Result<Self, MosaicError> {
        if !(inner_radius.is_finite() && inner_radius > 0.0) {
            return Err(MosaicError::invalid_config(
                "inner_radius",
                format!("must be a positive number, got {}", inner_radius),
            ));
        }
        if !rotation_degrees.is_finite() {
            return Err(MosaicError::invalid_config(
                "rotation",
                format!("must be a finite angle, got {}", rotation_degrees),
            ));
        }
        Ok(Self {
            inner_radius,
            rotation_degrees,
            offset: PreOffset::new(false_easting, false_northing, scale)?,
        })
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn edge_length(&self) -> f64 {
        edge_length_from_inner_radius(self.inner_radius)
    }

    pub fn rotation_degrees(&self) -> f64 {
        self.rotation_degrees
    }

    pub fn offset(&self) -> &PreOffset {
        &self.offset
    }
}

impl Default for HexagonConfig {
    fn default() -> Self {
        Self {
            inner_radius: DEFAULT_INNER_RADIUS,
            rotation_degrees: 0.0,
            offset: PreOffset::at_origin(DEFAULT_CENTROID_SCALE),
        }
    }
}

/// One output row: the promoted center, its hexagon and passthrough data.
#[derive(Debug, Clone, PartialEq)]
pub struct HexagonRecord<P = ()> {
    pub center: GlobalPoint<()>,
    pub hexagon: Hexagon,
    pub payload: P,
}

/// Turns pre-offset centroids into hexagon polygons.
///
/// Each row is independent, so rows are processed on the rayon pool of
/// the caller.
pub struct HexagonBinner {
    config: HexagonConfig,
    logger: Arc<dyn Logger>,
}

impl HexagonBinner {
    pub fn new(config: HexagonConfig, logger: Arc<dyn Logger>) -> Self {
        Self { config, logger }
    }

    pub fn config(&self) -> &HexagonConfig {
        &self.config
    }

    /// Promote one centroid and build its hexagon.
    pub fn bin_one<P>(&self, centroid: Centroid<P>) -> HexagonRecord<P> {
        let (x, y) = self.config.offset.apply(centroid.x_local, centroid.y_local);
        HexagonRecord {
            center: GlobalPoint { x, y, payload: () },
            hexagon: make_hexagon(
                x,
                y,
                self.config.edge_length(),
                self.config.rotation_degrees,
            ),
            payload: centroid.payload,
        }
    }

    /// Promote every centroid, preserving input order.
    pub fn bin<P: Send>(&self, centroids: Vec<Centroid<P>>) -> Vec<HexagonRecord<P>> {
        let count = centroids.len();
        log_debug!(
            self.logger,
            "Binning {} centroids (edge {:.3}, rotation {})",
            count,
            self.config.edge_length(),
            self.config.rotation_degrees
        );
        let records: Vec<HexagonRecord<P>> = centroids
            .into_par_iter()
            .map(|c| self.bin_one(c))
            .collect();
        log_info!(self.logger, "Built {} hexagons", records.len());
        records
    }
}
