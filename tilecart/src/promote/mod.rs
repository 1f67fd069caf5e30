//! Local to global coordinate promotion.
//!
//! A [`CoordinatePromoter`] is built once per tile and applied to that
//! tile's whole batch of points. It carries no state between points and
//! never sees another tile's data.
//!
//! Two formula families are supported:
//!
//! - [`PreOffset`]: scale then subtract a false origin. Used for placed
//!   tiles (false-origin mode) and for pre-offset hexagon centroids
//! - [`TileRelative`]: offsets decoded from the tile number and the tile's
//!   own extent (tile-relative mode)

mod point;
mod transform;

use std::fmt;
use std::str::FromStr;

pub use point::{Centroid, GlobalPoint, PointRecord};
pub use transform::{PreOffset, TileRelative, DEFAULT_UNIT_SCALE};

use crate::error::MosaicError;
use crate::layout::TileNumbering;
use crate::mosaic::{GridGeometry, Tile};

/// Which formula family a run promotes with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromotionMode {
    /// Layout-table false origins, scaled into output units
    #[default]
    FalseOrigin,
    /// Mosaic position decoded from tile numbers
    TileRelative,
}

impl PromotionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromotionMode::FalseOrigin => "false_origin",
            PromotionMode::TileRelative => "tile_relative",
        }
    }
}

impl fmt::Display for PromotionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromotionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "false_origin" => Ok(PromotionMode::FalseOrigin),
            "tile_relative" => Ok(PromotionMode::TileRelative),
            other => Err(format!(
                "unknown promotion mode '{}', expected false_origin or tile_relative",
                other
            )),
        }
    }
}

/// Per-tile promotion transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordinatePromoter {
    PreOffset(PreOffset),
    TileRelative(TileRelative),
}

impl CoordinatePromoter {
    /// Build the promoter for a placed tile.
    pub fn for_tile(
        mode: PromotionMode,
        tile: &Tile,
        geometry: &GridGeometry,
        numbering: &TileNumbering,
        unit_scale: f64,
    ) -> Result<Self, MosaicError> {
        match mode {
            PromotionMode::FalseOrigin => Ok(CoordinatePromoter::PreOffset(
                PreOffset::from_false_origin(tile.origin(), unit_scale)?,
            )),
            PromotionMode::TileRelative => Ok(CoordinatePromoter::TileRelative(
                TileRelative::new(tile.key(), tile.extent(), geometry, numbering, unit_scale)?,
            )),
        }
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        match self {
            CoordinatePromoter::PreOffset(t) => t.apply(x, y),
            CoordinatePromoter::TileRelative(t) => t.apply(x, y),
        }
    }

    /// Inverse of [`CoordinatePromoter::apply`].
    pub fn revert(&self, x: f64, y: f64) -> (f64, f64) {
        match self {
            CoordinatePromoter::PreOffset(t) => t.revert(x, y),
            CoordinatePromoter::TileRelative(t) => t.revert(x, y),
        }
    }

    /// Promote a tile's point batch. Row count and payloads are preserved.
    pub fn promote<P>(&self, points: Vec<PointRecord<P>>) -> Vec<GlobalPoint<P>> {
        points
            .into_iter()
            .map(|p| {
                let (x, y) = self.apply(p.x_local as f64, p.y_local as f64);
                GlobalPoint {
                    x,
                    y,
                    payload: p.payload,
                }
            })
            .collect()
    }

    /// Promote continuous-unit centroids.
    pub fn promote_centroids<P>(&self, centroids: Vec<Centroid<P>>) -> Vec<GlobalPoint<P>> {
        centroids
            .into_iter()
            .map(|c| {
                let (x, y) = self.apply(c.x_local, c.y_local);
                GlobalPoint {
                    x,
                    y,
                    payload: c.payload,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutEntry, TileKey};
    use crate::mosaic::{TileExtent, UnplacedTile};

    fn placed_tile(key: TileKey, row: u32, col: u32, geometry: &GridGeometry) -> Tile {
        UnplacedTile::new(
            key,
            "/data",
            LayoutEntry { row, col },
            TileExtent::new(0, 0, 100, 100).unwrap(),
        )
        .place(geometry)
        .unwrap()
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!(
            "false_origin".parse::<PromotionMode>().unwrap(),
            PromotionMode::FalseOrigin
        );
        assert_eq!(
            "Tile-Relative".parse::<PromotionMode>().unwrap(),
            PromotionMode::TileRelative
        );
        assert!("both".parse::<PromotionMode>().is_err());
        assert_eq!(PromotionMode::default().to_string(), "false_origin");
    }

    #[test]
    fn test_promote_preserves_rows_and_payload() {
        let geometry = GridGeometry::new(100, 100, 0, 1).unwrap();
        let key = TileKey::new(2, 1101);
        let tile = placed_tile(key, 1, 2, &geometry);
        let promoter = CoordinatePromoter::for_tile(
            PromotionMode::FalseOrigin,
            &tile,
            &geometry,
            &TileNumbering::hiseq(),
            1.0,
        )
        .unwrap();

        let points = vec![
            PointRecord::new(key, 1, 2, "a"),
            PointRecord::new(key, 3, 4, "b"),
        ];
        let global = promoter.promote(points);
        assert_eq!(global.len(), 2);
        assert_eq!(global[0].payload, "a");
        assert_eq!((global[0].x, global[0].y), (101.0, 2.0));
        assert_eq!((global[1].x, global[1].y), (103.0, 4.0));
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let geometry = GridGeometry::new(98_000, 20_000, 12, 32).unwrap();
        let key = TileKey::new(1, 2113);
        let tile = placed_tile(key, 4, 3, &geometry);

        for mode in [PromotionMode::FalseOrigin, PromotionMode::TileRelative] {
            let promoter = CoordinatePromoter::for_tile(
                mode,
                &tile,
                &geometry,
                &TileNumbering::hiseq(),
                DEFAULT_UNIT_SCALE,
            )
            .unwrap();
            let (gx, gy) = promoter.apply(12_345.0, 678.0);
            let (x, y) = promoter.revert(gx, gy);
            assert!((x - 12_345.0).abs() < 1e-6, "{} x drifted", mode);
            assert!((y - 678.0).abs() < 1e-6, "{} y drifted", mode);
        }
    }

    #[test]
    fn test_negative_unit_scale_rejected() {
        let geometry = GridGeometry::new(1, 1, 0, 1).unwrap();
        let tile = placed_tile(TileKey::new(1, 1101), 1, 1, &geometry);
        let err = CoordinatePromoter::for_tile(
            PromotionMode::FalseOrigin,
            &tile,
            &geometry,
            &TileNumbering::hiseq(),
            -26.67,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MosaicError::InvalidConfiguration {
                field: "unit_scale",
                ..
            }
        ));
    }

    #[test]
    fn test_centroids_use_pre_offset() {
        let promoter = CoordinatePromoter::PreOffset(PreOffset::new(-10.0, -20.0, 0.5).unwrap());
        let global = promoter.promote_centroids(vec![Centroid {
            x_local: 4.0,
            y_local: 8.0,
            payload: (),
        }]);
        assert_eq!((global[0].x, global[0].y), (12.0, 24.0));
    }
}
