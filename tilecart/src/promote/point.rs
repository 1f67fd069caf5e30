//! Point records on either side of promotion.

use crate::layout::TileKey;

/// A local pixel coordinate read from one tile.
///
/// `payload` carries passthrough columns that promotion never touches.
#[derive(Debug, Clone, PartialEq)]
pub struct PointRecord<P = ()> {
    pub key: TileKey,
    pub x_local: i64,
    pub y_local: i64,
    pub payload: P,
}

impl<P> PointRecord<P> {
    pub fn new(key: TileKey, x_local: i64, y_local: i64, payload: P) -> Self {
        Self {
            key,
            x_local,
            y_local,
            payload,
        }
    }

    pub fn local(&self) -> (i64, i64) {
        (self.x_local, self.y_local)
    }
}

/// A tile-local centroid in a continuous unit (hexagon path).
#[derive(Debug, Clone, PartialEq)]
pub struct Centroid<P = ()> {
    pub x_local: f64,
    pub y_local: f64,
    pub payload: P,
}

/// A coordinate in the shared mosaic system.
///
/// The only coordinate form that leaves the promoter.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalPoint<P = ()> {
    pub x: f64,
    pub y: f64,
    pub payload: P,
}
