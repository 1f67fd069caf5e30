//! Hexagon polygons for factor-analysis centroids.
//!
//! Centroid tables from downstream factor analysis are already offset
//! corrected. Each row is scaled and shifted with a [`PreOffset`] and
//! replaced by a regular hexagon around the promoted center.
//!
//! [`PreOffset`]: crate::promote::PreOffset

mod binner;
mod geometry;

pub use binner::{
    HexagonBinner, HexagonConfig, HexagonRecord, DEFAULT_CENTROID_SCALE, DEFAULT_INNER_RADIUS,
};
pub use geometry::{edge_length_from_inner_radius, make_hexagon, Hexagon};
