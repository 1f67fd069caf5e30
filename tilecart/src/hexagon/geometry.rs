//! Regular hexagon construction.

use std::f64::consts::PI;

/// Edge length of a regular hexagon with the given inner radius
/// (center to edge midpoint): `inner_radius * 2 / sqrt(3)`.
pub fn edge_length_from_inner_radius(inner_radius: f64) -> f64 {
    inner_radius * 2.0 / 3f64.sqrt()
}

/// Six-vertex polygon around a center point.
#[derive(Debug, Clone, PartialEq)]
pub struct Hexagon {
    vertices: [(f64, f64); 6],
}

impl Hexagon {
    pub fn vertices(&self) -> &[(f64, f64); 6] {
        &self.vertices
    }

    /// Mean of the vertices.
    pub fn centroid(&self) -> (f64, f64) {
        let (sx, sy) = self
            .vertices
            .iter()
            .fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x, sy + y));
        (sx / 6.0, sy / 6.0)
    }

    /// WKT `POLYGON` with the first vertex repeated to close the ring.
    pub fn to_wkt(&self) -> String {
        let ring = self
            .vertices
            .iter()
            .chain(std::iter::once(&self.vertices[0]))
            .map(|(x, y)| format!("{} {}", x, y))
            .collect::<Vec<_>>()
            .join(", ");
        format!("POLYGON (({}))", ring)
    }
}

/// Build a hexagon centered on `(center_x, center_y)`.
///
/// Vertices sit at 0°, 60°, ..., 300° plus `rotation_degrees`, each at
/// `edge_length` from the center. With no rotation the hexagon has a vertex
/// on the positive x axis and flat top and bottom edges.
pub fn make_hexagon(center_x: f64, center_y: f64, edge_length: f64, rotation_degrees: f64) -> Hexagon {
    let mut vertices = [(0.0, 0.0); 6];
    for (i, vertex) in vertices.iter_mut().enumerate() {
        let theta = (i as f64 * 60.0 + rotation_degrees) * PI / 180.0;
        *vertex = (
            center_x + edge_length * theta.cos(),
            center_y + edge_length * theta.sin(),
        );
    }
    Hexagon { vertices }
}
