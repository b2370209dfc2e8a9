//! Nearest-point projection onto a closed boundary.

use crate::geom::{closest_point_on_segment, ClosedPolygon, Point};

/// Where a point lands on a boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Edge `i` runs from vertex `i` to vertex `i + 1`.
    pub segment_index: usize,
    pub point: Point,
    /// Clamped parameter along the edge (0 at vertex `i`, 1 at vertex `i + 1`).
    pub t: f64,
    pub distance: f64,
}

/// Scan every edge and keep the closest. Ties go to the lowest segment index.
pub fn locate(point: Point, boundary: &ClosedPolygon) -> Projection {
    let mut best = Projection {
        segment_index: 0,
        point: boundary.vertices()[0],
        t: 0.0,
        distance: f64::INFINITY,
    };
    for (i, (a, b)) in boundary.edges().enumerate() {
        let (q, t) = closest_point_on_segment(point, a, b);
        let d = (point - q).norm();
        if d < best.distance {
            best = Projection {
                segment_index: i,
                point: q,
                t,
                distance: d,
            };
        }
    }
    best
}
