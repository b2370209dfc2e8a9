//! Basic 2D types and tolerances used by the partition engine.
//!
//! - `Point`: a nalgebra column vector, always copied by value.
//! - `ClosedPolygon`: owned, explicitly closed vertex ring.
//! - `GeomCfg`: centralizes epsilons for deduplication, degeneracy and area checks.

use nalgebra::Vector2;

use super::util::{closest_point_on_segment, point_in_polygon, polygon_area, signed_area};
use crate::error::{TerritoryError, TerritoryResult};

/// Playfield coordinate (screen convention: y grows downward).
pub type Point = Vector2<f64>;

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    /// Consecutive vertices closer than this are merged.
    pub eps_dup: f64,
    /// Regions with area at or below this are degenerate.
    pub eps_area: f64,
    /// Relative slack for `area(A) + area(B) == area(boundary)`.
    pub area_rel_tol: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_dup: 1e-9,
            eps_area: 1e-9,
            area_rel_tol: 1e-3,
        }
    }
}

/// Closed, owned vertex ring.
///
/// Invariants:
/// - `first == last` (the closure point is stored explicitly).
/// - At least 3 distinct vertices (so at least 4 stored points).
/// - No consecutive duplicates beyond the closure point.
/// - All coordinates finite.
#[derive(Clone, Debug, PartialEq)]
pub struct ClosedPolygon {
    pts: Vec<Point>,
}

impl ClosedPolygon {
    /// Checked construction with the default duplicate tolerance.
    pub fn new<I>(points: I) -> TerritoryResult<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        Self::from_ring(points, GeomCfg::default().eps_dup)
    }

    /// Build from an open or closed ring, merging consecutive vertices closer than `eps`.
    pub fn from_ring<I>(points: I, eps: f64) -> TerritoryResult<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut pts: Vec<Point> = Vec::new();
        for p in points {
            if !(p.x.is_finite() && p.y.is_finite()) {
                return Err(TerritoryError::DegeneratePolygon { vertices: 0 });
            }
            match pts.last() {
                Some(last) if (p - *last).norm() <= eps => {}
                _ => pts.push(p),
            }
        }
        // Re-close exactly: drop a near-duplicate of the start, then repeat the start.
        while pts.len() > 1 && (pts[pts.len() - 1] - pts[0]).norm() <= eps {
            pts.pop();
        }
        if pts.len() < 3 {
            return Err(TerritoryError::DegeneratePolygon {
                vertices: pts.len(),
            });
        }
        pts.push(pts[0]);
        Ok(Self { pts })
    }

    /// Axis-aligned rectangle, clockwise in screen coordinates starting at `min`.
    pub fn rectangle(min: Point, max: Point) -> TerritoryResult<Self> {
        if !(max.x > min.x && max.y > min.y) {
            return Err(TerritoryError::DegeneratePolygon { vertices: 0 });
        }
        Self::new([
            Point::new(min.x, min.y),
            Point::new(max.x, min.y),
            Point::new(max.x, max.y),
            Point::new(min.x, max.y),
        ])
    }

    /// All stored vertices, closure point included.
    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.pts
    }

    /// Number of edges, equal to the number of distinct vertices.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.pts.len() - 1
    }

    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.pts.windows(2).map(|w| (w[0], w[1]))
    }

    #[inline]
    pub fn area(&self) -> f64 {
        polygon_area(&self.pts)
    }

    /// Positive when clockwise on screen.
    #[inline]
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.pts)
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        point_in_polygon(p, &self.pts)
    }

    pub fn distance_to_boundary(&self, p: Point) -> f64 {
        self.edges()
            .map(|(a, b)| {
                let (q, _) = closest_point_on_segment(p, a, b);
                (p - q).norm()
            })
            .fold(f64::INFINITY, f64::min)
    }

    pub fn perimeter(&self) -> f64 {
        self.edges().map(|(a, b)| (b - a).norm()).sum()
    }

    /// Point reached after walking `s` along the boundary from `pts[0]` in
    /// storage order. `s` wraps around the perimeter (negative walks backwards).
    pub fn point_at_arc_length(&self, s: f64) -> Point {
        let total = self.perimeter();
        if !(total > 0.0) || !s.is_finite() {
            return self.pts[0];
        }
        let mut left = s.rem_euclid(total);
        for (a, b) in self.edges() {
            let len = (b - a).norm();
            if left <= len {
                return if len > 0.0 { a + (b - a) * (left / len) } else { a };
            }
            left -= len;
        }
        self.pts[0]
    }

    /// Axis-aligned bounding box as `(min, max)`.
    pub fn bounds(&self) -> (Point, Point) {
        let mut lo = self.pts[0];
        let mut hi = self.pts[0];
        for p in &self.pts {
            lo = Point::new(lo.x.min(p.x), lo.y.min(p.y));
            hi = Point::new(hi.x.max(p.x), hi.y.max(p.y));
        }
        (lo, hi)
    }
}
