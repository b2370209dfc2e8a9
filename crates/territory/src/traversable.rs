//! Traversable lines, tagged by provenance.
//!
//! Purpose
//! - Answer "may the player stand here?" and "where is the closest safe point?"
//!   over three explicitly tagged edge sets:
//!   - `Outer`: the arena ring, fixed at construction.
//!   - `Claimed`: every edge of every claimed region; grows, never shrinks.
//!   - `Playable`: the current playable ring; replaced wholesale per claim.
//!
//! Edges are tagged when inserted. Nothing is re-identified later by comparing
//! distances, so a claimed edge that happens to run along the outer ring keeps
//! both tags in their own sets.

use crate::geom::{closest_point_on_segment, ClosedPolygon, Point};

/// Which set a traversable edge came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Provenance {
    Outer,
    Claimed,
    Playable,
}

impl Provenance {
    /// Outer and claimed lines never disappear.
    #[inline]
    pub fn is_permanent(self) -> bool {
        !matches!(self, Provenance::Playable)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TaggedEdge {
    pub a: Point,
    pub b: Point,
    pub provenance: Provenance,
}

impl TaggedEdge {
    #[inline]
    fn closest(&self, p: Point) -> (Point, f64) {
        let (q, _) = closest_point_on_segment(p, self.a, self.b);
        (q, (p - q).norm())
    }
}

/// Result of a nearest-line query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NearestEdge {
    pub point: Point,
    pub distance: f64,
    pub provenance: Provenance,
}

#[derive(Clone, Debug)]
pub struct TraversableBorderIndex {
    outer: Vec<TaggedEdge>,
    claimed: Vec<TaggedEdge>,
    playable: Vec<TaggedEdge>,
}

fn tag(poly: &ClosedPolygon, provenance: Provenance) -> impl Iterator<Item = TaggedEdge> + '_ {
    poly.edges().map(move |(a, b)| TaggedEdge { a, b, provenance })
}

impl TraversableBorderIndex {
    /// Start of a stage: the playable ring equals the outer ring.
    pub fn new(outer: &ClosedPolygon) -> Self {
        Self {
            outer: tag(outer, Provenance::Outer).collect(),
            claimed: Vec::new(),
            playable: tag(outer, Provenance::Playable).collect(),
        }
    }

    pub fn absorb_claimed(&mut self, region: &ClosedPolygon) {
        self.claimed.extend(tag(region, Provenance::Claimed));
    }

    pub fn replace_playable(&mut self, playable: &ClosedPolygon) {
        self.playable = tag(playable, Provenance::Playable).collect();
    }

    pub fn edges(&self, provenance: Provenance) -> &[TaggedEdge] {
        match provenance {
            Provenance::Outer => &self.outer,
            Provenance::Claimed => &self.claimed,
            Provenance::Playable => &self.playable,
        }
    }

    /// Outer first, then claimed, then playable.
    fn all(&self) -> impl Iterator<Item = &TaggedEdge> {
        self.outer
            .iter()
            .chain(self.claimed.iter())
            .chain(self.playable.iter())
    }

    pub fn is_traversable(&self, point: Point, tolerance: f64) -> bool {
        self.all().any(|e| e.closest(point).1 <= tolerance)
    }

    /// Within `tolerance` of an outer or claimed edge.
    pub fn is_on_permanent_line(&self, point: Point, tolerance: f64) -> bool {
        self.all()
            .filter(|e| e.provenance.is_permanent())
            .any(|e| e.closest(point).1 <= tolerance)
    }

    /// Globally closest edge. Scan order plus a strict `<` means permanent
    /// lines win exact ties against the playable ring.
    pub fn nearest(&self, point: Point) -> Option<NearestEdge> {
        let mut best: Option<NearestEdge> = None;
        for e in self.all() {
            let (q, d) = e.closest(point);
            if best.map_or(true, |b| d < b.distance) {
                best = Some(NearestEdge {
                    point: q,
                    distance: d,
                    provenance: e.provenance,
                });
            }
        }
        best
    }

    /// Closest point on any traversable line. The outer ring is always present,
    /// so a result always exists; non-finite input yields non-finite output.
    pub fn nearest_traversable_point(&self, point: Point) -> Point {
        self.nearest(point).map_or(point, |n| n.point)
    }

    /// Provenance of the nearest line, if it lies within `tolerance`.
    pub fn provenance_at(&self, point: Point, tolerance: f64) -> Option<Provenance> {
        self.nearest(point)
            .filter(|n| n.distance <= tolerance)
            .map(|n| n.provenance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::vector;

    fn arena() -> ClosedPolygon {
        ClosedPolygon::rectangle(vector![0.0, 0.0], vector![100.0, 100.0]).unwrap()
    }

    #[test]
    fn fresh_index_tags_outer_and_playable() {
        let idx = TraversableBorderIndex::new(&arena());
        assert_eq!(idx.edges(Provenance::Outer).len(), 4);
        assert_eq!(idx.edges(Provenance::Playable).len(), 4);
        assert!(idx.edges(Provenance::Claimed).is_empty());
        assert!(idx
            .edges(Provenance::Outer)
            .iter()
            .all(|e| e.provenance == Provenance::Outer));
    }

    #[test]
    fn exact_tie_prefers_outer_over_playable() {
        let idx = TraversableBorderIndex::new(&arena());
        let n = idx.nearest(vector![50.0, 3.0]).unwrap();
        assert_eq!(n.provenance, Provenance::Outer);
        assert_relative_eq!(n.point, vector![50.0, 0.0]);
        assert_relative_eq!(n.distance, 3.0);
    }

    #[test]
    fn claimed_edges_become_permanent() {
        let mut idx = TraversableBorderIndex::new(&arena());
        let claimed = ClosedPolygon::rectangle(vector![50.0, 0.0], vector![100.0, 100.0]).unwrap();
        let left = ClosedPolygon::rectangle(vector![0.0, 0.0], vector![50.0, 100.0]).unwrap();
        idx.absorb_claimed(&claimed);
        idx.replace_playable(&left);

        let on_cut = vector![50.0, 40.0];
        assert!(idx.is_on_permanent_line(on_cut, 1e-9));
        assert!(idx.is_traversable(on_cut, 1e-9));
        assert_eq!(idx.provenance_at(on_cut, 1e-9), Some(Provenance::Claimed));

        // interior of the remaining area is not traversable
        assert!(!idx.is_traversable(vector![25.0, 50.0], 1.0));
        assert_eq!(idx.provenance_at(vector![25.0, 50.0], 1.0), None);
    }

    #[test]
    fn playable_lines_are_not_permanent() {
        let mut idx = TraversableBorderIndex::new(&arena());
        // a playable ring with an interior edge not yet claimed
        let tri = ClosedPolygon::new([
            vector![0.0, 0.0],
            vector![100.0, 0.0],
            vector![0.0, 100.0],
        ])
        .unwrap();
        idx.replace_playable(&tri);
        let on_diag = vector![50.0, 50.0];
        assert!(idx.is_traversable(on_diag, 1e-9));
        assert!(!idx.is_on_permanent_line(on_diag, 1e-9));
        assert_eq!(idx.provenance_at(on_diag, 1e-9), Some(Provenance::Playable));
        assert_relative_eq!(idx.nearest_traversable_point(vector![40.0, 40.0]), on_diag);
        assert!(!Provenance::Playable.is_permanent());
        assert!(Provenance::Outer.is_permanent() && Provenance::Claimed.is_permanent());
    }

    #[test]
    fn non_finite_query_stays_non_finite() {
        let idx = TraversableBorderIndex::new(&arena());
        let q = idx.nearest_traversable_point(vector![f64::NAN, 10.0]);
        assert!(!(q.x.is_finite() && q.y.is_finite()));
        assert!(!idx.is_traversable(vector![f64::NAN, 10.0], 1.0));
    }
}
