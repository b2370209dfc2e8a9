use super::*;
use crate::geom::{ClosedPolygon, GeomCfg, Point};
use crate::sample::{draw_chord, ChordCfg, ReplayToken};
use crate::traversable::TraversableBorderIndex;
use crate::TerritoryError;
use approx::assert_relative_eq;
use nalgebra::vector;
use proptest::prelude::*;

fn square(side: f64) -> ClosedPolygon {
    ClosedPolygon::rectangle(vector![0.0, 0.0], vector![side, side]).unwrap()
}

/// Undirected edge key with coordinates rounded onto a fine grid.
fn edge_key(a: Point, b: Point) -> ((i64, i64), (i64, i64)) {
    let q = |p: Point| ((p.x * 1e6).round() as i64, (p.y * 1e6).round() as i64);
    let (qa, qb) = (q(a), q(b));
    if qa <= qb {
        (qa, qb)
    } else {
        (qb, qa)
    }
}

/// Split every boundary edge at the trail endpoints so edge sets can be compared.
fn split_boundary_edges(boundary: &ClosedPolygon, cuts: &[Point]) -> Vec<((i64, i64), (i64, i64))> {
    let mut out = Vec::new();
    for (a, b) in boundary.edges() {
        let mut on_edge: Vec<(f64, Point)> = cuts
            .iter()
            .filter_map(|&c| {
                let (q, t) = crate::geom::closest_point_on_segment(c, a, b);
                ((q - c).norm() < 1e-9 && t > 1e-12 && t < 1.0 - 1e-12).then_some((t, c))
            })
            .collect();
        on_edge.sort_by(|x, y| x.0.total_cmp(&y.0));
        let mut prev = a;
        for (_, c) in on_edge {
            out.push(edge_key(prev, c));
            prev = c;
        }
        out.push(edge_key(prev, b));
    }
    out.sort();
    out
}

#[test]
fn locate_picks_nearest_edge_and_breaks_ties_low() {
    let s = square(100.0);
    let p = locate(vector![50.0, 3.0], &s);
    assert_eq!(p.segment_index, 0);
    assert_relative_eq!(p.point, vector![50.0, 0.0]);
    assert_relative_eq!(p.distance, 3.0);
    assert_relative_eq!(p.t, 0.5);

    // the corner (100,0) ends edge 0 and starts edge 1: lowest index wins
    let corner = locate(vector![100.0, 0.0], &s);
    assert_eq!(corner.segment_index, 0);
    assert_relative_eq!(corner.t, 1.0);

    // equidistant from the right and bottom edges
    let diag = locate(vector![95.0, 95.0], &s);
    assert_eq!(diag.segment_index, 1);
}

#[test]
fn straight_bisection_builds_both_halves() {
    let s = square(100.0);
    let path = [vector![50.0, 0.0], vector![50.0, 100.0]];
    let part = partition(&s, &path, GeomCfg::default()).unwrap();
    assert_relative_eq!(part.region_a.area(), 5000.0);
    assert_relative_eq!(part.region_b.area(), 5000.0);
    assert!(part.region_a.contains(vector![25.0, 50.0]));
    assert!(part.region_b.contains(vector![75.0, 50.0]));
    // both regions keep the boundary's winding
    assert!(part.region_a.signed_area() > 0.0);
    assert!(part.region_b.signed_area() > 0.0);
}

#[test]
fn endpoints_are_snapped_onto_the_boundary() {
    let s = square(100.0);
    let path = [vector![30.0, 2.0], vector![30.0, 50.0], vector![70.0, 97.5]];
    let part = partition(&s, &path, GeomCfg::default()).unwrap();
    assert_relative_eq!(part.trail[0], vector![30.0, 0.0]);
    assert_relative_eq!(part.trail[2], vector![70.0, 100.0]);
    assert_relative_eq!(part.trail[1], vector![30.0, 50.0]);
    assert_relative_eq!(
        part.region_a.area() + part.region_b.area(),
        s.area(),
        max_relative = 1e-12
    );
}

#[test]
fn edges_of_both_regions_cover_boundary_exactly_once() {
    let s = square(100.0);
    let path = [
        vector![20.0, 0.0],
        vector![40.0, 40.0],
        vector![60.0, 30.0],
        vector![100.0, 70.0],
    ];
    let part = partition(&s, &path, GeomCfg::default()).unwrap();

    let trail_keys: Vec<_> = part.trail.windows(2).map(|w| edge_key(w[0], w[1])).collect();
    let mut rest: Vec<_> = part
        .region_a
        .edges()
        .chain(part.region_b.edges())
        .map(|(a, b)| edge_key(a, b))
        .collect();
    // remove two copies of every trail edge
    for k in trail_keys.iter().chain(trail_keys.iter()) {
        let pos = rest.iter().position(|r| r == k).expect("trail edge present twice");
        rest.swap_remove(pos);
    }
    rest.sort();
    let expected = split_boundary_edges(&s, &[part.trail[0], *part.trail.last().unwrap()]);
    assert_eq!(rest, expected);
}

#[test]
fn same_edge_endpoints_give_full_ring_to_one_side() {
    let s = square(100.0);
    // a notch dipping into the square from the top edge, drawn left to right
    let path = [
        vector![30.0, 0.0],
        vector![30.0, 20.0],
        vector![60.0, 20.0],
        vector![60.0, 0.0],
    ];
    let part = partition(&s, &path, GeomCfg::default()).unwrap();
    assert_relative_eq!(part.region_b.area(), 600.0);
    assert_relative_eq!(part.region_a.area(), 9400.0);

    // same notch drawn right to left swaps the roles
    let rev: Vec<_> = path.iter().rev().copied().collect();
    let part = partition(&s, &rev, GeomCfg::default()).unwrap();
    assert_relative_eq!(part.region_a.area(), 600.0);
    assert_relative_eq!(part.region_b.area(), 9400.0);
}

#[test]
fn loop_back_to_start_point_claims_same_area_either_direction() {
    let s = square(100.0);
    let idx = TraversableBorderIndex::new(&s);
    let hazard = vector![50.0, 70.0];
    let loop_path = [
        vector![50.0, 0.0],
        vector![40.0, 10.0],
        vector![60.0, 10.0],
        vector![50.0, 0.0],
    ];
    let reversed: Vec<_> = loop_path.iter().rev().copied().collect();
    for path in [loop_path.to_vec(), reversed] {
        let part = partition(&s, &path, GeomCfg::default()).unwrap();
        assert_relative_eq!(
            part.region_a.area() + part.region_b.area(),
            s.area(),
            max_relative = 1e-12
        );
        let c = classify(part, hazard, &idx, 1.0, GeomCfg::default()).unwrap();
        assert_relative_eq!(c.claimed.area(), 100.0, max_relative = 1e-12);
        assert_relative_eq!(c.remaining.area(), 9900.0, max_relative = 1e-12);
    }
}

#[test]
fn path_along_boundary_is_degenerate() {
    let s = square(100.0);
    let path = [vector![0.0, 0.0], vector![50.0, 0.0]];
    let err = partition(&s, &path, GeomCfg::default()).unwrap_err();
    assert!(matches!(err, TerritoryError::DegeneratePartition { .. }));
}

#[test]
fn path_leaving_the_boundary_breaks_area_sum() {
    let s = square(100.0);
    // bulges outside the ring above the top edge
    let path = [
        vector![50.0, 0.0],
        vector![50.0, -50.0],
        vector![60.0, -50.0],
        vector![60.0, 0.0],
    ];
    let err = partition(&s, &path, GeomCfg::default()).unwrap_err();
    assert!(matches!(err, TerritoryError::DegeneratePartition { .. }));
}

#[test]
fn short_path_is_rejected_without_panicking() {
    let s = square(10.0);
    let err = partition(&s, &[vector![0.0, 5.0]], GeomCfg::default()).unwrap_err();
    assert!(matches!(err, TerritoryError::InvalidPath { .. }));
}

#[test]
fn classify_keeps_hazard_side() {
    let s = square(100.0);
    let idx = TraversableBorderIndex::new(&s);
    let path = [vector![50.0, 0.0], vector![50.0, 100.0]];
    let part = partition(&s, &path, GeomCfg::default()).unwrap();
    let c = classify(part, vector![25.0, 50.0], &idx, 1.0, GeomCfg::default()).unwrap();
    assert!(c.remaining.contains(vector![25.0, 50.0]));
    assert!(c.claimed.contains(vector![75.0, 50.0]));
    assert!(!c.decided_by_area);
}

#[test]
fn classify_rejects_hazard_on_trail() {
    let s = square(100.0);
    let idx = TraversableBorderIndex::new(&s);
    let path = [vector![50.0, 0.0], vector![50.0, 100.0]];
    let part = partition(&s, &path, GeomCfg::default()).unwrap();
    let err = classify(part, vector![50.0, 40.0], &idx, 1.0, GeomCfg::default()).unwrap_err();
    assert!(matches!(err, TerritoryError::AmbiguousPartition { .. }));
}

#[test]
fn classify_rejects_hazard_outside_both() {
    let s = square(100.0);
    let idx = TraversableBorderIndex::new(&s);
    let path = [vector![50.0, 0.0], vector![50.0, 100.0]];
    let part = partition(&s, &path, GeomCfg::default()).unwrap();
    let err = classify(part, vector![500.0, 40.0], &idx, 1.0, GeomCfg::default()).unwrap_err();
    assert_eq!(
        err,
        TerritoryError::AmbiguousPartition {
            in_a: false,
            in_b: false
        }
    );
}

#[test]
fn classify_on_outer_border_claims_smaller_side() {
    let s = square(100.0);
    let idx = TraversableBorderIndex::new(&s);
    let path = [vector![30.0, 0.0], vector![30.0, 100.0]];
    let part = partition(&s, &path, GeomCfg::default()).unwrap();
    // hazard skims the left outer edge
    let c = classify(part, vector![0.0, 50.0], &idx, 1.0, GeomCfg::default()).unwrap();
    assert!(c.decided_by_area);
    assert_relative_eq!(c.claimed.area(), 3000.0);
    assert_relative_eq!(c.remaining.area(), 7000.0);

    // an even split cannot be decided by area
    let part = partition(&s, &[vector![50.0, 0.0], vector![50.0, 100.0]], GeomCfg::default()).unwrap();
    let err = classify(part, vector![0.0, 50.0], &idx, 1.0, GeomCfg::default()).unwrap_err();
    assert!(matches!(err, TerritoryError::AmbiguousPartition { .. }));
}

proptest! {
    #[test]
    fn chords_conserve_area(seed in any::<u64>(), index in 0u64..10_000, w in 20.0f64..500.0, h in 20.0f64..500.0) {
        let ring = ClosedPolygon::rectangle(vector![0.0, 0.0], vector![w, h]).unwrap();
        let tok = ReplayToken { seed, index };
        let path = draw_chord(&ring, ChordCfg::default(), tok);
        prop_assume!(path.is_some());
        let path = path.unwrap();
        let part = partition(&ring, &path, GeomCfg::default()).unwrap();
        let sum = part.region_a.area() + part.region_b.area();
        prop_assert!((sum - ring.area()).abs() <= 1e-3 * ring.area());
    }
}
