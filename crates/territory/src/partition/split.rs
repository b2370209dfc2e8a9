//! Path closure: split a boundary into two rings sharing the drawn trail.

use std::iter::once;

use super::project::{locate, Projection};
use crate::error::{TerritoryError, TerritoryResult};
use crate::geom::{signed_area, ClosedPolygon, GeomCfg, Point};

/// Two candidate regions tiling the boundary they were cut from.
#[derive(Clone, Debug)]
pub struct Partition {
    /// Trail forward, then the boundary arc from the end edge back to the start edge.
    pub region_a: ClosedPolygon,
    /// Trail reversed, then the boundary arc from the start edge to the end edge.
    pub region_b: ClosedPolygon,
    /// The drawn path with both endpoints snapped onto the boundary.
    pub trail: Vec<Point>,
    pub start: Projection,
    pub end: Projection,
}

/// Number of boundary vertices each region picks up as `(arc_a, arc_b)`.
///
/// Region A walks vertices `end+1 ..= start`, region B `start+1 ..= end`
/// (indices modulo `n`). When both endpoints sit on the same edge one region
/// takes the full ring and the other none; `full_ring_to_a` picks the side.
fn arc_lengths(start: &Projection, end: &Projection, n: usize, full_ring_to_a: bool) -> (usize, usize) {
    let (s, e) = (start.segment_index, end.segment_index);
    if s == e {
        if full_ring_to_a {
            (n, 0)
        } else {
            (0, n)
        }
    } else {
        ((s + n - e) % n, (e + n - s) % n)
    }
}

fn close_region(ring: Vec<Point>, cfg: &GeomCfg, label: &str) -> TerritoryResult<ClosedPolygon> {
    let region = ClosedPolygon::from_ring(ring, cfg.eps_dup).map_err(|e| {
        TerritoryError::degenerate(format!("region {label}: {e}"))
    })?;
    let area = region.area();
    if !area.is_finite() || area <= cfg.eps_area {
        return Err(TerritoryError::degenerate(format!(
            "region {label} has area {area}"
        )));
    }
    Ok(region)
}

/// Build both candidate regions for `path` drawn across `boundary`.
///
/// Pre: endpoints were checked against the caller's snap tolerance.
/// Post: `area(A) + area(B) == area(boundary)` within `cfg.area_rel_tol`.
pub fn partition(
    boundary: &ClosedPolygon,
    path: &[Point],
    cfg: GeomCfg,
) -> TerritoryResult<Partition> {
    let (first, last) = match path {
        [first, .., last] => (*first, *last),
        _ => {
            return Err(TerritoryError::invalid_path(format!(
                "need at least 2 points, got {}",
                path.len()
            )))
        }
    };
    let start = locate(first, boundary);
    let mut end = locate(last, boundary);
    // A loop back to its own start point: both ends share one projection.
    let closed_loop = (end.point - start.point).norm() <= cfg.eps_dup;
    if closed_loop {
        end = start;
    }

    let mut trail = path.to_vec();
    let k = trail.len() - 1;
    trail[0] = start.point;
    trail[k] = end.point;

    let n = boundary.edge_count();
    let verts = boundary.vertices();
    let full_ring_to_a = if closed_loop {
        // The notch region must wind against the boundary to cut into it.
        let mut ring = trail.clone();
        ring.push(trail[0]);
        signed_area(&ring) * boundary.signed_area() <= 0.0
    } else {
        // The walk that leaves the shared edge in boundary direction takes the ring.
        start.t <= end.t
    };
    let (arc_a, arc_b) = arc_lengths(&start, &end, n, full_ring_to_a);
    tracing::debug!(
        start_seg = start.segment_index,
        end_seg = end.segment_index,
        arc_a,
        arc_b,
        closed_loop,
        "partition arcs"
    );

    let ring_a: Vec<Point> = trail
        .iter()
        .copied()
        .chain((1..=arc_a).map(|j| verts[(end.segment_index + j) % n]))
        .chain(once(trail[0]))
        .collect();
    let ring_b: Vec<Point> = trail
        .iter()
        .rev()
        .copied()
        .chain((1..=arc_b).map(|j| verts[(start.segment_index + j) % n]))
        .chain(once(trail[k]))
        .collect();

    let region_a = close_region(ring_a, &cfg, "A")?;
    let region_b = close_region(ring_b, &cfg, "B")?;

    let whole = boundary.area();
    let (area_a, area_b) = (region_a.area(), region_b.area());
    let drift = (area_a + area_b - whole).abs();
    if !(drift <= cfg.area_rel_tol * whole) {
        return Err(TerritoryError::degenerate(format!(
            "areas {area_a} + {area_b} do not tile boundary area {whole}"
        )));
    }

    Ok(Partition {
        region_a,
        region_b,
        trail,
        start,
        end,
    })
}
