use super::types::Point;

/// Closest point to `p` on segment `a→b` and its clamped parameter `t ∈ [0,1]`.
///
/// Zero-length segments return `(a, 0.0)`.
#[inline]
pub fn closest_point_on_segment(p: Point, a: Point, b: Point) -> (Point, f64) {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if !(len_sq > 0.0) {
        return (a, 0.0);
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    (a + ab * t, t)
}

/// Euclidean distance from `p` to segment `a→b`.
#[inline]
pub fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let (q, _) = closest_point_on_segment(p, a, b);
    (p - q).norm()
}

/// Shoelace sum over consecutive pairs, halved. Positive for counterclockwise
/// rings in y-up coordinates (clockwise on screen, where y grows downward).
///
/// Pre: `ring` is closed (first == last).
pub fn signed_area(ring: &[Point]) -> f64 {
    debug_assert!(
        ring.first() == ring.last(),
        "signed_area expects a closed ring"
    );
    ring.windows(2)
        .map(|w| w[0].x * w[1].y - w[1].x * w[0].y)
        .sum::<f64>()
        * 0.5
}

/// Unsigned shoelace area of a closed ring.
#[inline]
pub fn polygon_area(ring: &[Point]) -> f64 {
    signed_area(ring).abs()
}

/// Parity (ray-casting) test. Points exactly on the boundary may report either side.
///
/// Works on closed rings; the zero-length closing pair never toggles parity.
pub fn point_in_polygon(p: Point, ring: &[Point]) -> bool {
    let mut inside = false;
    for w in ring.windows(2) {
        let (pi, pj) = (w[0], w[1]);
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}
