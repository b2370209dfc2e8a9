//! Seeded random claim inputs (chords + hazard positions).
//!
//! Purpose
//! - Deterministic generators for benches, property tests and the CLI's random
//!   sessions. Draws are indexed by a replay token `(seed, index)` so any single
//!   draw can be reproduced without replaying the ones before it.
//!
//! Model
//! - Chords: two boundary points picked by arc length, at least
//!   `min_separation_frac` of the perimeter apart in both directions, with the
//!   chord midpoint strictly inside the ring. On a convex ring this guarantees a
//!   simple split.
//! - Hazards: rejection sampling inside the bounding box.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geom::{ClosedPolygon, Point};

const MAX_ATTEMPTS: usize = 64;

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self, stream: u64) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15) ^ stream));
        StdRng::seed_from_u64(k)
    }
}

/// Chord sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct ChordCfg {
    /// Minimum boundary distance between endpoints, as a fraction of the perimeter.
    /// Clamped to [0, 0.5].
    pub min_separation_frac: f64,
    /// Evenly spaced points inserted between the endpoints.
    pub interior_points: usize,
    /// Midpoint must be at least this far (relative to the perimeter) from the ring.
    pub min_clearance_frac: f64,
}

impl Default for ChordCfg {
    fn default() -> Self {
        Self {
            min_separation_frac: 0.1,
            interior_points: 3,
            min_clearance_frac: 1e-6,
        }
    }
}

/// Draw a straight claim path across `boundary`. `None` after repeated rejections.
pub fn draw_chord(boundary: &ClosedPolygon, cfg: ChordCfg, tok: ReplayToken) -> Option<Vec<Point>> {
    let mut rng = tok.to_std_rng(0);
    let perimeter = boundary.perimeter();
    if !(perimeter > 0.0) {
        return None;
    }
    let sep = cfg.min_separation_frac.clamp(0.0, 0.5) * perimeter;
    let clearance = cfg.min_clearance_frac.max(0.0) * perimeter;
    for _ in 0..MAX_ATTEMPTS {
        let s0 = rng.gen::<f64>() * perimeter;
        let s1 = rng.gen::<f64>() * perimeter;
        let gap = (s1 - s0).rem_euclid(perimeter);
        if gap < sep || perimeter - gap < sep {
            continue;
        }
        let a = boundary.point_at_arc_length(s0);
        let b = boundary.point_at_arc_length(s1);
        let mid = (a + b) * 0.5;
        if !boundary.contains(mid) || boundary.distance_to_boundary(mid) <= clearance {
            continue;
        }
        let steps = cfg.interior_points + 1;
        let path = (0..=steps)
            .map(|k| a + (b - a) * (k as f64 / steps as f64))
            .collect();
        return Some(path);
    }
    None
}

/// Draw a point strictly inside `boundary`. `None` after repeated rejections.
pub fn draw_interior_point(boundary: &ClosedPolygon, tok: ReplayToken) -> Option<Point> {
    let mut rng = tok.to_std_rng(1);
    let (lo, hi) = boundary.bounds();
    for _ in 0..MAX_ATTEMPTS {
        let p = Vector2::new(rng.gen_range(lo.x..=hi.x), rng.gen_range(lo.y..=hi.y));
        if boundary.contains(p) && boundary.distance_to_boundary(p) > 0.0 {
            return Some(p);
        }
    }
    None
}
