//! Decide which partition region the player claims.

use super::split::Partition;
use crate::error::{TerritoryError, TerritoryResult};
use crate::geom::{segment_distance, ClosedPolygon, GeomCfg, Point};
use crate::traversable::TraversableBorderIndex;

/// Outcome of classification; `remaining` becomes the new playable ring.
#[derive(Clone, Debug)]
pub struct Classification {
    pub claimed: ClosedPolygon,
    pub remaining: ClosedPolygon,
    /// The hazard sat on an outer/claimed line and the split was decided by area.
    pub decided_by_area: bool,
}

fn near_trail(hazard: Point, trail: &[Point], tolerance: f64) -> bool {
    trail
        .windows(2)
        .any(|w| segment_distance(hazard, w[0], w[1]) <= tolerance)
}

/// The hazard keeps the region it occupies; the other region is claimed.
///
/// Rules:
/// - A hazard on the drawn trail is ambiguous.
/// - A hazard within `tolerance` of an outer or claimed line occupies neither
///   region; the smaller region is claimed (equal areas stay ambiguous).
/// - Otherwise exactly one region must contain the hazard.
pub fn classify(
    partition: Partition,
    hazard: Point,
    index: &TraversableBorderIndex,
    tolerance: f64,
    cfg: GeomCfg,
) -> TerritoryResult<Classification> {
    let Partition {
        region_a,
        region_b,
        trail,
        ..
    } = partition;

    if near_trail(hazard, &trail, tolerance) {
        tracing::debug!(x = hazard.x, y = hazard.y, "hazard on drawn trail");
        return Err(TerritoryError::AmbiguousPartition {
            in_a: true,
            in_b: true,
        });
    }

    let skimming = index.is_on_permanent_line(hazard, tolerance);
    let in_a = !skimming && region_a.contains(hazard);
    let in_b = !skimming && region_b.contains(hazard);
    tracing::debug!(in_a, in_b, skimming, "hazard classification");

    match (in_a, in_b) {
        (true, false) => Ok(Classification {
            claimed: region_b,
            remaining: region_a,
            decided_by_area: false,
        }),
        (false, true) => Ok(Classification {
            claimed: region_a,
            remaining: region_b,
            decided_by_area: false,
        }),
        (false, false) if skimming => {
            let (area_a, area_b) = (region_a.area(), region_b.area());
            if (area_a - area_b).abs() <= cfg.area_rel_tol * (area_a + area_b) {
                return Err(TerritoryError::AmbiguousPartition { in_a, in_b });
            }
            let (claimed, remaining) = if area_a < area_b {
                (region_a, region_b)
            } else {
                (region_b, region_a)
            };
            Ok(Classification {
                claimed,
                remaining,
                decided_by_area: true,
            })
        }
        _ => Err(TerritoryError::AmbiguousPartition { in_a, in_b }),
    }
}
