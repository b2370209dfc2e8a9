//! The playfield aggregate.
//!
//! Purpose
//! - Own the outer ring, the playable ring, the claimed regions, the ledger and
//!   the traversable index for one stage.
//! - Run one claim attempt end to end: validate the path, partition the playable
//!   ring, classify by hazard, then commit.
//!
//! Commit policy
//! - Every fallible step runs before any state changes. A returned error leaves
//!   the field exactly as it was.

use crate::error::{TerritoryError, TerritoryResult};
use crate::geom::{ClosedPolygon, GeomCfg, Point};
use crate::ledger::AreaLedger;
use crate::partition::{classify, locate, partition};
use crate::traversable::TraversableBorderIndex;

/// Arena dimensions and tolerances. Defaults match a 960×720 arena with a
/// 20 px border line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldCfg {
    pub width: f64,
    pub height: f64,
    /// The outer ring is inset by half of this on every side.
    pub line_thickness: f64,
    /// Subtracted from the total area when reporting the claimed percentage.
    pub border_correction: f64,
    /// Path endpoints farther than this from the playable ring are rejected.
    pub snap_tolerance: f64,
    /// Hazards this close to a permanent line (or the trail) are "on" it.
    pub hazard_tolerance: f64,
    pub geom: GeomCfg,
}

impl Default for FieldCfg {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 720.0,
            line_thickness: 20.0,
            border_correction: 0.0,
            snap_tolerance: 5.0,
            hazard_tolerance: 1.0,
            geom: GeomCfg::default(),
        }
    }
}

impl FieldCfg {
    pub fn new(width: f64, height: f64, line_thickness: f64) -> Self {
        Self {
            width,
            height,
            line_thickness,
            ..Self::default()
        }
    }

    #[inline]
    pub fn margin(&self) -> f64 {
        self.line_thickness * 0.5
    }

    fn validate(&self) -> TerritoryResult<()> {
        let finite = [
            self.width,
            self.height,
            self.line_thickness,
            self.border_correction,
            self.snap_tolerance,
            self.hazard_tolerance,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(TerritoryError::config("non-finite field parameter"));
        }
        if self.line_thickness < 0.0 || self.snap_tolerance < 0.0 || self.hazard_tolerance < 0.0 {
            return Err(TerritoryError::config(
                "line thickness and tolerances must be non-negative",
            ));
        }
        let m = 2.0 * self.margin();
        if !(self.width > m && self.height > m) {
            return Err(TerritoryError::config(format!(
                "arena {}x{} leaves no room inside a {} line",
                self.width, self.height, self.line_thickness
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Field {
    cfg: FieldCfg,
    outer: ClosedPolygon,
    playable: ClosedPolygon,
    claimed: Vec<ClosedPolygon>,
    ledger: AreaLedger,
    index: TraversableBorderIndex,
}

impl Field {
    /// Arena of `width × height` with the remaining knobs at their defaults.
    pub fn new(width: f64, height: f64, line_thickness: f64) -> TerritoryResult<Self> {
        Self::with_cfg(FieldCfg::new(width, height, line_thickness))
    }

    pub fn with_cfg(cfg: FieldCfg) -> TerritoryResult<Self> {
        cfg.validate()?;
        let m = cfg.margin();
        let outer = ClosedPolygon::rectangle(
            Point::new(m, m),
            Point::new(cfg.width - m, cfg.height - m),
        )?;
        let ledger = AreaLedger::new(outer.area(), cfg.border_correction)?;
        let index = TraversableBorderIndex::new(&outer);
        tracing::debug!(
            width = cfg.width,
            height = cfg.height,
            margin = m,
            total_area = ledger.total_area(),
            "field created"
        );
        Ok(Self {
            cfg,
            playable: outer.clone(),
            outer,
            claimed: Vec::new(),
            ledger,
            index,
        })
    }

    /// Claim the side of `path` the hazard is not in. Returns the claimed area.
    pub fn process_claim(&mut self, path: &[Point], hazard: Point) -> TerritoryResult<f64> {
        let result = self.try_claim(path, hazard);
        if let Err(e) = &result {
            tracing::warn!(kind = e.kind(), error = %e, "claim rejected");
        }
        result
    }

    fn try_claim(&mut self, path: &[Point], hazard: Point) -> TerritoryResult<f64> {
        self.validate_path(path)?;
        let split = partition(&self.playable, path, self.cfg.geom)?;
        let outcome = classify(
            split,
            hazard,
            &self.index,
            self.cfg.hazard_tolerance,
            self.cfg.geom,
        )?;

        // commit
        let area = self.ledger.record_claim(&outcome.claimed);
        self.index.absorb_claimed(&outcome.claimed);
        self.index.replace_playable(&outcome.remaining);
        self.claimed.push(outcome.claimed);
        self.playable = outcome.remaining;
        tracing::info!(
            area,
            percentage = self.ledger.claimed_percentage(),
            claims = self.claimed.len(),
            decided_by_area = outcome.decided_by_area,
            "claim committed"
        );
        Ok(area)
    }

    fn validate_path(&self, path: &[Point]) -> TerritoryResult<()> {
        let (first, last) = match path {
            [first, .., last] => (*first, *last),
            _ => {
                return Err(TerritoryError::invalid_path(format!(
                    "need at least 2 points, got {}",
                    path.len()
                )))
            }
        };
        if path.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(TerritoryError::invalid_path("non-finite coordinate"));
        }
        for (label, p) in [("start", first), ("end", last)] {
            let hit = locate(p, &self.playable);
            if hit.distance > self.cfg.snap_tolerance {
                return Err(TerritoryError::invalid_path(format!(
                    "{label} ({}, {}) is {:.3} from the playable border (tolerance {})",
                    p.x, p.y, hit.distance, self.cfg.snap_tolerance
                )));
            }
        }
        Ok(())
    }

    pub fn is_traversable(&self, point: Point, tolerance: f64) -> bool {
        self.index.is_traversable(point, tolerance)
    }

    pub fn nearest_traversable_point(&self, point: Point) -> Point {
        self.index.nearest_traversable_point(point)
    }

    /// May a new path start here? Only the current playable ring counts.
    pub fn is_on_playable_border(&self, point: Point, tolerance: f64) -> bool {
        self.playable.distance_to_boundary(point) <= tolerance
    }

    pub fn current_playable_boundary(&self) -> ClosedPolygon {
        self.playable.clone()
    }

    pub fn outer_border(&self) -> ClosedPolygon {
        self.outer.clone()
    }

    /// Claimed regions in claim order.
    pub fn claimed_areas(&self) -> &[ClosedPolygon] {
        &self.claimed
    }

    pub fn claim_count(&self) -> usize {
        self.claimed.len()
    }

    pub fn claimed_percentage(&self) -> f64 {
        self.ledger.claimed_percentage()
    }

    pub fn total_area(&self) -> f64 {
        self.ledger.total_area()
    }

    pub fn total_claimed_area(&self) -> f64 {
        self.ledger.total_claimed_area()
    }

    pub fn traversable_index(&self) -> &TraversableBorderIndex {
        &self.index
    }

    pub fn config(&self) -> &FieldCfg {
        &self.cfg
    }
}
