//! Claimed-area bookkeeping.

use crate::error::{TerritoryError, TerritoryResult};
use crate::geom::ClosedPolygon;

/// Total and cumulative claimed area for one stage.
///
/// `total_area` is fixed at construction; `total_claimed_area` only grows and
/// is clamped to `total_area`.
#[derive(Clone, Debug, PartialEq)]
pub struct AreaLedger {
    total_area: f64,
    total_claimed_area: f64,
    border_correction: f64,
}

impl AreaLedger {
    pub fn new(total_area: f64, border_correction: f64) -> TerritoryResult<Self> {
        if !(total_area.is_finite() && total_area > 0.0) {
            return Err(TerritoryError::config(format!(
                "total area must be finite and positive, got {total_area}"
            )));
        }
        if !(border_correction >= 0.0 && border_correction < total_area) {
            return Err(TerritoryError::config(format!(
                "border correction {border_correction} outside [0, {total_area})"
            )));
        }
        Ok(Self {
            total_area,
            total_claimed_area: 0.0,
            border_correction,
        })
    }

    /// Add `region` to the claimed total; returns the region's own area.
    pub fn record_claim(&mut self, region: &ClosedPolygon) -> f64 {
        let area = region.area();
        self.total_claimed_area = (self.total_claimed_area + area).min(self.total_area);
        area
    }

    #[inline]
    pub fn total_area(&self) -> f64 {
        self.total_area
    }

    #[inline]
    pub fn total_claimed_area(&self) -> f64 {
        self.total_claimed_area
    }

    #[inline]
    pub fn usable_area(&self) -> f64 {
        self.total_area - self.border_correction
    }

    #[inline]
    pub fn remaining_area(&self) -> f64 {
        self.total_area - self.total_claimed_area
    }

    /// Claimed share of the usable area in percent, capped at 100.
    pub fn claimed_percentage(&self) -> f64 {
        (self.total_claimed_area / self.usable_area() * 100.0).min(100.0)
    }
}
