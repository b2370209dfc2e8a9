//! Curated surface for collaborators (movement, hazard logic, rendering).
//!
//! Those callers only need the field, its read accessors, and the free
//! geometry helpers; the individual engine stages are re-exported for tooling
//! that wants to inspect a split before committing it.

// Aggregate
pub use crate::field::{Field, FieldCfg};
pub use crate::ledger::AreaLedger;
// Geometry
pub use crate::geom::{
    point_in_polygon, polygon_area, segment_distance, ClosedPolygon, GeomCfg, Point,
};
// Engine stages
pub use crate::partition::{
    classify, locate, partition, Classification, Partition, Projection,
};
pub use crate::traversable::{NearestEdge, Provenance, TaggedEdge, TraversableBorderIndex};
// Errors
pub use crate::error::{TerritoryError, TerritoryResult};
