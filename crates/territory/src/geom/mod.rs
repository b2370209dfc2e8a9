//! Planar geometry primitives for the playfield.
//!
//! Purpose
//! - Provide the owned `ClosedPolygon` ring plus the stateless primitives every
//!   other component leans on: clamped segment distance, shoelace area, and the
//!   parity point-in-polygon test.
//! - Keep numerics explicit: all tolerances flow through `GeomCfg`.
//!
//! Conventions
//! - Screen coordinates (y down). The arena ring is clockwise on screen, which
//!   is a positive shoelace sum.
//! - Rings are stored closed (first == last); producers never hand out views
//!   into another polygon's storage.

mod types;
mod util;

pub use types::{ClosedPolygon, GeomCfg, Point};
pub use util::{
    closest_point_on_segment, point_in_polygon, polygon_area, segment_distance, signed_area,
};
