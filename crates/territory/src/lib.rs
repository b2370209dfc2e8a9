//! Territory partition engine.
//!
//! A hazard roams inside a polygonal arena; the player draws a path between two
//! points of the playable border; the path splits the playable area in two and
//! the half without the hazard becomes claimed territory.
//!
//! Layout
//! - `geom`: points, closed rings, segment distance, shoelace area, parity test.
//! - `partition`: endpoint projection, path closure into two regions, hazard
//!   classification.
//! - `ledger`: total and claimed area, claimed percentage.
//! - `traversable`: outer/claimed/playable lines tagged by provenance.
//! - `field`: the per-stage aggregate and the only mutating entry point.
//! - `sample`: seeded chords and hazards for benches, tests and the CLI.

pub mod api;
pub mod error;
pub mod field;
pub mod geom;
pub mod ledger;
pub mod partition;
pub mod sample;
pub mod traversable;

pub use error::{TerritoryError, TerritoryResult};
pub use field::{Field, FieldCfg};
pub use geom::{ClosedPolygon, GeomCfg, Point};

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::field::{Field, FieldCfg};
    pub use crate::geom::{ClosedPolygon, GeomCfg, Point};
    pub use crate::sample::{draw_chord, draw_interior_point, ChordCfg, ReplayToken};
    pub use crate::traversable::Provenance;
    pub use crate::{TerritoryError, TerritoryResult};
}
