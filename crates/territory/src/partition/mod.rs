//! Splitting the playable ring along a drawn path.
//!
//! Purpose
//! - `project`: locate path endpoints on the current boundary.
//! - `split`: close the path with the two boundary arcs into regions A and B.
//! - `classify`: pick the claimed region from the hazard position.
//!
//! Each stage is a pure function of its inputs; `Field` owns the state and only
//! commits once all three have succeeded.

mod classify;
mod project;
mod split;

pub use classify::{classify, Classification};
pub use project::{locate, Projection};
pub use split::{partition, Partition};

#[cfg(test)]
mod tests;
