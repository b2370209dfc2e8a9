//! Error kinds raised by the partition engine.
//!
//! Every variant is recoverable: a failed claim leaves the `Field` untouched and
//! the caller decides whether to discard the attempt or penalize the player.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TerritoryError {
    #[error("invalid path: {reason}")]
    InvalidPath { reason: String },

    #[error("degenerate partition: {reason}")]
    DegeneratePartition { reason: String },

    #[error("ambiguous partition: hazard inside region A = {in_a}, region B = {in_b}")]
    AmbiguousPartition { in_a: bool, in_b: bool },

    #[error("degenerate polygon: expected at least 3 distinct vertices, got {vertices}")]
    DegeneratePolygon { vertices: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl TerritoryError {
    pub(crate) fn invalid_path(reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            reason: reason.into(),
        }
    }

    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegeneratePartition {
            reason: reason.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Short, stable label for logs and summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidPath { .. } => "invalid_path",
            Self::DegeneratePartition { .. } => "degenerate_partition",
            Self::AmbiguousPartition { .. } => "ambiguous_partition",
            Self::DegeneratePolygon { .. } => "degenerate_polygon",
            Self::InvalidConfiguration { .. } => "invalid_configuration",
        }
    }
}

pub type TerritoryResult<T> = Result<T, TerritoryError>;
