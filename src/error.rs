//! Error types for the few fallible paths outside the frame loop.
//!
//! Gameplay failures (can't afford, nothing to recycle) are plain `bool`/`Option`
//! returns; these enums cover placement and persistence where the caller wants
//! to know *why*.

use crate::sim::ResourceKind;

/// Why a building could not be placed
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("too close to building #{neighbor} ({distance:.1} < {min:.1})")]
    TooClose { neighbor: u32, distance: f32, min: f32 },

    #[error("not enough {0}")]
    InsufficientResources(ResourceKind),

    #[error("unknown building type: {0}")]
    UnknownKind(String),
}

/// Persistence failures (LocalStorage, JSON)
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,

    #[error("storage write rejected for key {0}")]
    WriteRejected(String),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
