//! Error types for the Pictrail engine.

use crate::PhotoId;
use thiserror::Error;

/// All possible errors from the Pictrail engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("failed to materialize media for photo {id}: {reason}")]
    MediaMaterialize { id: PhotoId, reason: String },
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
