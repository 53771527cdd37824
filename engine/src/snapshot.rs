//! Snapshot types for persisting and restoring the collection list.
//!
//! The snapshot is one serialized blob replaced wholesale on every save. Callers
//! that cannot parse a stored blob should treat it as "no data" rather than fail.

use crate::{error::Result, Collection, Error};
use serde::{Deserialize, Serialize};

/// Version of the snapshot format for future compatibility.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// A point-in-time snapshot of the collection list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibrarySnapshot {
    /// Snapshot format version
    pub format_version: u32,
    /// The full collection list
    pub collections: Vec<Collection>,
}

impl LibrarySnapshot {
    /// Snapshot the given collection list.
    pub fn new(collections: Vec<Collection>) -> Self {
        Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            collections,
        }
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::InvalidSnapshot(e.to_string()))
    }

    /// Deserialize from JSON, rejecting snapshots from a newer format.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self =
            serde_json::from_str(json).map_err(|e| Error::InvalidSnapshot(e.to_string()))?;

        if snapshot.format_version > SNAPSHOT_FORMAT_VERSION {
            return Err(Error::InvalidSnapshot(format!(
                "unsupported snapshot format version: {} (max supported: {})",
                snapshot.format_version, SNAPSHOT_FORMAT_VERSION
            )));
        }

        Ok(snapshot)
    }
}
