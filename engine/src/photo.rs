//! Photo model.

use crate::{CollectionId, PhotoId, DEFAULT_COLLECTION};
use serde::{Deserialize, Serialize};

/// A single photo in the library.
///
/// Identity is the `uri` reference string locally, and the numeric `id` once the
/// server has accepted the photo. Lifecycle: captured (unsynced, `id == 0`), pending
/// upload, then synced on confirmed server acceptance or when the photo arrives in a
/// remote listing. Deletion is terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Photo {
    /// Server-assigned id, `0` until the upload is confirmed
    pub id: PhotoId,
    /// Reference to the image: device capture URI, materialized cache file, or
    /// unresolved embedded ref
    pub uri: String,
    /// Title assigned at capture or by the server
    pub title: Option<String>,
    /// User-chosen title, takes precedence over `title` for display
    pub custom_title: Option<String>,
    /// Title of the owning collection
    pub collection_key: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Server id of the owning collection, `0` when unknown
    pub collection_id: CollectionId,
    /// Whether the server holds this photo
    pub synced: bool,
}

impl Default for Photo {
    fn default() -> Self {
        Self {
            id: 0,
            uri: String::new(),
            title: None,
            custom_title: None,
            collection_key: None,
            latitude: None,
            longitude: None,
            collection_id: 0,
            synced: false,
        }
    }
}

impl Photo {
    /// Create an unsynced photo for a fresh device capture.
    pub fn new_capture(
        uri: impl Into<String>,
        collection_key: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Self {
        Self {
            uri: uri.into(),
            collection_key,
            latitude,
            longitude,
            ..Self::default()
        }
    }

    /// User-facing title: the custom title if set, otherwise the original one.
    pub fn display_title(&self) -> &str {
        self.custom_title
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or("")
    }

    /// Owning collection key, falling back to the default bucket when absent or blank.
    pub fn key_or_default(&self) -> &str {
        match self.collection_key.as_deref() {
            Some(key) if !key.trim().is_empty() => key,
            _ => DEFAULT_COLLECTION,
        }
    }

    /// Whether this photo still awaits upload.
    pub fn is_pending(&self) -> bool {
        !self.synced
    }
}
