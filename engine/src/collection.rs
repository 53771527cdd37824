//! Collection model.

use crate::{CollectionId, Photo};
use serde::{Deserialize, Serialize};

/// A named grouping of photos.
///
/// The `title` is the collection key used for lookups; `id` is the server-side id
/// (`0` for collections that only exist on this device). Invariant: `cover_uri`, when
/// set, references a photo currently in `photos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Collection {
    /// Server-assigned id, `0` for local-only collections
    pub id: CollectionId,
    /// Title, doubles as the collection key
    pub title: String,
    /// Optional user-friendly name shown instead of the title
    pub display_name: Option<String>,
    /// Reference of the photo used as the collection thumbnail
    pub cover_uri: Option<String>,
    pub photos: Vec<Photo>,
}

impl Default for Collection {
    fn default() -> Self {
        Self {
            id: 0,
            title: String::new(),
            display_name: None,
            cover_uri: None,
            photos: Vec::new(),
        }
    }
}

impl Collection {
    /// Create an empty local-only collection.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Whether this collection has no server-side counterpart yet.
    pub fn is_local_only(&self) -> bool {
        self.id == 0
    }

    /// Check membership by photo reference.
    pub fn contains_uri(&self, uri: &str) -> bool {
        self.photos.iter().any(|p| p.uri == uri)
    }

    /// Case-insensitive title comparison, used for key lookups and collision checks.
    pub fn matches_title(&self, other: &str) -> bool {
        self.title.to_lowercase() == other.to_lowercase()
    }

    /// Set the cover only if the collection has none.
    pub fn backfill_cover(&mut self, uri: &str) {
        if self.cover_uri.is_none() {
            self.cover_uri = Some(uri.to_string());
        }
    }

    /// Re-establish the cover invariant after a photo was removed.
    ///
    /// An emptied collection loses its cover; if the removed photo was the cover, the
    /// first remaining photo takes over; otherwise the cover is untouched.
    pub fn refresh_cover_after_removal(&mut self, removed_uri: &str) {
        if self.photos.is_empty() {
            self.cover_uri = None;
        } else if self.cover_uri.as_deref() == Some(removed_uri) {
            self.cover_uri = Some(self.photos[0].uri.clone());
        }
    }

    /// Whether the cover invariant holds: no cover, or a cover present in `photos`.
    pub fn cover_is_consistent(&self) -> bool {
        match self.cover_uri.as_deref() {
            None => true,
            Some(cover) => self.contains_uri(cover),
        }
    }
}
