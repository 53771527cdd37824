//! Library - the live, in-memory collection list and its mutation operations.
//!
//! Every operation reads the current list, computes a new one, and replaces the old
//! list wholesale. Observers can therefore detect change by replacement instead of
//! diffing in-place edits. Operations report whether anything changed so callers know
//! when to publish and persist; operations on missing collections or photos are
//! silent no-ops.

use crate::{Collection, Photo};

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// The live collection list for one app session.
#[derive(Debug, Clone, Default)]
pub struct Library {
    collections: Vec<Collection>,
}

impl Library {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a library from a previously persisted collection list.
    pub fn from_collections(collections: Vec<Collection>) -> Self {
        Self { collections }
    }

    /// The current collection list.
    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    /// All photos across all collections, in collection order.
    pub fn photos(&self) -> Vec<Photo> {
        self.collections
            .iter()
            .flat_map(|c| c.photos.iter().cloned())
            .collect()
    }

    /// Replace the whole list, e.g. with a reconciliation result.
    pub fn replace(&mut self, collections: Vec<Collection>) {
        self.collections = collections;
    }

    /// Add a photo to its collection, creating the collection if needed.
    ///
    /// The target key is the photo's collection key, defaulting to the general bucket
    /// when absent or blank. A photo already present by reference is not re-added. A
    /// new collection takes the photo as its cover; an existing one only gets the
    /// cover backfilled if it had none.
    pub fn add_photo(&mut self, photo: Photo) -> bool {
        let key = photo.key_or_default().to_string();
        let mut photo = photo;
        photo.collection_key = Some(key.clone());

        let mut next = self.collections.clone();
        match next.iter_mut().find(|c| c.matches_title(&key)) {
            Some(target) => {
                if target.contains_uri(&photo.uri) {
                    return false;
                }
                target.backfill_cover(&photo.uri);
                target.photos.push(photo);
            }
            None => {
                let mut created = Collection::new(key);
                created.cover_uri = Some(photo.uri.clone());
                created.photos.push(photo);
                next.push(created);
            }
        }

        self.collections = next;
        true
    }

    /// Remove a photo from its owning collection, reassigning the cover if needed.
    ///
    /// Idempotent: deleting an already-removed photo changes nothing.
    pub fn delete_photo(&mut self, photo: &Photo) -> bool {
        let key = photo.key_or_default();

        let mut next = self.collections.clone();
        let Some(target) = next.iter_mut().find(|c| c.title == key) else {
            return false;
        };

        let before = target.photos.len();
        target.photos.retain(|p| p.uri != photo.uri);
        if target.photos.len() == before {
            return false;
        }
        target.refresh_cover_after_removal(&photo.uri);

        self.collections = next;
        true
    }

    /// Set a photo's user-facing title. Blank names are ignored.
    pub fn rename_photo(&mut self, photo: &Photo, new_name: &str) -> bool {
        if is_blank(new_name) {
            return false;
        }

        let mut next = self.collections.clone();
        let Some(target) = next.iter_mut().find(|c| c.title == photo.key_or_default()) else {
            return false;
        };
        let Some(entry) = target.photos.iter_mut().find(|p| p.uri == photo.uri) else {
            return false;
        };

        entry.custom_title = Some(new_name.to_string());
        self.collections = next;
        true
    }

    /// Whether a collection rename would take effect.
    ///
    /// False on blank arguments, on a missing collection, or when the new title
    /// collides (case-insensitively) with a different existing collection. Lets
    /// callers with side effects of their own (e.g. a server call) bail out before
    /// committing anything.
    pub fn rename_allowed(&self, old_key: &str, new_title: &str) -> bool {
        if is_blank(old_key) || is_blank(new_title) {
            return false;
        }
        if self
            .collections
            .iter()
            .any(|c| c.matches_title(new_title) && !c.matches_title(old_key))
        {
            return false;
        }
        self.collections.iter().any(|c| c.matches_title(old_key))
    }

    /// Retitle a collection and rewrite the collection key of every member photo.
    ///
    /// No-op whenever [`Library::rename_allowed`] says so.
    pub fn rename_collection(&mut self, old_key: &str, new_title: &str) -> bool {
        if !self.rename_allowed(old_key, new_title) {
            return false;
        }

        let mut next = self.collections.clone();
        let Some(target) = next.iter_mut().find(|c| c.matches_title(old_key)) else {
            return false;
        };

        target.title = new_title.to_string();
        for p in &mut target.photos {
            p.collection_key = Some(new_title.to_string());
        }

        self.collections = next;
        true
    }

    /// Move a photo to another collection.
    ///
    /// The source loses the photo (cover reassigned as for delete) and the
    /// destination gains a copy with its collection key rewritten, backfilling the
    /// destination cover if it had none. No-op when the destination does not exist.
    pub fn move_to_collection(&mut self, photo: &Photo, destination_key: &str) -> bool {
        if !self.collections.iter().any(|c| c.title == destination_key) {
            return false;
        }

        let mut next = self.collections.clone();

        if let Some(source) = next.iter_mut().find(|c| c.title == photo.key_or_default()) {
            source.photos.retain(|p| p.uri != photo.uri);
            source.refresh_cover_after_removal(&photo.uri);
        }

        let Some(destination) = next.iter_mut().find(|c| c.title == destination_key) else {
            return false;
        };
        let mut moved = photo.clone();
        moved.collection_key = Some(destination_key.to_string());
        destination.backfill_cover(&moved.uri);
        destination.photos.push(moved);

        self.collections = next;
        true
    }

    /// Create an empty collection. No-op on a case-insensitive duplicate title.
    pub fn create_empty_collection(&mut self, title: &str) -> bool {
        if self.collections.iter().any(|c| c.matches_title(title)) {
            return false;
        }

        let mut created = Collection::new(title);
        created.display_name = Some(title.to_string());

        let mut next = self.collections.clone();
        next.push(created);
        self.collections = next;
        true
    }

    /// Remove a collection and every photo in it.
    pub fn delete_collection(&mut self, key: &str) -> bool {
        let mut next = self.collections.clone();
        let before = next.len();
        next.retain(|c| c.title != key);
        if next.len() == before {
            return false;
        }

        self.collections = next;
        true
    }

    /// Mark a photo as held by the server after a confirmed upload.
    ///
    /// The server copy supersedes the local one on the next reconciliation, so the
    /// photo must stop counting as pending.
    pub fn confirm_synced(&mut self, uri: &str) -> bool {
        let mut next = self.collections.clone();
        let mut changed = false;
        for collection in &mut next {
            for p in collection.photos.iter_mut().filter(|p| p.uri == uri) {
                if !p.synced {
                    p.synced = true;
                    changed = true;
                }
            }
        }
        if !changed {
            return false;
        }

        self.collections = next;
        true
    }
}
