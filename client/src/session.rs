//! Session - the single owner of the live collection view.
//!
//! All mutation operations and the reconciliation pass are serialized behind one
//! lock, so two concurrent read-modify-publish sequences can never lose updates.
//! Each change is published to watchers first and then persisted; persistence is
//! fire-and-forget (a failed save is logged, the published view stands).

use crate::api::{RemoteApi, RemotePhotoRow};
use crate::error::Result;
use crate::media::MediaCache;
use crate::store::FileStore;
use futures::future;
use pictrail_engine::{reconcile, Collection, Library, Photo, RemoteCollection};
use tokio::sync::{watch, Mutex, MutexGuard};

/// One authenticated app session over the photo library.
pub struct Session<A: RemoteApi> {
    api: A,
    token: String,
    store: FileStore,
    media: Mutex<MediaCache>,
    library: Mutex<Library>,
    updates: watch::Sender<Vec<Collection>>,
}

impl<A: RemoteApi> Session<A> {
    /// Open a session, restoring the previously persisted library.
    pub fn new(api: A, token: impl Into<String>, store: FileStore, media: MediaCache) -> Self {
        let library = Library::from_collections(store.load());
        let (updates, _) = watch::channel(library.collections().to_vec());
        Self {
            api,
            token: token.into(),
            store,
            media: Mutex::new(media),
            library: Mutex::new(library),
            updates,
        }
    }

    /// Subscribe to published collection lists.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Collection>> {
        self.updates.subscribe()
    }

    /// Snapshot of the current collection list.
    pub async fn collections(&self) -> Vec<Collection> {
        self.library.lock().await.collections().to_vec()
    }

    /// Fetch the remote snapshot and merge it with local state.
    ///
    /// Holds the library lock for the whole pass: mutations cannot interleave with
    /// an in-flight reconciliation. Any fetch failure aborts before the merge, so
    /// the previously published state stays untouched.
    pub async fn synchronize(&self) -> Result<()> {
        let mut library = self.library.lock().await;

        let summaries = self.api.list_collections(&self.token).await?;
        tracing::info!("synchronizing {} remote collections", summaries.len());

        // Photo listings for different collections may fetch concurrently
        let listings = future::try_join_all(
            summaries
                .iter()
                .map(|summary| self.api.list_photos(&self.token, summary.id)),
        )
        .await?;

        let remote: Vec<RemoteCollection> = summaries
            .into_iter()
            .zip(listings)
            .map(|(summary, rows)| RemoteCollection {
                id: summary.id,
                title: summary.title,
                cover: summary.cover,
                photos: rows
                    .into_iter()
                    .map(RemotePhotoRow::into_remote_photo)
                    .collect(),
            })
            .collect();

        let mut media = self.media.lock().await;
        let merged = reconcile(remote, library.collections(), &mut *media);
        drop(media);

        library.replace(merged);
        self.publish_and_persist(&library);
        Ok(())
    }

    /// Add a freshly captured photo to its collection.
    pub async fn add_photo(&self, photo: Photo) -> bool {
        let mut library = self.library.lock().await;
        let changed = library.add_photo(photo);
        if changed {
            self.publish_and_persist(&library);
        }
        changed
    }

    /// Delete a photo locally and, for server-held photos, remotely.
    ///
    /// The remote delete runs first; if it fails, local state stays unchanged.
    pub async fn delete_photo(&self, photo: &Photo) -> Result<bool> {
        if photo.id > 0 {
            self.api.delete_photo(&self.token, photo.id).await?;
        }

        let mut library = self.library.lock().await;
        let changed = library.delete_photo(photo);
        self.media.lock().await.remove_for(photo);
        if changed {
            self.publish_and_persist(&library);
        }
        Ok(changed)
    }

    /// Set a photo's user-facing title.
    pub async fn rename_photo(&self, photo: &Photo, new_name: &str) -> bool {
        let mut library = self.library.lock().await;
        let changed = library.rename_photo(photo, new_name);
        if changed {
            self.publish_and_persist(&library);
        }
        changed
    }

    /// Retitle a collection locally and, for server-backed collections, remotely.
    ///
    /// Renames the engine would reject (blank title, collision) bail out before
    /// the server call; a failed server call leaves local state unchanged.
    pub async fn rename_collection(
        &self,
        collection: &Collection,
        new_title: &str,
    ) -> Result<bool> {
        let mut library = self.library.lock().await;
        if !library.rename_allowed(&collection.title, new_title) {
            return Ok(false);
        }

        if !collection.is_local_only() {
            self.api
                .rename_collection(&self.token, collection.id, new_title)
                .await?;
        }

        let changed = library.rename_collection(&collection.title, new_title);
        if changed {
            self.publish_and_persist(&library);
        }
        Ok(changed)
    }

    /// Move a photo into another collection.
    pub async fn move_to_collection(&self, photo: &Photo, destination_key: &str) -> bool {
        let mut library = self.library.lock().await;
        let changed = library.move_to_collection(photo, destination_key);
        if changed {
            self.publish_and_persist(&library);
        }
        changed
    }

    /// Create an empty collection.
    ///
    /// Local-only: the collection reaches the server when its first photo uploads.
    pub async fn create_collection(&self, title: &str) -> bool {
        let mut library = self.library.lock().await;
        let changed = library.create_empty_collection(title);
        if changed {
            self.publish_and_persist(&library);
        }
        changed
    }

    /// Delete a collection and its photos, remotely too when server-backed.
    pub async fn delete_collection(&self, collection: &Collection) -> Result<bool> {
        if !collection.is_local_only() {
            self.api
                .delete_collection(&self.token, collection.id)
                .await?;
        }

        let mut library = self.library.lock().await;
        let changed = library.delete_collection(&collection.title);
        if changed {
            let media = self.media.lock().await;
            for photo in &collection.photos {
                media.remove_for(photo);
            }
            self.publish_and_persist(&library);
        }
        Ok(changed)
    }

    /// Upload a captured photo's bytes and mark it synced on acceptance.
    pub async fn upload_photo(&self, photo: &Photo, image: Vec<u8>) -> Result<()> {
        self.api
            .upload_photo(
                &self.token,
                image,
                photo.latitude,
                photo.longitude,
                photo.collection_id,
            )
            .await?;

        let mut library = self.library.lock().await;
        if library.confirm_synced(&photo.uri) {
            self.publish_and_persist(&library);
        }
        Ok(())
    }

    /// Publish the current list to watchers, then persist it.
    fn publish_and_persist(&self, library: &MutexGuard<'_, Library>) {
        self.updates.send_replace(library.collections().to_vec());
        if let Err(e) = self.store.save(library.collections()) {
            tracing::warn!("failed to persist library snapshot: {e}");
        }
    }
}
