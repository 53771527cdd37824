//! Media cache - materializes embedded image data to local files.
//!
//! Files are keyed by photo id, so reconciling the same remote listing twice never
//! decodes or writes the same image again.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use pictrail_engine::{Error, MediaSink, Photo, PhotoId};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File-backed implementation of the engine's [`MediaSink`].
#[derive(Debug)]
pub struct MediaCache {
    dir: PathBuf,
}

impl MediaCache {
    /// Open (and create if needed) a cache rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, id: PhotoId) -> PathBuf {
        self.dir.join(format!("photo_{id}.jpg"))
    }

    /// Delete the materialized file for a photo, if this cache owns one.
    ///
    /// Failure to remove is logged and swallowed; the library state must not depend
    /// on it.
    pub fn remove_for(&self, photo: &Photo) {
        if !self.is_materialized(&photo.uri) {
            return;
        }
        if let Err(e) = fs::remove_file(&photo.uri) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::debug!("failed to remove cached media {}: {e}", photo.uri);
            }
        }
    }
}

impl MediaSink for MediaCache {
    fn materialize(&mut self, id: PhotoId, data: &str) -> pictrail_engine::error::Result<String> {
        let path = self.path_for(id);
        if !path.exists() {
            let bytes = STANDARD
                .decode(data.trim())
                .map_err(|e| Error::MediaMaterialize {
                    id,
                    reason: e.to_string(),
                })?;
            fs::write(&path, bytes).map_err(|e| Error::MediaMaterialize {
                id,
                reason: e.to_string(),
            })?;
        }
        Ok(path.to_string_lossy().into_owned())
    }

    fn is_materialized(&self, uri: &str) -> bool {
        Path::new(uri).starts_with(&self.dir)
    }
}
