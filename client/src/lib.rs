//! # Pictrail Client
//!
//! Client-side orchestration for the Pictrail photo library: talks to the backend
//! over HTTP, persists the library snapshot to disk, materializes embedded remote
//! images into a local cache, and serializes every change to the live collection
//! view through a single [`Session`].
//!
//! The merge and mutation logic itself lives in `pictrail-engine`; this crate owns
//! the IO around it.

pub mod api;
pub mod config;
pub mod error;
pub mod media;
pub mod session;
pub mod store;

pub use api::{HttpApi, RemoteApi, RemoteCollectionSummary, RemotePhotoRow};
pub use config::{Config, ConfigError};
pub use error::ClientError;
pub use media::MediaCache;
pub use session::Session;
pub use store::FileStore;
