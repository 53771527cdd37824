//! # Pictrail Engine
//!
//! The pure core of the Pictrail photo library.
//!
//! This crate owns the data model for photo collections and the logic that keeps a
//! device-local view consistent with a remote backend: mutation operations over the
//! live collection list, and a reconciliation merge between a freshly fetched remote
//! snapshot and previously persisted local state.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine never touches files or the network. Media materialization
//!   goes through the [`MediaSink`] trait supplied by the caller.
//! - **Publish whole lists**: every mutation computes a new collection list and
//!   replaces the old one wholesale, so observers can detect change by replacement.
//! - **Lenient by default**: operations on missing collections or photos are silent
//!   no-ops; a broken persisted snapshot reads back as an empty library.
//!
//! ## Core Concepts
//!
//! ### Photos
//!
//! A [`Photo`] is identified by its reference string (a device capture URI, a
//! materialized cache file, or an unresolved embedded ref) plus a server-assigned
//! numeric id (`0` until the server accepts it). A photo is captured unsynced, becomes
//! synced on confirmed upload or when it arrives in a remote listing, and deletion is
//! terminal.
//!
//! ### Collections
//!
//! A [`Collection`] is a titled grouping of photos with an optional cover reference.
//! The cover, when set, always points at a photo currently in the collection; removing
//! the cover photo promotes the first remaining photo, and an emptied collection loses
//! its cover.
//!
//! ### Reconciliation
//!
//! [`reconcile`] merges a remote snapshot with the local library: remote collections
//! win, locally captured photos that have not been uploaded yet are appended to their
//! matching remote collection (by id, falling back to title), and local-only
//! collections are carried forward so nothing the user created is silently lost.
//!
//! ## Persistence
//!
//! Use [`LibrarySnapshot`] to serialize the collection list to JSON and restore it on
//! the next launch. The snapshot format is versioned.

pub mod collection;
pub mod error;
pub mod library;
pub mod photo;
pub mod reconcile;
pub mod snapshot;

// Re-export main types at crate root
pub use collection::Collection;
pub use error::Error;
pub use library::Library;
pub use photo::Photo;
pub use reconcile::{reconcile, MediaRef, MediaSink, RemoteCollection, RemotePhoto};
pub use snapshot::{LibrarySnapshot, SNAPSHOT_FORMAT_VERSION};

/// Type aliases for clarity
pub type PhotoId = i64;
pub type CollectionId = i64;

/// Bucket that receives photos captured without an explicit collection.
pub const DEFAULT_COLLECTION: &str = "General";

/// Display title for a remote collection with no title and no titled photos.
pub const UNTITLED_COLLECTION: &str = "Untitled";
