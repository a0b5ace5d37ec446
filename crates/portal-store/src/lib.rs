//! # portal-store
//!
//! Storage layer implementing the portal-core repository traits on top of a
//! string key-value store.
//!
//! ## Overview
//!
//! - [`MemoryStore`] and [`FileStore`] backends behind [`KeyValueStore`]
//! - [`JsonCollection`], an in-memory JSON array mirrored to one key
//! - Local repositories, one per storage key
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use portal_store::{FileStore, LocalShiftRepository};
//!
//! let store = Arc::new(FileStore::open("./portal-data")?);
//! let shifts = LocalShiftRepository::open(store)?;
//! ```

pub mod collection;
pub mod keys;
pub mod repositories;
pub mod store;

// Re-export commonly used types
pub use collection::JsonCollection;
pub use repositories::{
    map_store_error, LocalAnnouncementRepository, LocalChannelRepository, LocalFileRepository,
    LocalMessageRepository, LocalReportRepository, LocalSessionRepository, LocalShiftRepository,
};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError, StoreResult};
