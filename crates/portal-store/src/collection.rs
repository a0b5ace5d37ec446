//! JSON array kept in memory and mirrored to one storage key
//!
//! Mutations run against a copy of the current items. The copy is persisted
//! and only then swapped in, so a rejected mutation or a failed write leaves
//! the collection exactly as it was.

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use portal_core::RepoResult;

use crate::repositories::map_store_error;
use crate::store::{KeyValueStore, StoreResult};

/// In-memory collection persisted as a JSON array
pub struct JsonCollection<T, S: ?Sized = dyn KeyValueStore> {
    store: Arc<S>,
    key: &'static str,
    items: RwLock<Vec<T>>,
}

impl<T, S> JsonCollection<T, S>
where
    T: Serialize + DeserializeOwned + Clone,
    S: KeyValueStore + ?Sized,
{
    /// Load the collection stored under `key`.
    ///
    /// Data that does not parse is logged, discarded, and replaced by an empty
    /// collection. Read failures from the backend are returned.
    pub fn open(store: Arc<S>, key: &'static str) -> StoreResult<Self> {
        let items = match store.get(key)? {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<T>>(&raw) {
                Ok(items) => items,
                Err(e) => {
                    warn!(key, error = %e, "Discarding corrupt collection");
                    if let Err(e) = store.remove(key) {
                        warn!(key, error = %e, "Failed to remove corrupt collection");
                    }
                    Vec::new()
                }
            },
        };

        debug!(key, count = items.len(), "Collection loaded");

        Ok(Self {
            store,
            key,
            items: RwLock::new(items),
        })
    }

    /// Storage key backing this collection
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Copy of every item, in stored order
    pub fn snapshot(&self) -> Vec<T> {
        self.items.read().clone()
    }

    /// Run `f` against the current items without copying them
    pub fn read<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.items.read())
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Apply `f` to a copy of the items, persist the result, then publish it.
    ///
    /// Nothing changes when `f` returns an error or the write fails.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut Vec<T>) -> RepoResult<R>) -> RepoResult<R> {
        let mut items = self.items.write();
        let mut next = items.clone();

        let result = f(&mut next)?;

        let raw = serde_json::to_string(&next).map_err(|e| map_store_error(e.into()))?;
        self.store.set(self.key, &raw).map_err(map_store_error)?;

        *items = next;
        Ok(result)
    }
}
