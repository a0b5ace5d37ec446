//! Local implementation of FileRepository

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use portal_core::entities::{FileContent, FileReference};
use portal_core::traits::{FileRepository, RepoResult};
use portal_core::value_objects::RecordId;

use crate::keys::FILE_KEY_PREFIX;
use crate::store::KeyValueStore;

use super::error::map_store_error;

/// Each file stored as a data URL under `chat_file_<id>`
pub struct LocalFileRepository<S: ?Sized = dyn KeyValueStore> {
    store: Arc<S>,
}

impl<S: KeyValueStore + ?Sized> LocalFileRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

fn file_key(id: &RecordId) -> String {
    format!("{FILE_KEY_PREFIX}{id}")
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> FileRepository for LocalFileRepository<S> {
    #[instrument(skip(self, content), fields(content_type = %content.content_type, size = content.len()))]
    async fn store(&self, id: &RecordId, content: &FileContent) -> RepoResult<FileReference> {
        self.store
            .set(&file_key(id), &content.to_data_url())
            .map_err(map_store_error)?;

        info!("File stored");
        Ok(FileReference::new(id.clone()))
    }

    #[instrument(skip(self), fields(file_id = %reference.file_id()))]
    async fn load(&self, reference: &FileReference) -> RepoResult<Option<FileContent>> {
        let key = file_key(reference.file_id());
        let Some(raw) = self.store.get(&key).map_err(map_store_error)? else {
            return Ok(None);
        };

        match FileContent::from_data_url(&raw) {
            Ok(content) => Ok(Some(content)),
            Err(e) => {
                warn!(key = %key, error = %e, "Ignoring unreadable stored file");
                Ok(None)
            }
        }
    }
}
