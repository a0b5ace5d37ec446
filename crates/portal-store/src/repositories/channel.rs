//! Local implementation of ChannelRepository

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

use portal_core::entities::{default_channels, Channel};
use portal_core::traits::{ChannelRepository, RepoResult};
use portal_core::value_objects::RecordId;

use crate::collection::JsonCollection;
use crate::keys::CHANNELS_KEY;
use crate::store::KeyValueStore;

use super::error::map_store_error;

/// Channels kept under `arcade_chat_channels`
pub struct LocalChannelRepository<S: ?Sized = dyn KeyValueStore> {
    channels: JsonCollection<Channel, S>,
}

impl<S: KeyValueStore + ?Sized> LocalChannelRepository<S> {
    /// Load the channel list, seeding the default channels when none exist
    pub fn open(store: Arc<S>) -> RepoResult<Self> {
        let channels: JsonCollection<Channel, S> =
            JsonCollection::open(store, CHANNELS_KEY).map_err(map_store_error)?;

        if channels.is_empty() {
            channels.mutate(|items| {
                items.extend(default_channels());
                Ok(())
            })?;
            info!(count = channels.len(), "Seeded default channels");
        }

        Ok(Self { channels })
    }
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> ChannelRepository for LocalChannelRepository<S> {
    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Channel>> {
        Ok(self.channels.snapshot())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Channel>> {
        Ok(self
            .channels
            .read(|channels| channels.iter().find(|c| &c.id == id).cloned()))
    }
}
