//! Local implementation of AnnouncementRepository

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

use portal_core::entities::Announcement;
use portal_core::traits::{AnnouncementRepository, RepoResult};

use crate::collection::JsonCollection;
use crate::keys::ANNOUNCEMENTS_KEY;
use crate::store::KeyValueStore;

use super::error::map_store_error;

/// Announcements kept newest first under `pixoul_announcements`
pub struct LocalAnnouncementRepository<S: ?Sized = dyn KeyValueStore> {
    announcements: JsonCollection<Announcement, S>,
}

impl<S: KeyValueStore + ?Sized> LocalAnnouncementRepository<S> {
    pub fn open(store: Arc<S>) -> RepoResult<Self> {
        Ok(Self {
            announcements: JsonCollection::open(store, ANNOUNCEMENTS_KEY)
                .map_err(map_store_error)?,
        })
    }
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> AnnouncementRepository for LocalAnnouncementRepository<S> {
    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Announcement>> {
        Ok(self.announcements.snapshot())
    }

    #[instrument(skip(self, announcement), fields(announcement_id = %announcement.id))]
    async fn create(&self, announcement: &Announcement) -> RepoResult<()> {
        self.announcements.mutate(|announcements| {
            announcements.insert(0, announcement.clone());
            Ok(())
        })?;

        info!(title = %announcement.title, "Announcement stored");
        Ok(())
    }
}
