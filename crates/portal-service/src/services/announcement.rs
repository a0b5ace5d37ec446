//! Announcement service

use tracing::{info, instrument};
use validator::Validate;

use portal_core::entities::Announcement;
use portal_core::PortalEvent;

use crate::dto::PostAnnouncementRequest;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Announcement service
pub struct AnnouncementService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AnnouncementService<'a> {
    /// Create a new AnnouncementService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Publish an announcement to all staff
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn post(
        &self,
        request: PostAnnouncementRequest,
        author_name: &str,
    ) -> ServiceResult<Announcement> {
        request.validate()?;

        let announcement = Announcement::new(
            self.ctx.generate_id(),
            request.title,
            request.message,
            request.image_url,
            author_name.to_string(),
        );
        self.ctx.announcement_repo().create(&announcement).await?;

        info!(announcement_id = %announcement.id, "Announcement posted");
        self.ctx
            .publish(PortalEvent::AnnouncementPosted(announcement.clone()));

        Ok(announcement)
    }

    /// Announcements, newest first
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<Announcement>> {
        Ok(self.ctx.announcement_repo().list().await?)
    }
}
