//! Chat service
//!
//! Handles channels, channel and direct messages, message listeners and
//! stored attachments.

use tracing::{debug, info, instrument, warn};
use validator::Validate;

use portal_core::entities::{Channel, FileContent, FileReference, Message, MessageTarget, Session};
use portal_core::{DomainError, PortalEvent, RecordId};
use portal_realtime::Subscription;

use crate::dto::SendMessageRequest;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Chat service
pub struct ChatService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChatService<'a> {
    /// Create a new ChatService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // === Channels ===

    /// Every channel, seeded with the defaults on first use
    #[instrument(skip(self))]
    pub async fn channels(&self) -> ServiceResult<Vec<Channel>> {
        Ok(self.ctx.channel_repo().list().await?)
    }

    #[instrument(skip(self))]
    pub async fn channel(&self, id: &RecordId) -> ServiceResult<Option<Channel>> {
        Ok(self.ctx.channel_repo().find_by_id(id).await?)
    }

    // === Messages ===

    /// Post a message as `sender`. Listeners hear about it after the
    /// configured delay, never before this returns.
    #[instrument(skip(self, sender, request), fields(sender_id = %sender.id))]
    pub async fn send_message(
        &self,
        sender: &Session,
        request: SendMessageRequest,
    ) -> ServiceResult<Message> {
        request.validate()?;

        match &request.target {
            MessageTarget::Channel { channel_id } => {
                if self
                    .ctx
                    .channel_repo()
                    .find_by_id(channel_id)
                    .await?
                    .is_none()
                {
                    return Err(DomainError::ChannelNotFound(channel_id.clone()).into());
                }
            }
            MessageTarget::Direct { recipient_id } => {
                if recipient_id.is_empty() {
                    return Err(ServiceError::validation("Recipient is required"));
                }
            }
        }

        let mut message = Message::new(
            self.ctx.generate_id(),
            sender.id.clone(),
            sender.full_name.clone(),
            request.message,
            request.target,
        );
        message.file_url = request.file_url;
        message.file_type = request.file_type;
        message.is_emergency = request.is_emergency;

        self.ctx.message_repo().create(&message).await?;

        info!(
            message_id = %message.id,
            direct = message.is_direct(),
            emergency = message.is_emergency,
            "Message sent"
        );
        self.ctx.publish(PortalEvent::MessageSent(message.clone()));

        Ok(message)
    }

    /// Messages of one channel, oldest first
    #[instrument(skip(self))]
    pub async fn channel_messages(&self, channel_id: &RecordId) -> ServiceResult<Vec<Message>> {
        Ok(self.ctx.message_repo().find_by_channel(channel_id).await?)
    }

    /// Conversation between two people in either direction, oldest first
    #[instrument(skip(self))]
    pub async fn direct_messages(&self, a: &RecordId, b: &RecordId) -> ServiceResult<Vec<Message>> {
        Ok(self.ctx.message_repo().find_direct(a, b).await?)
    }

    /// Call `listener` for every message sent from now on, until the
    /// returned subscription is dropped or unsubscribed
    pub fn add_listener<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Message) + Send + Sync + 'static,
    {
        self.ctx.subscribe(move |event| {
            if let Some(message) = event.as_message() {
                listener(message);
            }
        })
    }

    // === Files ===

    /// Store an attachment and return the reference to put in `file_url`
    #[instrument(skip(self, content), fields(content_type = %content.content_type, size = content.len()))]
    pub async fn store_file(&self, content: &FileContent) -> ServiceResult<FileReference> {
        let id = self.ctx.generate_id();
        let reference = self.ctx.file_repo().store(&id, content).await?;

        info!(reference = %reference, "File stored");
        Ok(reference)
    }

    /// Content behind a `file_url`; `None` for references to anything other
    /// than a stored file, or when the blob is gone
    #[instrument(skip(self))]
    pub async fn get_file(&self, file_url: &str) -> ServiceResult<Option<FileContent>> {
        let Some(reference) = FileReference::parse(file_url) else {
            debug!("Not a stored file reference");
            return Ok(None);
        };

        let content = self.ctx.file_repo().load(&reference).await?;
        if content.is_none() {
            warn!(reference = %reference, "Stored file is missing");
        }
        Ok(content)
    }

    /// Stored file as a `data:` URL
    pub async fn get_file_url(&self, file_url: &str) -> ServiceResult<Option<String>> {
        Ok(self
            .get_file(file_url)
            .await?
            .map(|content| content.to_data_url()))
    }
}
