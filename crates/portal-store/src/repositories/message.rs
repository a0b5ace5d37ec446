//! Local implementation of MessageRepository

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

use portal_core::entities::Message;
use portal_core::traits::{MessageRepository, RepoResult};
use portal_core::value_objects::RecordId;

use crate::collection::JsonCollection;
use crate::keys::MESSAGES_KEY;
use crate::store::KeyValueStore;

use super::error::map_store_error;

/// Messages kept under `arcade_chat_messages`, in send order
pub struct LocalMessageRepository<S: ?Sized = dyn KeyValueStore> {
    messages: JsonCollection<Message, S>,
}

impl<S: KeyValueStore + ?Sized> LocalMessageRepository<S> {
    pub fn open(store: Arc<S>) -> RepoResult<Self> {
        Ok(Self {
            messages: JsonCollection::open(store, MESSAGES_KEY).map_err(map_store_error)?,
        })
    }

    /// Matching messages ordered by `created_at`; the sort is stable so
    /// equal timestamps keep insertion order
    fn select(&self, predicate: impl Fn(&Message) -> bool) -> Vec<Message> {
        let mut selected: Vec<Message> = self.messages.read(|messages| {
            messages.iter().filter(|&m| predicate(m)).cloned().collect()
        });
        selected.sort_by_key(|m| m.created_at);
        selected
    }
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> MessageRepository for LocalMessageRepository<S> {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Message>> {
        Ok(self
            .messages
            .read(|messages| messages.iter().find(|m| &m.id == id).cloned()))
    }

    #[instrument(skip(self))]
    async fn find_by_channel(&self, channel_id: &RecordId) -> RepoResult<Vec<Message>> {
        Ok(self.select(|m| m.channel_id() == Some(channel_id)))
    }

    #[instrument(skip(self))]
    async fn find_direct(&self, a: &RecordId, b: &RecordId) -> RepoResult<Vec<Message>> {
        Ok(self.select(|m| m.is_between(a, b)))
    }

    #[instrument(skip(self, message), fields(message_id = %message.id, sender = %message.sender_id))]
    async fn create(&self, message: &Message) -> RepoResult<()> {
        self.messages.mutate(|messages| {
            messages.push(message.clone());
            Ok(())
        })?;

        info!(direct = message.is_direct(), "Message stored");
        Ok(())
    }

    async fn count(&self) -> RepoResult<usize> {
        Ok(self.messages.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::{Duration, TimeZone, Utc};
    use portal_core::entities::MessageTarget;

    fn message(id: &str, from: &str, target: MessageTarget, offset_secs: i64) -> Message {
        let mut msg = Message::new(
            RecordId::new(id),
            RecordId::new(from),
            format!("user {from}"),
            format!("message {id}"),
            target,
        );
        msg.created_at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
            + Duration::seconds(offset_secs);
        msg
    }

    fn ids(messages: &[Message]) -> Vec<&str> {
        messages.iter().map(|m| m.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_channel_messages_sorted_with_stable_ties() {
        let repo = LocalMessageRepository::open(Arc::new(MemoryStore::new())).unwrap();

        repo.create(&message("late", "1", MessageTarget::channel("1"), 30))
            .await
            .unwrap();
        repo.create(&message("tie-a", "2", MessageTarget::channel("1"), 10))
            .await
            .unwrap();
        repo.create(&message("tie-b", "1", MessageTarget::channel("1"), 10))
            .await
            .unwrap();
        repo.create(&message("other", "1", MessageTarget::channel("2"), 0))
            .await
            .unwrap();
        repo.create(&message("dm", "1", MessageTarget::direct("2"), 0))
            .await
            .unwrap();

        let general = repo.find_by_channel(&RecordId::new("1")).await.unwrap();
        assert_eq!(ids(&general), ["tie-a", "tie-b", "late"]);
        assert_eq!(repo.count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_direct_messages_symmetric() {
        let repo = LocalMessageRepository::open(Arc::new(MemoryStore::new())).unwrap();

        repo.create(&message("m1", "1", MessageTarget::direct("2"), 0))
            .await
            .unwrap();
        repo.create(&message("m2", "2", MessageTarget::direct("1"), 5))
            .await
            .unwrap();
        repo.create(&message("m3", "1", MessageTarget::direct("3"), 10))
            .await
            .unwrap();
        repo.create(&message("m4", "1", MessageTarget::channel("2"), 15))
            .await
            .unwrap();

        let (a, b) = (RecordId::new("1"), RecordId::new("2"));
        let forward = repo.find_direct(&a, &b).await.unwrap();
        let backward = repo.find_direct(&b, &a).await.unwrap();
        assert_eq!(ids(&forward), ["m1", "m2"]);
        assert_eq!(forward, backward);
    }

    #[tokio::test]
    async fn test_reload_identical() {
        let store = Arc::new(MemoryStore::new());
        let repo = LocalMessageRepository::open(Arc::clone(&store)).unwrap();

        let mut with_file = message("m1", "1", MessageTarget::channel("4"), 0);
        with_file.file_url = Some("local_file_abc".to_string());
        with_file.file_type = Some("image/png".to_string());
        with_file.is_emergency = true;
        repo.create(&with_file).await.unwrap();

        let reopened = LocalMessageRepository::open(store).unwrap();
        assert_eq!(
            reopened.find_by_id(&RecordId::new("m1")).await.unwrap(),
            Some(with_file)
        );
    }
}
