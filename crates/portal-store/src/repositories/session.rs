//! Local implementation of SessionRepository

use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use portal_core::entities::Session;
use portal_core::traits::{RepoResult, SessionRepository};

use crate::keys::SESSION_KEY;
use crate::store::KeyValueStore;

use super::error::{corrupt_state, map_store_error};

/// Session persisted as one JSON document under `staff_auth`
pub struct LocalSessionRepository<S: ?Sized = dyn KeyValueStore> {
    store: Arc<S>,
}

impl<S: KeyValueStore + ?Sized> LocalSessionRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> SessionRepository for LocalSessionRepository<S> {
    #[instrument(skip(self))]
    async fn load(&self) -> RepoResult<Option<Session>> {
        let Some(raw) = self.store.get(SESSION_KEY).map_err(map_store_error)? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| corrupt_state(SESSION_KEY, &e))
    }

    #[instrument(skip(self, session), fields(session_id = %session.id))]
    async fn save(&self, session: &Session) -> RepoResult<()> {
        let raw = serde_json::to_string(session).map_err(|e| map_store_error(e.into()))?;
        self.store.set(SESSION_KEY, &raw).map_err(map_store_error)
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> RepoResult<()> {
        self.store.remove(SESSION_KEY).map_err(map_store_error)
    }
}
