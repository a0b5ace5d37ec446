//! Service context - dependency container for services
//!
//! Holds all repositories, the credential backend, the event dispatcher and
//! the in-memory session state needed by services.

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use portal_common::{AppConfig, AppError, AuthMode, StorageBackend};
use portal_core::entities::Session;
use portal_core::traits::{
    AnnouncementRepository, ChannelRepository, FileRepository, MessageRepository, ReportRepository,
    SessionRepository, ShiftRepository,
};
use portal_core::{IdGenerator, PortalEvent, RecordId};
use portal_realtime::{EventDispatcher, ListenerRegistry, Subscription, DEFAULT_DELAY};
use portal_store::{
    map_store_error, FileStore, KeyValueStore, LocalAnnouncementRepository, LocalChannelRepository,
    LocalFileRepository, LocalMessageRepository, LocalReportRepository, LocalSessionRepository,
    LocalShiftRepository, MemoryStore,
};

use super::credentials::{CredentialBackend, SharedPassphrase, StaffDirectory};
use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Built once per process and passed by reference to the short-lived
/// service structs. Cloning shares every dependency.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    session_repo: Arc<dyn SessionRepository>,
    shift_repo: Arc<dyn ShiftRepository>,
    channel_repo: Arc<dyn ChannelRepository>,
    message_repo: Arc<dyn MessageRepository>,
    file_repo: Arc<dyn FileRepository>,
    report_repo: Arc<dyn ReportRepository>,
    announcement_repo: Arc<dyn AnnouncementRepository>,

    // Auth
    credentials: Arc<dyn CredentialBackend>,
    current_session: Arc<RwLock<Option<Session>>>,

    // Events
    dispatcher: Arc<EventDispatcher<PortalEvent>>,

    id_generator: Arc<IdGenerator>,
}

impl ServiceContext {
    /// Every repository backed by one key-value store
    pub fn local(
        store: Arc<dyn KeyValueStore>,
        credentials: Arc<dyn CredentialBackend>,
        notify_delay: Duration,
    ) -> ServiceResult<Self> {
        ServiceContextBuilder::new()
            .session_repo(Arc::new(LocalSessionRepository::new(Arc::clone(&store))))
            .shift_repo(Arc::new(LocalShiftRepository::open(Arc::clone(&store))?))
            .channel_repo(Arc::new(LocalChannelRepository::open(Arc::clone(&store))?))
            .message_repo(Arc::new(LocalMessageRepository::open(Arc::clone(&store))?))
            .file_repo(Arc::new(LocalFileRepository::new(Arc::clone(&store))))
            .report_repo(Arc::new(LocalReportRepository::open(Arc::clone(&store))?))
            .announcement_repo(Arc::new(LocalAnnouncementRepository::open(store)?))
            .credentials(credentials)
            .notify_delay(notify_delay)
            .build()
    }

    /// Storage backend, credential backend and delivery delay from configuration
    pub fn from_config(config: &AppConfig) -> ServiceResult<Self> {
        let store: Arc<dyn KeyValueStore> = match config.storage.backend {
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::File => {
                Arc::new(FileStore::open(config.storage.data_dir.clone()).map_err(map_store_error)?)
            }
        };

        let credentials: Arc<dyn CredentialBackend> = match config.auth.mode {
            AuthMode::Directory => Arc::new(StaffDirectory::seeded()?),
            AuthMode::Passphrase => {
                let passphrase = config.auth.passphrase.clone().ok_or_else(|| {
                    AppError::Config("PORTAL_PASSPHRASE is required in passphrase mode".into())
                })?;
                Arc::new(SharedPassphrase::new(passphrase))
            }
        };

        info!(
            storage = ?config.storage.backend,
            auth = credentials.name(),
            "Building service context"
        );

        Self::local(store, credentials, config.notify.delay())
    }

    // === Repositories ===

    /// Get the session repository
    pub fn session_repo(&self) -> &dyn SessionRepository {
        self.session_repo.as_ref()
    }

    /// Get the shift repository
    pub fn shift_repo(&self) -> &dyn ShiftRepository {
        self.shift_repo.as_ref()
    }

    /// Get the channel repository
    pub fn channel_repo(&self) -> &dyn ChannelRepository {
        self.channel_repo.as_ref()
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    /// Get the file repository
    pub fn file_repo(&self) -> &dyn FileRepository {
        self.file_repo.as_ref()
    }

    /// Get the maintenance report repository
    pub fn report_repo(&self) -> &dyn ReportRepository {
        self.report_repo.as_ref()
    }

    /// Get the announcement repository
    pub fn announcement_repo(&self) -> &dyn AnnouncementRepository {
        self.announcement_repo.as_ref()
    }

    // === Auth ===

    pub fn credentials(&self) -> &dyn CredentialBackend {
        self.credentials.as_ref()
    }

    /// Signed-in identity held in memory for this process
    pub(crate) fn current_session(&self) -> &RwLock<Option<Session>> {
        &self.current_session
    }

    // === Events ===

    pub fn dispatcher(&self) -> &EventDispatcher<PortalEvent> {
        self.dispatcher.as_ref()
    }

    /// Queue an event for listeners. The mutation it reports has already been
    /// persisted, so a stopped dispatcher is logged rather than returned.
    pub fn publish(&self, event: PortalEvent) {
        let event_type = event.event_type();
        if let Err(e) = self.dispatcher.publish(event) {
            warn!(event_type, error = %e, "Failed to publish event");
        }
    }

    /// Listen to every portal event
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&PortalEvent) + Send + Sync + 'static,
    {
        self.dispatcher.subscribe(listener)
    }

    /// Wait until every published event has reached its listeners
    pub async fn flush_events(&self) {
        self.dispatcher.flush().await;
    }

    // === Ids ===

    /// Generate a new record id
    pub fn generate_id(&self) -> RecordId {
        self.id_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("credentials", &self.credentials.name())
            .field("notify_delay", &self.dispatcher.delay())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    session_repo: Option<Arc<dyn SessionRepository>>,
    shift_repo: Option<Arc<dyn ShiftRepository>>,
    channel_repo: Option<Arc<dyn ChannelRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    file_repo: Option<Arc<dyn FileRepository>>,
    report_repo: Option<Arc<dyn ReportRepository>>,
    announcement_repo: Option<Arc<dyn AnnouncementRepository>>,
    credentials: Option<Arc<dyn CredentialBackend>>,
    dispatcher: Option<Arc<EventDispatcher<PortalEvent>>>,
    notify_delay: Duration,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            session_repo: None,
            shift_repo: None,
            channel_repo: None,
            message_repo: None,
            file_repo: None,
            report_repo: None,
            announcement_repo: None,
            credentials: None,
            dispatcher: None,
            notify_delay: DEFAULT_DELAY,
        }
    }

    pub fn session_repo(mut self, repo: Arc<dyn SessionRepository>) -> Self {
        self.session_repo = Some(repo);
        self
    }

    pub fn shift_repo(mut self, repo: Arc<dyn ShiftRepository>) -> Self {
        self.shift_repo = Some(repo);
        self
    }

    pub fn channel_repo(mut self, repo: Arc<dyn ChannelRepository>) -> Self {
        self.channel_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn file_repo(mut self, repo: Arc<dyn FileRepository>) -> Self {
        self.file_repo = Some(repo);
        self
    }

    pub fn report_repo(mut self, repo: Arc<dyn ReportRepository>) -> Self {
        self.report_repo = Some(repo);
        self
    }

    pub fn announcement_repo(mut self, repo: Arc<dyn AnnouncementRepository>) -> Self {
        self.announcement_repo = Some(repo);
        self
    }

    pub fn credentials(mut self, backend: Arc<dyn CredentialBackend>) -> Self {
        self.credentials = Some(backend);
        self
    }

    /// Share an already running dispatcher instead of starting one
    pub fn dispatcher(mut self, dispatcher: Arc<EventDispatcher<PortalEvent>>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Delay between a mutation and its notification; ignored when a
    /// dispatcher is supplied
    pub fn notify_delay(mut self, delay: Duration) -> Self {
        self.notify_delay = delay;
        self
    }

    /// Build the ServiceContext
    ///
    /// Starts the event dispatcher when none was supplied, which needs a
    /// running Tokio runtime.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let dispatcher = match self.dispatcher {
            Some(dispatcher) => dispatcher,
            None => Arc::new(EventDispatcher::spawn(
                ListenerRegistry::new(),
                self.notify_delay,
            )?),
        };

        Ok(ServiceContext {
            session_repo: required(self.session_repo, "session_repo")?,
            shift_repo: required(self.shift_repo, "shift_repo")?,
            channel_repo: required(self.channel_repo, "channel_repo")?,
            message_repo: required(self.message_repo, "message_repo")?,
            file_repo: required(self.file_repo, "file_repo")?,
            report_repo: required(self.report_repo, "report_repo")?,
            announcement_repo: required(self.announcement_repo, "announcement_repo")?,
            credentials: required(self.credentials, "credentials")?,
            current_session: Arc::new(RwLock::new(None)),
            dispatcher,
            id_generator: Arc::new(IdGenerator::new()),
        })
    }
}

fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
    value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
