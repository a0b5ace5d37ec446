//! Test helpers for integration tests
//!
//! Builds service contexts over fresh stores and manages on-disk data
//! directories.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use portal_service::{ServiceContext, SharedPassphrase};
use portal_store::{FileStore, KeyValueStore, MemoryStore};

/// Delivery delay used by every test context
pub const TEST_DELAY: Duration = Duration::from_millis(10);

/// Passphrase accepted by test contexts
pub const TEST_PASSPHRASE: &str = "pixoul";

/// Context over a fresh in-memory store
pub fn memory_context() -> Result<ServiceContext> {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    context_over(store)
}

/// Context over an existing store, so several contexts can share one
pub fn context_over(store: Arc<dyn KeyValueStore>) -> Result<ServiceContext> {
    Ok(ServiceContext::local(
        store,
        Arc::new(SharedPassphrase::new(TEST_PASSPHRASE)),
        TEST_DELAY,
    )?)
}

/// Let pending listener deliveries run
pub async fn flush(ctx: &ServiceContext) {
    ctx.flush_events().await;
}

/// Data directory under the system temp dir, removed on drop
pub struct TestDataDir {
    root: PathBuf,
}

impl TestDataDir {
    pub fn new() -> Self {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let root = std::env::temp_dir().join(format!(
            "portal-integration-{}-{}",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::SeqCst)
        ));
        Self { root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// A new context reading and writing this directory
    pub fn context(&self) -> Result<ServiceContext> {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&self.root)?);
        context_over(store)
    }
}

impl Default for TestDataDir {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TestDataDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}
