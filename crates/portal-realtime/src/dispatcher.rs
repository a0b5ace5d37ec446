//! Event dispatcher
//!
//! Delivers published events to a [`ListenerRegistry`] from one background
//! task. Every event is held until `published_at + delay`; with a fixed delay
//! the delivery instants are non-decreasing, so a single FIFO consumer keeps
//! publish order.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, Notify};
use tokio::time::Instant;

use crate::registry::{ListenerRegistry, Subscription};

/// Delay applied when none is configured
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// Dispatcher errors
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("No Tokio runtime available to run the dispatcher")]
    NoRuntime,

    #[error("Dispatcher task has stopped")]
    Closed,
}

struct Pending<E> {
    sequence: u64,
    deliver_at: Instant,
    event: E,
}

/// Counters shared with the background task
#[derive(Default)]
struct Progress {
    in_flight: AtomicUsize,
    delivered: AtomicU64,
    idle: Notify,
}

/// Deferred fan-out of events to registered listeners
pub struct EventDispatcher<E> {
    tx: mpsc::UnboundedSender<Pending<E>>,
    registry: ListenerRegistry<E>,
    delay: Duration,
    sequence: AtomicU64,
    progress: Arc<Progress>,
}

impl<E: Send + Sync + 'static> EventDispatcher<E> {
    /// Start the dispatcher task on the current Tokio runtime.
    ///
    /// The task runs until the dispatcher is dropped and every queued event
    /// has been delivered.
    pub fn spawn(registry: ListenerRegistry<E>, delay: Duration) -> Result<Self, DispatchError> {
        let handle = Handle::try_current().map_err(|_| DispatchError::NoRuntime)?;
        let (tx, rx) = mpsc::unbounded_channel();
        let progress = Arc::new(Progress::default());

        handle.spawn(Self::run(rx, registry.clone(), Arc::clone(&progress)));
        tracing::info!(delay_ms = delay.as_millis() as u64, "Event dispatcher started");

        Ok(Self {
            tx,
            registry,
            delay,
            sequence: AtomicU64::new(0),
            progress,
        })
    }

    /// Dispatcher loop: wait for each event's delivery instant, then fan out
    async fn run(
        mut rx: mpsc::UnboundedReceiver<Pending<E>>,
        registry: ListenerRegistry<E>,
        progress: Arc<Progress>,
    ) {
        while let Some(pending) = rx.recv().await {
            tokio::time::sleep_until(pending.deliver_at).await;

            let listeners = registry.notify(&pending.event);
            progress.delivered.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(sequence = pending.sequence, listeners, "Event dispatched");

            if progress.in_flight.fetch_sub(1, Ordering::AcqRel) == 1 {
                progress.idle.notify_waiters();
            }
        }

        tracing::info!("Event dispatcher loop ended");
    }

    /// Queue `event` for delivery after the configured delay and return its
    /// sequence number. Never calls a listener before returning.
    pub fn publish(&self, event: E) -> Result<u64, DispatchError> {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let pending = Pending {
            sequence,
            deliver_at: Instant::now() + self.delay,
            event,
        };

        self.progress.in_flight.fetch_add(1, Ordering::AcqRel);
        if self.tx.send(pending).is_err() {
            self.progress.in_flight.fetch_sub(1, Ordering::AcqRel);
            return Err(DispatchError::Closed);
        }
        Ok(sequence)
    }

    /// Register a listener on the underlying registry
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.registry.subscribe(listener)
    }

    pub fn registry(&self) -> &ListenerRegistry<E> {
        &self.registry
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of events whose listeners have run
    pub fn delivered(&self) -> u64 {
        self.progress.delivered.load(Ordering::Relaxed)
    }

    /// Wait until every event published so far has been delivered
    pub async fn flush(&self) {
        loop {
            let idle = self.progress.idle.notified();
            if self.progress.in_flight.load(Ordering::Acquire) == 0 {
                return;
            }
            idle.await;
        }
    }
}
