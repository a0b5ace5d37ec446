//! # portal-realtime
//!
//! Simulated real-time updates for the local backend.
//!
//! ## Features
//!
//! - **Listener registry**: callbacks keyed by subscription token, notified in
//!   registration order over a snapshot
//! - **Subscriptions**: handles that remove their listener on `unsubscribe` or drop
//! - **Dispatcher**: a background task that delivers each published event after
//!   a fixed delay, in publish order
//!
//! ## Example
//!
//! ```ignore
//! use portal_realtime::{EventDispatcher, ListenerRegistry, DEFAULT_DELAY};
//!
//! let dispatcher = EventDispatcher::spawn(ListenerRegistry::new(), DEFAULT_DELAY)?;
//! let subscription = dispatcher.subscribe(|event: &String| println!("{event}"));
//! dispatcher.publish("hello".to_string())?;
//! ```

pub mod dispatcher;
pub mod registry;

pub use dispatcher::{DispatchError, EventDispatcher, DEFAULT_DELAY};
pub use registry::{ListenerRegistry, Subscription};
