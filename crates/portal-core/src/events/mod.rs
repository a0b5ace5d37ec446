//! Domain events published by the service layer

mod domain_event;

pub use domain_event::PortalEvent;
