//! # portal-service
//!
//! Application layer containing the portal use cases, request DTOs and the
//! notification bridge.

pub mod dto;
pub mod services;

pub use services::{
    AlertKind, AnnouncementService, ChatService, CredentialBackend, NotificationCenter,
    ReportService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    SessionService, SharedPassphrase, ShiftService, StaffDirectory,
};
