//! Session service
//!
//! Handles sign-in, sign-out and reading the signed-in identity.

use tracing::{info, instrument, warn};
use validator::Validate;

use portal_common::AppError;
use portal_core::entities::Session;
use portal_core::DomainError;

use crate::dto::SignInRequest;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Session service
pub struct SessionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SessionService<'a> {
    /// Create a new SessionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Check credentials with the wired backend and persist the session.
    /// Nothing is persisted when the credentials do not match.
    #[instrument(skip(self, request), fields(identifier = %request.identifier))]
    pub async fn sign_in(&self, request: SignInRequest) -> ServiceResult<Session> {
        request
            .validate()
            .map_err(|_| ServiceError::App(AppError::InvalidCredentials))?;

        let session = self
            .ctx
            .credentials()
            .authenticate(&request.identifier, &request.secret)
            .await?
            .ok_or_else(|| {
                warn!(backend = self.ctx.credentials().name(), "Sign-in failed");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        self.ctx.session_repo().save(&session).await?;
        *self.ctx.current_session().write() = Some(session.clone());

        info!(session_id = %session.id, "Signed in");
        Ok(session)
    }

    /// Clear the persisted and in-memory session; signing out twice is fine
    #[instrument(skip(self))]
    pub async fn sign_out(&self) -> ServiceResult<()> {
        *self.ctx.current_session().write() = None;
        self.ctx.session_repo().clear().await?;

        info!("Signed out");
        Ok(())
    }

    /// The signed-in identity, if any. Unreadable session data is discarded
    /// and reported as signed out.
    #[instrument(skip(self))]
    pub async fn current_session(&self) -> Option<Session> {
        let cached = self.ctx.current_session().read().clone();
        if cached.is_some() {
            return cached;
        }

        match self.ctx.session_repo().load().await {
            Ok(session) => {
                self.ctx.current_session().write().clone_from(&session);
                session
            }
            Err(DomainError::CorruptState { key, reason }) => {
                warn!(key = %key, reason = %reason, "Discarding unreadable session");
                if let Err(e) = self.ctx.session_repo().clear().await {
                    warn!(error = %e, "Failed to clear unreadable session");
                }
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to read session");
                None
            }
        }
    }

    /// The signed-in identity, or `NotSignedIn`
    pub async fn require_session(&self) -> ServiceResult<Session> {
        self.current_session()
            .await
            .ok_or(ServiceError::App(AppError::NotSignedIn))
    }
}
