//! Credential backends
//!
//! The session service asks one wired backend whether an identifier/secret
//! pair is valid. Which backend is wired is deployment configuration.

use async_trait::async_trait;
use tracing::{debug, instrument};

use portal_common::PasswordService;
use portal_core::entities::{Session, StaffAccount};
use portal_core::RecordId;

use super::error::ServiceResult;

/// Checks sign-in credentials
#[async_trait]
pub trait CredentialBackend: Send + Sync {
    /// The session to start for a matching pair, `None` when nothing matches
    async fn authenticate(&self, identifier: &str, secret: &str) -> ServiceResult<Option<Session>>;

    /// Short backend name for logs
    fn name(&self) -> &'static str;
}

// ============================================================================
// Staff Directory
// ============================================================================

/// Per-user credentials with Argon2 password hashes
pub struct StaffDirectory {
    accounts: Vec<StaffAccount>,
    passwords: PasswordService,
}

impl StaffDirectory {
    pub fn new() -> Self {
        Self {
            accounts: Vec::new(),
            passwords: PasswordService::new(),
        }
    }

    /// The portal's AI-department staff
    pub fn seeded() -> ServiceResult<Self> {
        Self::new()
            .with_account("1", "Fatima123", "Pixoul123", "Fatima Samer", Some("AI"))?
            .with_account("2", "Hala123", "Hala_Pixoul", "Hala Samer", Some("AI"))?
            .with_account("3", "Aliya123", "Aliya_Pixoul", "Aliya Haidar", Some("AI"))
    }

    /// Add an account, hashing its password
    pub fn with_account(
        mut self,
        id: &str,
        username: &str,
        password: &str,
        full_name: &str,
        department: Option<&str>,
    ) -> ServiceResult<Self> {
        let password_hash = self.passwords.hash(password)?;
        self.accounts.push(StaffAccount {
            id: RecordId::new(id),
            username: username.to_string(),
            full_name: full_name.to_string(),
            department: department.map(str::to_string),
            password_hash,
        });
        Ok(self)
    }

    pub fn accounts(&self) -> &[StaffAccount] {
        &self.accounts
    }

    pub fn find(&self, username: &str) -> Option<&StaffAccount> {
        self.accounts.iter().find(|a| a.username == username)
    }
}

impl Default for StaffDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialBackend for StaffDirectory {
    #[instrument(skip(self, secret))]
    async fn authenticate(&self, identifier: &str, secret: &str) -> ServiceResult<Option<Session>> {
        let Some(account) = self.find(identifier) else {
            debug!("No staff account with this username");
            return Ok(None);
        };

        if self.passwords.verify(secret, &account.password_hash)? {
            Ok(Some(account.session()))
        } else {
            Ok(None)
        }
    }

    fn name(&self) -> &'static str {
        "directory"
    }
}

// ============================================================================
// Shared Passphrase
// ============================================================================

/// One passphrase for every staff member; the identifier is their full name
pub struct SharedPassphrase {
    passphrase: String,
}

impl SharedPassphrase {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
        }
    }
}

#[async_trait]
impl CredentialBackend for SharedPassphrase {
    #[instrument(skip(self, secret))]
    async fn authenticate(&self, identifier: &str, secret: &str) -> ServiceResult<Option<Session>> {
        let name = identifier.trim();
        if name.is_empty() || self.passphrase.is_empty() || secret != self.passphrase {
            return Ok(None);
        }
        Ok(Some(Session::new(name, name, name, None)))
    }

    fn name(&self) -> &'static str {
        "passphrase"
    }
}

impl std::fmt::Debug for SharedPassphrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedPassphrase")
            .field("passphrase", &"[REDACTED]")
            .finish()
    }
}
