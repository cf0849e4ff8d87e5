//! Identity provider seam for the login action
//!
//! Credential verification is delegated to a [`CredentialsProvider`]. The
//! provider reports failures with a structured [`ProviderErrorKind`], so the
//! login action can tell bad credentials apart from every other failure
//! without looking at message text.

use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;

use crate::core::form::FormData;

/// Strategy name used by the login form
pub const CREDENTIALS_STRATEGY: &str = "credentials";

/// Every field of the submitted login form
pub type Credentials = IndexMap<String, String>;

impl From<FormData> for Credentials {
    fn from(form: FormData) -> Self {
        form.into_fields()
    }
}

/// Why a provider refused to sign a user in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// The credentials do not match a known account
    InvalidCredentials,
    /// Anything else: misconfiguration, unreachable backend, unknown strategy
    Other,
}

/// Failure reported by an identity provider
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_credentials() -> Self {
        Self::new(ProviderErrorKind::InvalidCredentials, "CredentialsSignin")
    }

    pub fn is_invalid_credentials(&self) -> bool {
        self.kind == ProviderErrorKind::InvalidCredentials
    }
}

/// External credential verification
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// Verify the credentials with the named strategy
    async fn sign_in(&self, strategy: &str, credentials: &Credentials)
    -> Result<(), ProviderError>;
}

/// In-memory provider holding email/password pairs
///
/// Useful for testing and development. Only the `credentials` strategy is
/// supported.
#[derive(Clone, Default)]
pub struct InMemoryCredentialsProvider {
    accounts: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryCredentialsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account, replacing any previous password
    pub fn with_account(self, email: impl Into<String>, password: impl Into<String>) -> Self {
        if let Ok(mut accounts) = self.accounts.write() {
            accounts.insert(email.into(), password.into());
        }
        self
    }
}

#[async_trait]
impl CredentialsProvider for InMemoryCredentialsProvider {
    async fn sign_in(
        &self,
        strategy: &str,
        credentials: &Credentials,
    ) -> Result<(), ProviderError> {
        if strategy != CREDENTIALS_STRATEGY {
            return Err(ProviderError::new(
                ProviderErrorKind::Other,
                format!("Unsupported sign-in strategy: {}", strategy),
            ));
        }

        let accounts = self.accounts.read().map_err(|e| {
            ProviderError::new(
                ProviderErrorKind::Other,
                format!("Failed to acquire read lock: {}", e),
            )
        })?;

        let (Some(email), Some(password)) = (credentials.get("email"), credentials.get("password"))
        else {
            return Err(ProviderError::invalid_credentials());
        };

        match accounts.get(email) {
            Some(expected) if expected == password => Ok(()),
            _ => Err(ProviderError::invalid_credentials()),
        }
    }
}
