//! Credential sources — where the bearer token comes from.
//!
//! DESIGN
//! ======
//! The checker never reaches for ambient storage. It holds an
//! `Arc<dyn CredentialSource>` and asks it for the token on every call, so
//! tests can hand it a fixed value and the binary can hand it the storage file.
//! Tokens are opaque: nothing here parses or validates them.

use crate::error::AuthError;
use crate::storage::LocalStorage;

/// Header value used when no credential is stored.
pub const MISSING_CREDENTIAL: &str = "null";

/// Supplies the current bearer token, if any.
#[async_trait::async_trait]
pub trait CredentialSource: Send + Sync {
    /// Read the current credential.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the backing store cannot be read.
    async fn credential(&self) -> Result<Option<String>, AuthError>;
}

/// Render the bearer value sent on the wire. A missing entry is sent as `null`.
#[must_use]
pub fn bearer_value(credential: Option<String>) -> String {
    credential.unwrap_or_else(|| MISSING_CREDENTIAL.to_owned())
}

// =============================================================================
// STATIC
// =============================================================================

/// A fixed token, or a fixed absence of one.
#[derive(Debug, Clone, Default)]
pub struct StaticCredential(Option<String>);

impl StaticCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    #[must_use]
    pub fn none() -> Self {
        Self(None)
    }
}

#[async_trait::async_trait]
impl CredentialSource for StaticCredential {
    async fn credential(&self) -> Result<Option<String>, AuthError> {
        Ok(self.0.clone())
    }
}

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Reads a named environment variable at call time. Unset means missing.
#[derive(Debug, Clone)]
pub struct EnvCredential {
    var: String,
}

impl EnvCredential {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

#[async_trait::async_trait]
impl CredentialSource for EnvCredential {
    async fn credential(&self) -> Result<Option<String>, AuthError> {
        Ok(std::env::var(&self.var).ok())
    }
}

// =============================================================================
// STORAGE
// =============================================================================

/// Reads one well-known key from [`LocalStorage`] on every call.
#[derive(Debug, Clone)]
pub struct StoredCredential {
    storage: LocalStorage,
    key: String,
}

impl StoredCredential {
    pub fn new(storage: LocalStorage, key: impl Into<String>) -> Self {
        Self { storage, key: key.into() }
    }
}

#[async_trait::async_trait]
impl CredentialSource for StoredCredential {
    async fn credential(&self) -> Result<Option<String>, AuthError> {
        self.storage.get(&self.key).await
    }
}

#[cfg(test)]
#[path = "credential_test.rs"]
mod tests;
