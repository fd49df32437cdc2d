//! Authorization check — ask the authority whether the stored token is accepted.
//!
//! DESIGN
//! ======
//! One `GET <base-url><endpoint>` carrying `Authorization: Bearer <token>`.
//! The response body is ignored; only a 2xx status counts as accepted.
//! There is no timeout and no retry, so a hung authority hangs the check.
//!
//! ERROR HANDLING
//! ==============
//! Nothing on the request path returns an error. Transport failures are
//! logged and reported as `false`; `probe` keeps the distinction for callers
//! that want to tell "rejected" apart from "unreachable".

use std::fmt;
use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use tracing::{debug, error, warn};

use crate::config::AuthConfig;
use crate::credential::{CredentialSource, bearer_value};
use crate::error::AuthError;

// =============================================================================
// OUTCOME
// =============================================================================

/// What a single check observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The authority answered with a 2xx status.
    Accepted { status: StatusCode },
    /// The authority answered with any other status.
    Rejected { status: StatusCode },
    /// No usable answer: connection, DNS, or request construction failed.
    Unreachable { reason: String },
}

impl CheckOutcome {
    /// Classify a response status.
    #[must_use]
    pub fn from_status(status: StatusCode) -> Self {
        if status.is_success() { Self::Accepted { status } } else { Self::Rejected { status } }
    }

    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted { status } => write!(f, "accepted ({status})"),
            Self::Rejected { status } => write!(f, "rejected ({status})"),
            Self::Unreachable { reason } => write!(f, "unreachable: {reason}"),
        }
    }
}

// =============================================================================
// CHECKER
// =============================================================================

/// Cheap to clone; clones share the HTTP client and credential source.
#[derive(Clone)]
pub struct AuthChecker {
    http: reqwest::Client,
    url: String,
    credentials: Arc<dyn CredentialSource>,
}

impl fmt::Debug for AuthChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthChecker").field("url", &self.url).finish_non_exhaustive()
    }
}

impl AuthChecker {
    /// Build a checker for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &AuthConfig, credentials: Arc<dyn CredentialSource>) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AuthError::HttpClientBuild(e.to_string()))?;
        Ok(Self::with_client(http, config.check_url(), credentials))
    }

    /// Build a checker around an existing client and a fully-formed URL.
    #[must_use]
    pub fn with_client(http: reqwest::Client, url: String, credentials: Arc<dyn CredentialSource>) -> Self {
        Self { http, url, credentials }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// `true` iff the authority accepts the current credential.
    ///
    /// Never fails: missing, rejected, and unreachable all read as `false`.
    pub async fn is_authorized(&self) -> bool {
        self.probe().await.is_accepted()
    }

    /// Run the check and report what happened.
    pub async fn probe(&self) -> CheckOutcome {
        let credential = match self.credentials.credential().await {
            Ok(credential) => credential,
            Err(e) => {
                warn!(error = %e, "credential source failed; sending missing credential");
                None
            }
        };

        let header = match authorization_header(&bearer_value(credential)) {
            Ok(header) => header,
            Err(reason) => {
                error!(url = %self.url, %reason, "authorization check failed");
                return CheckOutcome::Unreachable { reason };
            }
        };

        match self.http.get(&self.url).header(AUTHORIZATION, header).send().await {
            Ok(response) => {
                let outcome = CheckOutcome::from_status(response.status());
                if !outcome.is_accepted() {
                    debug!(url = %self.url, status = %response.status(), "credential not accepted");
                }
                outcome
            }
            Err(e) => {
                error!(url = %self.url, error = %e, "authorization check failed");
                CheckOutcome::Unreachable { reason: e.to_string() }
            }
        }
    }
}

/// `Bearer <value>`, marked sensitive so it stays out of debug output.
///
/// Non-ASCII tokens are accepted and sent as raw UTF-8 bytes. A browser
/// `fetch` refuses such a header, so there the same token reads as `false`
/// without reaching the authority.
fn authorization_header(value: &str) -> Result<HeaderValue, String> {
    let mut header =
        HeaderValue::from_str(&format!("Bearer {value}")).map_err(|e| format!("invalid credential header: {e}"))?;
    header.set_sensitive(true);
    Ok(header)
}

#[cfg(test)]
#[path = "check_test.rs"]
mod tests;
