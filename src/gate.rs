//! Sign-in gate — turn the yes/no check into a navigation decision.
//!
//! SYSTEM CONTEXT
//! ==============
//! Entry points refuse to start without a signed-in user and send the visitor
//! back to `/` with a notice. Route-level guards do the same for protected
//! path prefixes but skip the network round-trip for public paths.

use crate::check::AuthChecker;

pub const SIGN_IN_ROUTE: &str = "/";
pub const SIGN_IN_NOTICE: &str = "Please sign in!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    Redirect { to: String, notice: Option<String> },
}

impl GateDecision {
    #[must_use]
    pub fn is_proceed(&self) -> bool {
        matches!(self, Self::Proceed)
    }
}

/// Entry gate: authorized callers proceed, everyone else is sent to sign in.
pub async fn enter(checker: &AuthChecker) -> GateDecision {
    if checker.is_authorized().await {
        GateDecision::Proceed
    } else {
        GateDecision::Redirect { to: SIGN_IN_ROUTE.to_owned(), notice: Some(SIGN_IN_NOTICE.to_owned()) }
    }
}

// =============================================================================
// ROUTE GUARD
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    protected: Vec<String>,
}

impl RouteGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require sign-in for `prefix` and everything below it.
    #[must_use]
    pub fn protect(mut self, prefix: &str) -> Self {
        self.protected.push(normalize_path(prefix));
        self
    }

    /// Whether `path` falls under a protected prefix. Matching is per segment.
    #[must_use]
    pub fn is_protected(&self, path: &str) -> bool {
        let path = normalize_path(path);
        self.protected.iter().any(|prefix| {
            prefix == "/"
                || path == *prefix
                || path.strip_prefix(prefix.as_str()).is_some_and(|rest| rest.starts_with('/'))
        })
    }

    /// Decide whether navigation to `path` may proceed.
    pub async fn navigate(&self, path: &str, checker: &AuthChecker) -> GateDecision {
        if !self.is_protected(path) || checker.is_authorized().await {
            return GateDecision::Proceed;
        }
        GateDecision::Redirect { to: SIGN_IN_ROUTE.to_owned(), notice: None }
    }
}

/// Leading slash, no trailing slash, query and fragment dropped.
fn normalize_path(raw: &str) -> String {
    let raw = raw.split(['?', '#']).next().unwrap_or_default().trim();
    let trimmed = raw.trim_matches('/');
    format!("/{trimmed}")
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;
