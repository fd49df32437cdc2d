//! Error types for configuration, storage, and client construction.
//!
//! The authorization check itself never returns these; every failure on the
//! request path collapses into a `false` result and a log line.

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing required config: {var}")]
    MissingConfig { var: String },
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("invalid check endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to build HTTP client: {0}")]
    HttpClientBuild(String),
}
