//! Check configuration parsed from environment variables.

use std::path::PathBuf;

use crate::error::AuthError;

pub const DEFAULT_STORAGE_KEY: &str = "access_token";
pub const DEFAULT_STORAGE_PATH: &str = ".authcheck/storage.json";

/// Which path on the authority answers the yes/no question.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckEndpoint {
    /// `GET /authorize`
    Authorize,
    /// `GET /verify-token`
    #[default]
    VerifyToken,
    /// Any other suffix, always stored with a leading `/`.
    Custom(String),
}

impl CheckEndpoint {
    /// Parse `authorize`, `verify-token`, or a custom path.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty value or a path carrying a query or fragment.
    pub fn parse(raw: &str) -> Result<Self, AuthError> {
        let raw = raw.trim();
        match raw {
            "authorize" | "/authorize" => Ok(Self::Authorize),
            "verify-token" | "/verify-token" => Ok(Self::VerifyToken),
            "" | "/" => Err(AuthError::InvalidEndpoint("empty endpoint path".into())),
            other if other.contains(['?', '#']) => Err(AuthError::InvalidEndpoint(format!(
                "endpoint '{other}' must be a plain path"
            ))),
            other => Ok(Self::Custom(format!("/{}", other.trim_start_matches('/')))),
        }
    }

    /// Path suffix appended to the base URL.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Authorize => "/authorize",
            Self::VerifyToken => "/verify-token",
            Self::Custom(path) => path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub base_url: String,
    pub endpoint: CheckEndpoint,
    pub storage_key: String,
    pub storage_path: PathBuf,
}

impl AuthConfig {
    /// Build a config for `base_url` with every other field at its default.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is empty or does not parse.
    pub fn new(base_url: &str) -> Result<Self, AuthError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            endpoint: CheckEndpoint::default(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
        })
    }

    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `AUTH_BASE_URL`
    ///
    /// Optional:
    /// - `AUTH_CHECK_ENDPOINT`: `verify-token` (default), `authorize`, or a custom path
    /// - `AUTH_STORAGE_KEY`: default `access_token`
    /// - `AUTH_STORAGE_PATH`: default `.authcheck/storage.json`
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is missing or malformed, or the endpoint is invalid.
    pub fn from_env() -> Result<Self, AuthError> {
        Self::from_env_with_base_url(None)
    }

    /// Like [`AuthConfig::from_env`], but an explicit `base_url` replaces `AUTH_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is missing or malformed, or the endpoint is invalid.
    pub fn from_env_with_base_url(base_url: Option<&str>) -> Result<Self, AuthError> {
        let base_url = match base_url {
            Some(url) => url.to_owned(),
            None => std::env::var("AUTH_BASE_URL").map_err(|_| AuthError::MissingConfig {
                var: "AUTH_BASE_URL".into(),
            })?,
        };
        let mut config = Self::new(&base_url)?;

        if let Some(raw) = env_non_empty("AUTH_CHECK_ENDPOINT") {
            config.endpoint = CheckEndpoint::parse(&raw)?;
        }
        (config.storage_key, config.storage_path) = storage_from_env();

        Ok(config)
    }

    /// Full URL the check will `GET`.
    #[must_use]
    pub fn check_url(&self) -> String {
        format!("{}{}", self.base_url, self.endpoint.path())
    }
}

/// Storage key and path from `AUTH_STORAGE_KEY` / `AUTH_STORAGE_PATH`.
/// Unset or blank variables fall back to the defaults.
#[must_use]
pub fn storage_from_env() -> (String, PathBuf) {
    let key = env_non_empty("AUTH_STORAGE_KEY").unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());
    let path = env_non_empty("AUTH_STORAGE_PATH").map_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from);
    (key, path)
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub(crate) fn normalize_base_url(raw: &str) -> Result<String, AuthError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(AuthError::MissingConfig { var: "AUTH_BASE_URL".into() });
    }
    reqwest::Url::parse(trimmed).map_err(|e| AuthError::InvalidBaseUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
