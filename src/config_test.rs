use super::*;

/// # Safety
/// Tests touching `AUTH_*` must run with `--test-threads=1` to avoid env races.
unsafe fn clear_auth_env() {
    unsafe {
        std::env::remove_var("AUTH_BASE_URL");
        std::env::remove_var("AUTH_CHECK_ENDPOINT");
        std::env::remove_var("AUTH_STORAGE_KEY");
        std::env::remove_var("AUTH_STORAGE_PATH");
    }
}

// =============================================================================
// CheckEndpoint
// =============================================================================

#[test]
fn endpoint_parses_known_variants() {
    assert_eq!(CheckEndpoint::parse("authorize").unwrap(), CheckEndpoint::Authorize);
    assert_eq!(CheckEndpoint::parse("/verify-token").unwrap(), CheckEndpoint::VerifyToken);
    assert_eq!(CheckEndpoint::parse(" verify-token ").unwrap(), CheckEndpoint::VerifyToken);
}

#[test]
fn endpoint_custom_gets_leading_slash() {
    let endpoint = CheckEndpoint::parse("api/auth/me").unwrap();
    assert_eq!(endpoint, CheckEndpoint::Custom("/api/auth/me".into()));
    assert_eq!(endpoint.path(), "/api/auth/me");
}

#[test]
fn endpoint_rejects_empty_and_query() {
    assert!(CheckEndpoint::parse("").is_err());
    assert!(CheckEndpoint::parse("/").is_err());
    let err = CheckEndpoint::parse("/check?x=1").unwrap_err().to_string();
    assert!(err.contains("plain path"));
}

#[test]
fn endpoint_default_is_verify_token() {
    assert_eq!(CheckEndpoint::default().path(), "/verify-token");
}

// =============================================================================
// AuthConfig
// =============================================================================

#[test]
fn new_trims_trailing_slash() {
    let cfg = AuthConfig::new("http://localhost:5000/").unwrap();
    assert_eq!(cfg.base_url, "http://localhost:5000");
    assert_eq!(cfg.check_url(), "http://localhost:5000/verify-token");
}

#[test]
fn new_rejects_garbage_url() {
    let err = AuthConfig::new("not a url").unwrap_err();
    assert!(matches!(err, AuthError::InvalidBaseUrl { .. }));
}

#[test]
fn new_rejects_blank_url() {
    let err = AuthConfig::new("   ").unwrap_err();
    assert!(matches!(err, AuthError::MissingConfig { .. }));
}

#[test]
fn from_env_defaults_and_overrides() {
    unsafe {
        clear_auth_env();
        std::env::set_var("AUTH_BASE_URL", "https://api.example.test/");
    }

    let cfg = AuthConfig::from_env().unwrap();
    assert_eq!(cfg.base_url, "https://api.example.test");
    assert_eq!(cfg.endpoint, CheckEndpoint::VerifyToken);
    assert_eq!(cfg.storage_key, DEFAULT_STORAGE_KEY);
    assert_eq!(cfg.storage_path, PathBuf::from(DEFAULT_STORAGE_PATH));

    unsafe {
        std::env::set_var("AUTH_CHECK_ENDPOINT", "authorize");
        std::env::set_var("AUTH_STORAGE_KEY", "jwt");
        std::env::set_var("AUTH_STORAGE_PATH", "/tmp/authcheck.json");
    }

    let cfg = AuthConfig::from_env().unwrap();
    assert_eq!(cfg.check_url(), "https://api.example.test/authorize");
    assert_eq!(cfg.storage_key, "jwt");
    assert_eq!(cfg.storage_path, PathBuf::from("/tmp/authcheck.json"));

    unsafe { clear_auth_env() };

    let err = AuthConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("AUTH_BASE_URL"));
}
