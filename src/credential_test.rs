use super::*;

#[test]
fn bearer_value_passes_token_through() {
    assert_eq!(bearer_value(Some("good-token".into())), "good-token");
}

#[test]
fn bearer_value_missing_is_literal_null() {
    assert_eq!(bearer_value(None), "null");
}

#[tokio::test]
async fn static_credential_returns_fixed_value() {
    assert_eq!(StaticCredential::new("abc").credential().await.unwrap().as_deref(), Some("abc"));
    assert_eq!(StaticCredential::none().credential().await.unwrap(), None);
}

#[tokio::test]
async fn env_credential_reads_at_call_time() {
    let var = "__AUTHCHECK_TEST_TOKEN_5521__";
    let source = EnvCredential::new(var);

    unsafe { std::env::remove_var(var) };
    assert_eq!(source.credential().await.unwrap(), None);

    unsafe { std::env::set_var(var, "from-env") };
    assert_eq!(source.credential().await.unwrap().as_deref(), Some("from-env"));

    unsafe { std::env::remove_var(var) };
}

#[tokio::test]
async fn stored_credential_reads_configured_key() {
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalStorage::open(dir.path().join("storage.json"));
    let source = StoredCredential::new(storage.clone(), "access_token");

    assert_eq!(source.credential().await.unwrap(), None);

    storage.set("access_token", "stored").await.unwrap();
    storage.set("other_token", "ignored").await.unwrap();
    assert_eq!(source.credential().await.unwrap().as_deref(), Some("stored"));
}
