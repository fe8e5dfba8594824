use super::*;
use crate::error::DeployError;

#[cfg(feature = "file-storage")]
fn temp_store_dir() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("artifact-deploy-test-{}", rand::random::<u32>()))
}

#[tokio::test]
async fn test_put_then_get_returns_equal_record() {
    let store = TokenStore::open(EphemeralMedium::new()).await.unwrap();

    let token = Token::new("/releases/auth", "authtest", "secure");
    store.put(token.clone()).await.unwrap();

    assert_eq!(store.get("authtest").await, Some(token));
    assert_eq!(store.get("unknown").await, None);
}

#[tokio::test]
async fn test_put_replaces_wholesale() {
    let store = TokenStore::open(EphemeralMedium::new()).await.unwrap();

    store
        .issue("/releases", "alias", "old-secret")
        .await
        .unwrap();
    store
        .issue("/snapshots", "alias", "new-secret")
        .await
        .unwrap();

    let token = store.get("alias").await.unwrap();
    assert_eq!(token.path, "/snapshots");
    assert_eq!(token.secret, "new-secret");
    assert_eq!(store.count().await, 1);
}

#[tokio::test]
async fn test_remove_is_idempotent() {
    let store = TokenStore::open(EphemeralMedium::new()).await.unwrap();
    store.issue("/releases", "alias", "secret").await.unwrap();

    assert!(store.remove("alias").await.unwrap());
    assert_eq!(store.get("alias").await, None);
    assert!(!store.remove("alias").await.unwrap());
}

#[tokio::test]
async fn test_failed_put_leaves_memory_unchanged() {
    let medium = EphemeralMedium::new();
    medium.set_fail_writes(true);
    let store = TokenStore::open(medium).await.unwrap();

    let result = store.issue("/releases", "alias", "secret").await;
    assert!(matches!(result, Err(DeployError::Persistence(_))));
    assert_eq!(store.get("alias").await, None);
}

#[tokio::test]
async fn test_obstructed_remove_is_retryable() {
    let medium = EphemeralMedium::new();
    let store = TokenStore::open(medium).await.unwrap();
    let token = store.issue("/releases", "alias", "secret").await.unwrap();

    // Obstruct the medium: remove reports failure, the record survives.
    store.medium().set_fail_writes(true);
    let result = store.remove("alias").await;
    assert!(matches!(result, Err(DeployError::Persistence(_))));
    assert_eq!(store.get("alias").await, Some(token));

    // Obstruction clears, retry succeeds.
    store.medium().set_fail_writes(false);
    assert!(store.remove("alias").await.unwrap());
    assert_eq!(store.get("alias").await, None);
}

#[cfg(feature = "file-storage")]
#[tokio::test]
async fn test_store_survives_restart() {
    let dir = temp_store_dir();

    {
        let medium = FileTokenMedium::in_working_dir(&dir).await.unwrap();
        let store = TokenStore::open(medium).await.unwrap();
        store
            .issue("/releases/auth", "authtest", "secure")
            .await
            .unwrap();
    }

    let medium = FileTokenMedium::in_working_dir(&dir).await.unwrap();
    let store = TokenStore::open(medium).await.unwrap();
    let token = store.get("authtest").await.unwrap();
    assert_eq!(token.path, "/releases/auth");
    assert_eq!(token.secret, "secure");

    let _ = tokio::fs::remove_dir_all(dir).await;
}

#[cfg(feature = "file-storage")]
#[tokio::test]
async fn test_store_opened_over_corrupt_file_accepts_tokens() {
    let dir = temp_store_dir();
    tokio::fs::create_dir_all(&dir).await.unwrap();
    tokio::fs::write(dir.join("tokens.json"), "not valid json")
        .await
        .unwrap();

    let medium = FileTokenMedium::in_working_dir(&dir).await.unwrap();
    let store = TokenStore::open(medium).await.unwrap();
    assert_eq!(store.count().await, 0);

    // An empty start must be a usable start: issuance and revocation
    // work and the rewritten file survives a restart.
    let token = store
        .issue("/releases/auth", "authtest", "secure")
        .await
        .unwrap();
    assert_eq!(store.get("authtest").await, Some(token));
    assert!(store.remove("authtest").await.unwrap());

    let _ = tokio::fs::remove_dir_all(dir).await;
}

#[cfg(feature = "file-storage")]
#[tokio::test]
async fn test_obstructed_file_remove_keeps_token() {
    let dir = temp_store_dir();
    let medium = FileTokenMedium::in_working_dir(&dir).await.unwrap();
    let store = TokenStore::open(medium).await.unwrap();
    let token = store.issue("/releases", "alias", "secret").await.unwrap();

    // Swap the tokens file for a non-empty directory so the durable
    // remove cannot land.
    let file = dir.join("tokens.json");
    let saved = tokio::fs::read_to_string(&file).await.unwrap();
    tokio::fs::remove_file(&file).await.unwrap();
    tokio::fs::create_dir(&file).await.unwrap();
    tokio::fs::write(file.join("occupied"), "x").await.unwrap();

    let result = store.remove("alias").await;
    assert!(matches!(result, Err(DeployError::Persistence(_))));
    assert_eq!(store.get("alias").await, Some(token));

    // Clear the obstruction; the retry removes for real.
    tokio::fs::remove_dir_all(&file).await.unwrap();
    tokio::fs::write(&file, saved).await.unwrap();
    assert!(store.remove("alias").await.unwrap());
    assert_eq!(store.get("alias").await, None);

    let _ = tokio::fs::remove_dir_all(dir).await;
}
