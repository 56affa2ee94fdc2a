use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Key holding [`PersistedCredentials`](crate::domain::models::PersistedCredentials).
pub const CREDENTIALS_KEY: &str = "jira_credentials";
/// Key holding the tracker bearer token.
pub const TOKEN_KEY: &str = "desktop_tracker_jwt";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Async key/value persistence for login artifacts.
#[async_trait]
pub trait SecureStore: Send + Sync {
    /// `Ok(None)` when the key was never written.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Succeeds when the key does not exist.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
