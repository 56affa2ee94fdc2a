use std::fmt;

use async_trait::async_trait;
use jira::JiraHost;
use serde::Deserialize;
use thiserror::Error;

/// JIRA login handed back by the tracker server for a valid bearer token.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegatedCredentials {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for DelegatedCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegatedCredentials")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Response to a username/password exchange.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssuedToken {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Error)]
pub enum AuthServerError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Backend that trades credentials for a tracker session token and back.
#[async_trait]
pub trait AuthServer: Send + Sync {
    /// Exchange a bearer token for the JIRA login it was issued for.
    async fn exchange_token(&self, token: &str) -> Result<DelegatedCredentials, AuthServerError>;

    /// Exchange a verified JIRA login for a bearer token.
    async fn issue_token(
        &self,
        host: &JiraHost,
        username: &str,
        password: &str,
    ) -> Result<IssuedToken, AuthServerError>;
}
