use async_trait::async_trait;
use jira::JiraHost;
use thiserror::Error;

/// Who the realtime channel is opened for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealtimeContext {
    pub host: JiraHost,
    pub username: String,
    pub token: Option<String>,
}

#[derive(Debug, Error)]
pub enum RealtimeError {
    #[error("failed to connect: {0}")]
    Connect(String),
    #[error("connection timed out")]
    Timeout,
}

/// Session-scoped push channel.
#[async_trait]
pub trait RealtimeChannel: Send + Sync {
    /// Opens the channel, replacing any previous one.
    async fn login(&self, context: &RealtimeContext) -> Result<(), RealtimeError>;

    /// Stops the current channel, if any.
    async fn close(&self);
}
