use jira::SelfProfile;

use crate::domain::models::{ConnectedInfo, PersistedCredentials};

/// Lifecycle notifications consumed by the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionEvent {
    ConnectionStatus(bool),
    FetchInProgress(bool),
    /// Human readable failure message.
    Error(String),
    /// Degraded but still usable state, e.g. live updates unavailable.
    Warning(String),
    SelfProfile(SelfProfile),
    Connected(ConnectedInfo),
    AuthSucceeded,
    TokenSaved(String),
    CredentialsMemorized(PersistedCredentials),
    SavedCredentialsLoaded(Option<PersistedCredentials>),
    JwtLoaded(String),
    IssuesCleared,
    ProjectsCleared,
    LoggedOut,
    /// Raw text frame received on the realtime channel.
    RealtimeMessage(String),
}
