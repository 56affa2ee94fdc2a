use std::{fmt, sync::Arc};

use jira::JiraHost;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::ports::outbound::RemoteApi;

/// Login form as typed by the user.
#[derive(Clone)]
pub struct Credentials {
    /// May carry a scheme prefix and usually only the site name.
    pub host: String,
    pub username: String,
    pub password: String,
    /// Remember host and username for the next launch.
    pub memorize: bool,
}

impl Credentials {
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Host cannot be empty".to_string());
        }
        if self.username.trim().is_empty() {
            return Err("Username cannot be empty".to_string());
        }
        if self.password.is_empty() {
            return Err("Password cannot be empty".to_string());
        }
        Ok(())
    }

    /// The part of the form that may be written to disk.
    pub fn persisted(&self) -> PersistedCredentials {
        PersistedCredentials {
            host: self.host.clone(),
            username: self.username.clone(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("memorize", &self.memorize)
            .finish()
    }
}

/// Saved login fields. Never holds a password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedCredentials {
    pub host: String,
    pub username: String,
}

/// An authenticated connection to JIRA.
#[derive(Clone)]
pub struct Session {
    pub client: Arc<dyn RemoteApi>,
    pub host: JiraHost,
    pub username: String,
    pub token: Option<String>,
    pub established_at: OffsetDateTime,
}

impl Session {
    pub fn new(
        client: Arc<dyn RemoteApi>,
        host: JiraHost,
        username: String,
        token: Option<String>,
    ) -> Self {
        Self {
            client,
            host,
            username,
            token,
            established_at: OffsetDateTime::now_utc(),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("has_token", &self.token.is_some())
            .field("established_at", &self.established_at)
            .finish()
    }
}

/// Payload of [`ConnectionEvent::Connected`](crate::domain::ConnectionEvent::Connected).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectedInfo {
    pub host: String,
    pub username: String,
    pub memorize: bool,
}

/// Result of reading an optional entry from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Lookup::Found(value),
            None => Lookup::NotFound,
        }
    }
}
