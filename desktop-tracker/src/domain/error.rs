use thiserror::Error;

use crate::domain::ports::outbound::StoreError;

/// Failures of the connection lifecycle.
///
/// None of them is retried automatically; the user re-runs the operation.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("no network connection")]
    Connectivity,
    #[error("authentication rejected: {0}")]
    AuthRejected(String),
    #[error("tracker server error: {0}")]
    ServerError(String),
    #[error("failed to fetch JIRA profile: {0}")]
    ProfileFetchFailed(String),
    #[error("storage error: {0}")]
    StorageError(#[from] StoreError),
    #[error("no saved session token")]
    MissingToken,
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
}
