use std::sync::Arc;

use async_trait::async_trait;
use jira::{BasicAuth, JiraFetchError, JiraHost, SelfProfile};

/// Authenticated handle to the project-management service.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    async fn get_myself(&self) -> Result<SelfProfile, JiraFetchError>;
}

/// Builds [`RemoteApi`] handles for a host and login.
pub trait RemoteApiConnector: Send + Sync {
    fn connect(&self, host: &JiraHost, auth: BasicAuth) -> Result<Arc<dyn RemoteApi>, JiraFetchError>;
}
