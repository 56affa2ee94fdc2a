use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use jira::{BasicAuth, JiraClient, JiraFetchError, JiraHost, SelfProfile};

use crate::domain::ports::outbound::{RemoteApi, RemoteApiConnector};

#[async_trait]
impl RemoteApi for JiraClient {
    async fn get_myself(&self) -> Result<SelfProfile, JiraFetchError> {
        JiraClient::get_myself(self).await
    }
}

/// Builds [`JiraClient`]s sharing one request timeout.
#[derive(Debug, Clone)]
pub struct JiraConnector {
    timeout: Duration,
}

impl JiraConnector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl RemoteApiConnector for JiraConnector {
    fn connect(
        &self,
        host: &JiraHost,
        auth: BasicAuth,
    ) -> Result<Arc<dyn RemoteApi>, JiraFetchError> {
        let client = JiraClient::new(host, auth, self.timeout)?;
        Ok(Arc::new(client))
    }
}
