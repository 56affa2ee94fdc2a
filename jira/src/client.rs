use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{BasicAuth, JiraHost, SelfProfile};

/// Authenticated handle to one JIRA site.
///
/// Built once per login and reused for every later REST call.
#[derive(Debug, Clone)]
pub struct JiraClient {
    http: reqwest::Client,
    base_url: String,
    auth: BasicAuth,
}

impl JiraClient {
    pub fn new(host: &JiraHost, auth: BasicAuth, timeout: Duration) -> Result<Self, JiraFetchError> {
        Self::with_base_url(&host.https_url(), auth, timeout)
    }

    /// Points the client at an arbitrary base URL, e.g. a self-hosted server.
    pub fn with_base_url(
        base_url: &str,
        auth: BasicAuth,
        timeout: Duration,
    ) -> Result<Self, JiraFetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| JiraFetchError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn username(&self) -> &str {
        self.auth.username()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, JiraFetchError> {
        let resp = self
            .http
            .get(self.url(path))
            .header(AUTHORIZATION, self.auth.header_value())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    JiraFetchError::Timeout
                } else {
                    JiraFetchError::ResponseError(e.to_string())
                }
            })?;

        let status = resp.status();
        if status == 401 || status == 403 {
            return Err(JiraFetchError::Unauthorized);
        }
        if !status.is_success() {
            return Err(JiraFetchError::UnexpectedStatus(status.as_u16()));
        }

        resp.json::<T>().await.map_err(|e| {
            JiraFetchError::ParsingError(format!("Failed to parse response as JSON: {}", e))
        })
    }

    /// `GET /rest/api/2/myself`
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url, username = %self.auth.username()))]
    pub async fn get_myself(&self) -> Result<SelfProfile, JiraFetchError> {
        let profile: SelfProfile = self.fetch("/rest/api/2/myself").await?;
        tracing::debug!("fetched profile for {}", profile.display_name);
        Ok(profile)
    }
}

#[derive(Error, Debug)]
pub enum JiraFetchError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Unexpected status: {0}")]
    UnexpectedStatus(u16),
    #[error("Request timed out")]
    Timeout,
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
    #[error("Other: {0}")]
    Other(String),
}
