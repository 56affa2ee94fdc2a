use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use jira::JiraHost;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::domain::ports::outbound::{
    AuthServer, AuthServerError, DelegatedCredentials, IssuedToken,
};

const AUTHENTICATE_PATH: &str = "desktop-tracker/authenticate";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IssueTokenRequest<'a> {
    base_url: &'a str,
    username: &'a str,
    password: &'a str,
}

/// HTTP client for the tracker backend.
#[derive(Debug, Clone)]
pub struct TrackerServerClient {
    client: Client,
    authenticate_url: Url,
}

impl TrackerServerClient {
    pub fn new(static_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(&format!("{}/", static_url.trim_end_matches('/')))
            .with_context(|| format!("Invalid tracker server URL: {}", static_url))?;
        let authenticate_url = base
            .join(AUTHENTICATE_PATH)
            .context("Failed to build authenticate URL")?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            authenticate_url,
        })
    }

    pub fn authenticate_url(&self) -> &Url {
        &self.authenticate_url
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, AuthServerError> {
        match response.status() {
            StatusCode::OK => response
                .json::<T>()
                .await
                .map_err(|e| AuthServerError::Malformed(e.to_string())),
            StatusCode::UNAUTHORIZED => Err(AuthServerError::Unauthorized),
            status => Err(AuthServerError::Status(status.as_u16())),
        }
    }
}

#[async_trait]
impl AuthServer for TrackerServerClient {
    #[tracing::instrument(skip_all)]
    async fn exchange_token(&self, token: &str) -> Result<DelegatedCredentials, AuthServerError> {
        let response = self
            .client
            .post(self.authenticate_url.clone())
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthServerError::Transport(e.to_string()))?;

        Self::parse(response).await
    }

    #[tracing::instrument(skip(self, password), fields(host = %host))]
    async fn issue_token(
        &self,
        host: &JiraHost,
        username: &str,
        password: &str,
    ) -> Result<IssuedToken, AuthServerError> {
        let response = self
            .client
            .post(self.authenticate_url.clone())
            .json(&IssueTokenRequest {
                base_url: host.as_str(),
                username,
                password,
            })
            .send()
            .await
            .map_err(|e| AuthServerError::Transport(e.to_string()))?;

        Self::parse(response).await
    }
}
