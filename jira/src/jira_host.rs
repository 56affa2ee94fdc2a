use std::fmt;

/// Domain every user-supplied site name is completed with.
pub const CLOUD_DOMAIN_SUFFIX: &str = ".atlassian.net";

/// Canonical JIRA Cloud host without scheme, e.g. `team.atlassian.net`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraHost(String);

impl AsRef<str> for JiraHost {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JiraHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl JiraHost {
    /// Normalizes a host typed by the user.
    ///
    /// At most one leading `https://` or `http://` is stripped, then the cloud
    /// domain suffix is appended. Anything else passes through untouched.
    pub fn normalize(input: &str) -> Self {
        let host = input
            .strip_prefix("https://")
            .or_else(|| input.strip_prefix("http://"))
            .unwrap_or(input);
        Self(format!("{host}{CLOUD_DOMAIN_SUFFIX}"))
    }

    /// Wraps a host that is already canonical, as handed out by the tracker server.
    ///
    /// Scheme and trailing slashes are dropped, no suffix is added.
    pub fn canonical(base_url: &str) -> Self {
        let host = base_url
            .strip_prefix("https://")
            .or_else(|| base_url.strip_prefix("http://"))
            .unwrap_or(base_url);
        Self(host.trim_end_matches('/').to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Base URL used for REST calls.
    pub fn https_url(&self) -> String {
        format!("https://{}", self.0)
    }
}
