//! Commit status API client.
//!
//! Calls `GET {base}repos/{owner}/{repo}/commits/{sha}/statuses` and reads
//! the `state` of the returned records. Enterprise hosts are addressed under
//! `/api/v3/` and commonly run behind self-signed certificates, so
//! certificate verification is disabled for them.

use anyhow::Context;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::credentials::Token;
use super::identity::RemoteIdentity;
use crate::cache::CommitStatus;
use crate::error::{Result, StatusMarkError};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// One status reported for a commit. Other API fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusRecord {
    pub state: String,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Deserialize)]
struct ApiMessage {
    message: String,
}

/// Client settings that do not depend on the remote.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout.
    pub timeout: Duration,
    /// API base overriding the one derived from the remote host.
    pub api_base: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            api_base: None,
        }
    }
}

/// Blocking client for one remote repository.
pub struct StatusClient {
    client: Client,
    base: String,
    identity: RemoteIdentity,
}

impl StatusClient {
    /// Build a client for `identity`, authenticated when `token` is given.
    pub fn new(
        identity: &RemoteIdentity,
        token: Option<&Token>,
        options: &ClientOptions,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.value()))
                .context("API token contains characters not allowed in a header")?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = Client::builder()
            .user_agent(concat!("github-commit-status-mark/", env!("CARGO_PKG_VERSION")))
            .timeout(options.timeout)
            .default_headers(headers);

        if identity.is_enterprise() {
            debug!("Accepting any certificate for {}", identity.host);
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().context("Failed to build HTTP client")?;

        let mut base = options
            .api_base
            .clone()
            .unwrap_or_else(|| identity.api_base());
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self {
            client,
            base,
            identity: identity.clone(),
        })
    }

    /// API base this client sends requests to.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// URL listing the statuses of `sha`.
    pub fn statuses_url(&self, sha: &str) -> String {
        format!(
            "{}repos/{}/{}/commits/{}/statuses",
            self.base, self.identity.owner, self.identity.repo, sha
        )
    }

    /// All status records attached to `sha`, newest first.
    pub fn list_statuses(&self, sha: &str) -> Result<Vec<StatusRecord>> {
        let url = self.statuses_url(sha);
        debug!("Fetching {}", url);

        let api_error = |message: String| StatusMarkError::RemoteApi {
            url: url.clone(),
            message,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| api_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ApiMessage>()
                .map(|m| format!(": {}", m.message))
                .unwrap_or_default();
            return Err(api_error(format!("HTTP {}{}", status, detail)));
        }

        response
            .json::<Vec<StatusRecord>>()
            .map_err(|e| api_error(format!("invalid response: {}", e)))
    }

    /// Current status of `sha`: the newest record's state, or unknown.
    pub fn current_status(&self, sha: &str) -> Result<CommitStatus> {
        let records = self.list_statuses(sha)?;
        debug!("{} status records for {}", records.len(), sha);

        Ok(records
            .first()
            .map(|r| CommitStatus::from_state(&r.state))
            .unwrap_or_default())
    }
}
