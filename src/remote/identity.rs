//! Remote URL normalization.
//!
//! Turns whatever `remote.origin.url` holds (scp-style SSH, `ssh://`,
//! `git://`, `https://`) into an `https://host/owner/repo` URL and the
//! host/owner/repo triple used to address the status API.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use url::Url;

use crate::error::{Result, StatusMarkError};

/// Host of the public service. Every other host is treated as Enterprise.
pub const PUBLIC_HOST: &str = "github.com";

/// API base of the public service.
pub const PUBLIC_API_BASE: &str = "https://api.github.com/";

static SCHEME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\w+]+://").unwrap());

/// Repository addressed by a git remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteIdentity {
    /// Host name, without port or user info.
    pub host: String,
    /// Explicit port of an `http(s)://` remote. Ports of SSH-style remotes
    /// belong to the SSH server and are dropped.
    pub port: Option<u16>,
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Normalized `https://` remote URL.
    pub url: String,
}

impl RemoteIdentity {
    /// Normalize a raw remote URL.
    ///
    /// # Example
    ///
    /// ```
    /// use github_commit_status_mark::remote::RemoteIdentity;
    ///
    /// let id = RemoteIdentity::parse("git@github.com:owner/repo.git").unwrap();
    /// assert_eq!(id.host, "github.com");
    /// assert_eq!(id.owner, "owner");
    /// assert_eq!(id.repo, "repo");
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let normalized = normalize_url(raw);

        let parsed = Url::parse(&normalized)
            .map_err(|e| StatusMarkError::malformed_url(raw, e.to_string()))?;

        let host = parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| StatusMarkError::malformed_url(raw, "no host"))?
            .to_string();

        let port = Url::parse(raw)
            .ok()
            .filter(|u| matches!(u.scheme(), "http" | "https"))
            .and_then(|u| u.port());

        let mut segments = parsed
            .path_segments()
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty());

        let (owner, repo) = match (segments.next(), segments.next()) {
            (Some(owner), Some(repo)) => (owner.to_string(), repo.to_string()),
            _ => {
                return Err(StatusMarkError::malformed_url(
                    raw,
                    "expected owner and repository in path",
                ))
            }
        };

        Ok(Self {
            host,
            port,
            owner,
            repo,
            url: normalized,
        })
    }

    /// Whether this remote lives on a self-hosted Enterprise instance.
    pub fn is_enterprise(&self) -> bool {
        self.host != PUBLIC_HOST
    }

    /// Base URL of the REST API serving this remote, with trailing slash.
    pub fn api_base(&self) -> String {
        if self.is_enterprise() {
            match self.port {
                Some(port) => format!("https://{}:{}/api/v3/", self.host, port),
                None => format!("https://{}/api/v3/", self.host),
            }
        } else {
            PUBLIC_API_BASE.to_string()
        }
    }

    /// Host name the API is served from, used for credential lookups.
    pub fn api_host(&self) -> &str {
        if self.is_enterprise() {
            &self.host
        } else {
            "api.github.com"
        }
    }
}

impl fmt::Display for RemoteIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.host, self.owner, self.repo)
    }
}

/// Rewrite a remote into `https://` form without a `.git` suffix.
fn normalize_url(raw: &str) -> String {
    let url = SCHEME_REGEX.replace(raw, "https://");

    let url = if url.starts_with("https://") {
        url.into_owned()
    } else {
        format!("https://{}", url.replacen(':', "/", 1))
    };

    match url.strip_suffix(".git") {
        Some(stripped) => stripped.to_string(),
        None => url,
    }
}
