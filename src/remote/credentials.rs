//! API token resolution.
//!
//! Sources are tried in order and the first non-empty value wins:
//!
//! 1. the `GITHUB_COMMIT_STATUS_MARK_TOKEN` environment variable
//! 2. the netrc entry for the API host (`api.github.com` for github.com)
//! 3. `git config --get-urlmatch github.token <remote-url>`
//!
//! Finding nothing is fine; requests are then sent anonymously.

use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, warn};

use super::identity::RemoteIdentity;
use super::netrc::{self, Netrc};
use crate::error::Result;
use crate::git::Git;

/// Environment variable holding an API token.
pub const TOKEN_ENV: &str = "GITHUB_COMMIT_STATUS_MARK_TOKEN";

/// URL-scoped git config key holding an API token.
pub const TOKEN_CONFIG_KEY: &str = "github.token";

/// Where a token came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    Environment,
    Netrc(PathBuf),
    GitConfig,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => write!(f, "${}", TOKEN_ENV),
            Self::Netrc(path) => write!(f, "{}", path.display()),
            Self::GitConfig => write!(f, "git config {}", TOKEN_CONFIG_KEY),
        }
    }
}

/// A resolved API token.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    value: String,
    source: TokenSource,
}

impl Token {
    /// Create a token from a known source.
    pub fn new(value: impl Into<String>, source: TokenSource) -> Self {
        Self {
            value: value.into(),
            source,
        }
    }

    /// The secret value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Where the token was found.
    pub fn source(&self) -> &TokenSource {
        &self.source
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("value", &"***")
            .field("source", &self.source)
            .finish()
    }
}

/// Resolves the API token for a remote.
#[derive(Debug, Clone, Default)]
pub struct CredentialResolver {
    env_token: Option<String>,
    netrc_path: Option<PathBuf>,
}

impl CredentialResolver {
    /// Resolver reading the process environment and the default netrc file.
    pub fn from_env() -> Self {
        Self::new(std::env::var(TOKEN_ENV).ok(), netrc::default_path())
    }

    /// Resolver with explicit sources.
    pub fn new(env_token: Option<String>, netrc_path: Option<PathBuf>) -> Self {
        Self {
            env_token,
            netrc_path,
        }
    }

    /// Find a token for `identity`, or `None` for anonymous access.
    pub fn resolve(&self, identity: &RemoteIdentity, git: &dyn Git) -> Result<Option<Token>> {
        if let Some(value) = non_empty(self.env_token.as_deref()) {
            debug!("Using token from ${}", TOKEN_ENV);
            return Ok(Some(Token::new(value, TokenSource::Environment)));
        }

        if let Some(token) = self.netrc_token(identity) {
            debug!("Using token from {}", token.source());
            return Ok(Some(token));
        }

        let configured = git.config_urlmatch(TOKEN_CONFIG_KEY, &identity.url)?;
        if let Some(value) = non_empty(configured.as_deref()) {
            debug!("Using token from git config {}", TOKEN_CONFIG_KEY);
            return Ok(Some(Token::new(value, TokenSource::GitConfig)));
        }

        debug!("No token found for {}, using anonymous access", identity);
        Ok(None)
    }

    fn netrc_token(&self, identity: &RemoteIdentity) -> Option<Token> {
        let path = self.netrc_path.as_ref()?;

        let netrc = match Netrc::from_file(path) {
            Ok(netrc) => netrc,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Skipping unreadable netrc {}: {}", path.display(), e);
                return None;
            }
        };

        let password = netrc.machine(identity.api_host())?.password.as_deref();
        non_empty(password).map(|value| Token::new(value, TokenSource::Netrc(path.clone())))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
