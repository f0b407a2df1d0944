//! Status lookup orchestration.
//!
//! Resolves the revision, serves it from the cache when the policy allows,
//! and otherwise asks the remote API and records the answer.
//!
//! The cache file is written only on the live path; a cache hit performs no
//! network access and no write.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::cache::{cache_path, CommitStatus, RevisionEntry, StatusCache, StatusPolicy};
use crate::error::Result;
use crate::git::Git;
use crate::remote::{ClientOptions, CredentialResolver, RemoteIdentity, StatusClient};

/// Revision looked up when none is given.
pub const DEFAULT_REVISION: &str = "HEAD";

/// Remote whose URL identifies the repository.
pub const REMOTE_URL_KEY: &str = "remote.origin.url";

/// How the cache may be used for a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Use the cached status while the policy considers it fresh.
    #[default]
    Auto,
    /// Use the cached status whatever its age.
    Cached,
    /// Always ask the remote API.
    Update,
}

impl CacheMode {
    /// Mode for the `--cached` / `--update` flags; `--update` wins.
    pub fn from_flags(cached: bool, update: bool) -> Self {
        match (cached, update) {
            (_, true) => Self::Update,
            (true, false) => Self::Cached,
            (false, false) => Self::Auto,
        }
    }
}

/// What to look up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    /// Revision expression passed to `git rev-parse`.
    pub revision: String,
    /// Cache usage.
    pub mode: CacheMode,
}

impl Default for LookupRequest {
    fn default() -> Self {
        Self {
            revision: DEFAULT_REVISION.to_string(),
            mode: CacheMode::Auto,
        }
    }
}

/// Where a reported status came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSource {
    Cache,
    Remote,
}

/// Result of a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOutcome {
    /// Full commit hash.
    pub revision: String,
    /// Reported status.
    pub status: CommitStatus,
    /// Whether the status was served from cache.
    pub source: StatusSource,
}

/// Ties git, cache, credentials and the API together.
pub struct StatusLookup<'a> {
    git: &'a dyn Git,
    policy: &'a StatusPolicy,
    credentials: CredentialResolver,
    client_options: ClientOptions,
}

impl<'a> StatusLookup<'a> {
    /// Create a lookup over `git` using `policy` for freshness.
    pub fn new(
        git: &'a dyn Git,
        policy: &'a StatusPolicy,
        credentials: CredentialResolver,
        client_options: ClientOptions,
    ) -> Self {
        Self {
            git,
            policy,
            credentials,
            client_options,
        }
    }

    /// Look up the status of `request.revision` now.
    pub fn run(&self, request: &LookupRequest) -> Result<LookupOutcome> {
        self.run_at(request, Utc::now())
    }

    /// Look up the status of `request.revision` as of `now`.
    pub fn run_at(&self, request: &LookupRequest, now: DateTime<Utc>) -> Result<LookupOutcome> {
        let revision = self.git.rev_parse(&request.revision)?;
        let path = cache_path(&self.git.toplevel()?);
        let mut cache = StatusCache::load(&path)?;
        let cached = cache.entry(&revision);

        let use_cache = match request.mode {
            CacheMode::Update => false,
            CacheMode::Cached => true,
            CacheMode::Auto => self.policy.is_fresh(&cached, now),
        };

        if use_cache {
            debug!("Cache hit for {}: {}", revision, cached.status);
            return Ok(LookupOutcome {
                revision,
                status: cached.status,
                source: StatusSource::Cache,
            });
        }

        debug!("Cache miss for {} ({:?})", revision, request.mode);
        let status = self.fetch(&revision)?;

        cache.put(revision.clone(), RevisionEntry::new(status, now));
        cache.save(&path)?;

        Ok(LookupOutcome {
            revision,
            status,
            source: StatusSource::Remote,
        })
    }

    fn fetch(&self, revision: &str) -> Result<CommitStatus> {
        let identity = RemoteIdentity::parse(&self.git.config(REMOTE_URL_KEY)?)?;
        debug!("Remote is {}", identity);

        let token = self.credentials.resolve(&identity, self.git)?;
        let client = StatusClient::new(&identity, token.as_ref(), &self.client_options)?;
        client.current_status(revision)
    }
}
