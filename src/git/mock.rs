//! Mock git implementation for testing.
//!
//! `MockGit` implements the [`Git`] trait from canned values so the lookup
//! can be exercised without a repository on disk.
//!
//! # Example
//!
//! ```
//! use github_commit_status_mark::git::{Git, MockGit};
//!
//! let git = MockGit::new("/repo")
//!     .with_revision("HEAD", "abc123")
//!     .with_config("remote.origin.url", "git@github.com:owner/repo.git");
//!
//! assert_eq!(git.rev_parse("HEAD").unwrap(), "abc123");
//! assert!(git.rev_parse("main").is_err());
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

use super::Git;
use crate::error::{Result, StatusMarkError};

/// Mock git for testing.
#[derive(Debug, Default)]
pub struct MockGit {
    toplevel: PathBuf,
    revisions: HashMap<String, String>,
    config: HashMap<String, String>,
    urlmatch: HashMap<(String, String), String>,
    calls: RefCell<Vec<String>>,
}

impl MockGit {
    /// Create a mock repository rooted at `toplevel`.
    pub fn new(toplevel: impl Into<PathBuf>) -> Self {
        Self {
            toplevel: toplevel.into(),
            ..Default::default()
        }
    }

    /// Resolve `rev` to `hash`.
    pub fn with_revision(mut self, rev: &str, hash: &str) -> Self {
        self.revisions.insert(rev.to_string(), hash.to_string());
        self
    }

    /// Set a plain config value.
    pub fn with_config(mut self, key: &str, value: &str) -> Self {
        self.config.insert(key.to_string(), value.to_string());
        self
    }

    /// Set a config value returned for `key` when matched against `url`.
    pub fn with_urlmatch(mut self, key: &str, url: &str, value: &str) -> Self {
        self.urlmatch
            .insert((key.to_string(), url.to_string()), value.to_string());
        self
    }

    /// Git commands issued so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, args: &[&str]) {
        self.calls.borrow_mut().push(args.join(" "));
    }
}

impl Git for MockGit {
    fn rev_parse(&self, rev: &str) -> Result<String> {
        let args = ["rev-parse", rev];
        self.record(&args);
        self.revisions
            .get(rev)
            .cloned()
            .ok_or_else(|| StatusMarkError::git(&args, "unknown revision"))
    }

    fn toplevel(&self) -> Result<PathBuf> {
        self.record(&["rev-parse", "--show-toplevel"]);
        Ok(self.toplevel.clone())
    }

    fn config(&self, key: &str) -> Result<String> {
        let args = ["config", key];
        self.record(&args);
        self.config
            .get(key)
            .cloned()
            .ok_or_else(|| StatusMarkError::git(&args, "exit status: 1"))
    }

    fn config_urlmatch(&self, key: &str, url: &str) -> Result<Option<String>> {
        self.record(&["config", "--get-urlmatch", key, url]);
        Ok(self
            .urlmatch
            .get(&(key.to_string(), url.to_string()))
            .cloned())
    }
}
