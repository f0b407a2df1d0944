//! Error types for status mark operations.
//!
//! This module defines [`StatusMarkError`], the error type returned by the
//! cache, resolvers and lookup, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `StatusMarkError` for failures the user needs to act on
//! - Use `anyhow::Error` (via `StatusMarkError::Other`) for unexpected errors
//! - Errors are only turned into an exit code in `main.rs`

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for status mark operations.
#[derive(Debug, Error)]
pub enum StatusMarkError {
    /// A git invocation could not be spawned or exited non-zero.
    #[error("'{command}' failed: {message}")]
    GitCommandFailed { command: String, message: String },

    /// The remote URL could not be turned into host/owner/repo.
    #[error("Could not parse remote URL {url:?}: {reason}")]
    MalformedRemoteUrl { url: String, reason: String },

    /// The cache file could not be read or written.
    #[error("Cache file {path}: {source}")]
    CachePersist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The status API request failed or returned garbage.
    #[error("Error while fetching status from {url}: {message}")]
    RemoteApi { url: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StatusMarkError {
    /// Create a git failure for the given argument list.
    pub fn git(args: &[&str], message: impl Into<String>) -> Self {
        Self::GitCommandFailed {
            command: format!("git {}", args.join(" ")),
            message: message.into(),
        }
    }

    /// Create a malformed remote URL error.
    pub fn malformed_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRemoteUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a cache persistence error.
    pub fn cache(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CachePersist {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for status mark operations.
pub type Result<T> = std::result::Result<T, StatusMarkError>;
