//! GitHub commit status marks for shell prompts.
//!
//! Resolves a git revision, looks up its combined commit status on GitHub
//! or GitHub Enterprise, and renders it as a single colored glyph. Results
//! are cached per repository so a prompt can call this on every render.
//!
//! # Modules
//!
//! - [`cache`] - per-repository status cache and freshness policy
//! - [`cli`] - command-line interface and argument parsing
//! - [`error`] - error types and result aliases
//! - [`git`] - git command execution
//! - [`lookup`] - cache-or-remote status lookup
//! - [`remote`] - remote URL parsing, credentials and the status API client
//! - [`ui`] - glyph rendering and terminal styling
//!
//! # Example
//!
//! ```
//! use github_commit_status_mark::remote::RemoteIdentity;
//!
//! let identity = RemoteIdentity::parse("git@github.com:octocat/hello-world.git").unwrap();
//! assert_eq!(identity.owner, "octocat");
//! assert_eq!(identity.repo, "hello-world");
//! assert_eq!(identity.api_base(), "https://api.github.com/");
//! ```

pub mod cache;
pub mod cli;
pub mod error;
pub mod git;
pub mod lookup;
pub mod remote;
pub mod ui;

pub use error::{Result, StatusMarkError};
