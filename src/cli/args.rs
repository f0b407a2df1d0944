//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::Parser;
use clap_complete::Shell;

use crate::lookup::{CacheMode, LookupRequest, DEFAULT_REVISION};

/// Print a one-glyph GitHub commit status mark for a git revision.
#[derive(Debug, Parser)]
#[command(name = "github-commit-status-mark")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Revision to look up
    #[arg(default_value = DEFAULT_REVISION)]
    pub revision: String,

    /// Use the cached status without checking its age
    #[arg(long)]
    pub cached: bool,

    /// Always ask the remote API (wins over --cached)
    #[arg(long)]
    pub update: bool,

    /// Print the glyph without colors
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging on stderr
    #[arg(long)]
    pub debug: bool,

    /// HTTP timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,

    /// Override the API base URL
    #[arg(long, value_name = "URL", env = "GITHUB_COMMIT_STATUS_MARK_API_URL", hide = true)]
    pub api_url: Option<String>,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL", hide = true)]
    pub completions: Option<Shell>,
}

impl Cli {
    /// The lookup described by the revision and cache flags.
    pub fn lookup_request(&self) -> LookupRequest {
        LookupRequest {
            revision: self.revision.clone(),
            mode: CacheMode::from_flags(self.cached, self.update),
        }
    }
}
