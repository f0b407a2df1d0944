//! Command-line interface.
//!
//! - [`args`] - argument definitions using clap derive macros
//!
//! [`run`] performs one lookup for parsed arguments and returns the
//! rendered mark; printing and exit codes are left to the binary.

pub mod args;

pub use args::Cli;

use std::io::Write;
use std::time::Duration;

use clap::CommandFactory;
use clap_complete::Shell;
use tracing::debug;

use crate::cache::StatusPolicy;
use crate::error::Result;
use crate::git::{Git, GitCli};
use crate::lookup::StatusLookup;
use crate::remote::{ClientOptions, CredentialResolver};
use crate::ui::{should_use_colors, MarkRenderer};

/// Look up the status for `cli` in the current directory's repository.
pub fn run(cli: &Cli) -> Result<String> {
    run_with(cli, &GitCli::new(), CredentialResolver::from_env())
}

/// Look up the status for `cli` using the given git and credential sources.
pub fn run_with(cli: &Cli, git: &dyn Git, credentials: CredentialResolver) -> Result<String> {
    let policy = StatusPolicy::default();
    let options = ClientOptions {
        timeout: Duration::from_secs(cli.timeout),
        api_base: cli.api_url.clone(),
    };

    let lookup = StatusLookup::new(git, &policy, credentials, options);
    let outcome = lookup.run(&cli.lookup_request())?;
    debug!(
        "{} is {} (from {:?})",
        outcome.revision, outcome.status, outcome.source
    );

    let renderer = MarkRenderer::new(&policy, should_use_colors(cli.no_color));
    Ok(renderer.render(outcome.status))
}

/// Write the completion script for `shell`.
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "github-commit-status-mark", out);
}
