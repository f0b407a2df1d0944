//! Access to the local git repository.
//!
//! [`Git`] is the narrow set of queries the lookup needs. [`GitCli`] answers
//! them by running the `git` executable; [`MockGit`] answers them from
//! canned values in tests.

pub mod mock;

pub use mock::MockGit;

use std::path::PathBuf;
use std::process::{Command, Output};
use tracing::debug;

use crate::error::{Result, StatusMarkError};

/// Repository queries used by the status lookup.
pub trait Git {
    /// Resolve `rev` to a full commit hash (`git rev-parse <rev>`).
    fn rev_parse(&self, rev: &str) -> Result<String>;

    /// Repository working tree root (`git rev-parse --show-toplevel`).
    fn toplevel(&self) -> Result<PathBuf>;

    /// Value of a config key (`git config <key>`); unset keys are errors.
    fn config(&self, key: &str) -> Result<String>;

    /// URL-scoped config value (`git config --get-urlmatch <key> <url>`).
    ///
    /// Returns `None` when the key is not set for the URL.
    fn config_urlmatch(&self, key: &str, url: &str) -> Result<Option<String>>;
}

/// [`Git`] backed by the `git` executable.
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    cwd: Option<PathBuf>,
    envs: Vec<(String, String)>,
}

impl GitCli {
    /// Run git in the current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run git in `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(dir.into()),
            envs: Vec::new(),
        }
    }

    /// Set an environment variable for every git invocation.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    fn output(&self, args: &[&str]) -> Result<Output> {
        debug!("Running git {}", args.join(" "));

        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }
        cmd.envs(self.envs.iter().map(|(k, v)| (k, v)));

        cmd.output()
            .map_err(|e| StatusMarkError::git(args, e.to_string()))
    }

    /// Run git and return trimmed stdout, failing on non-zero exit.
    fn run(&self, args: &[&str]) -> Result<String> {
        let output = self.output(args)?;
        if !output.status.success() {
            return Err(failure(args, &output));
        }
        Ok(stdout_line(&output))
    }
}

fn stdout_line(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout)
        .trim_end_matches(['\r', '\n'])
        .to_string()
}

fn failure(args: &[&str], output: &Output) -> StatusMarkError {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    let message = if stderr.is_empty() {
        output.status.to_string()
    } else {
        format!("{}: {}", output.status, stderr)
    };
    StatusMarkError::git(args, message)
}

impl Git for GitCli {
    fn rev_parse(&self, rev: &str) -> Result<String> {
        self.run(&["rev-parse", "--verify", rev])
    }

    fn toplevel(&self) -> Result<PathBuf> {
        self.run(&["rev-parse", "--show-toplevel"]).map(PathBuf::from)
    }

    fn config(&self, key: &str) -> Result<String> {
        self.run(&["config", key])
    }

    fn config_urlmatch(&self, key: &str, url: &str) -> Result<Option<String>> {
        let args = ["config", "--get-urlmatch", key, url];
        let output = self.output(&args)?;

        // Exit status 1 means the key is not set.
        match output.status.code() {
            Some(0) => {
                let value = stdout_line(&output);
                Ok((!value.is_empty()).then_some(value))
            }
            Some(1) => Ok(None),
            _ => Err(failure(&args, &output)),
        }
    }
}
