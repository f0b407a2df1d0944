//! Minimal netrc parser.
//!
//! Only `machine` entries are kept; `default` is parsed past but never
//! matched, and `macdef` bodies are skipped up to the next blank line.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Credentials for one `machine` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetrcEntry {
    pub login: Option<String>,
    pub password: Option<String>,
    pub account: Option<String>,
}

/// Parsed netrc file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Netrc {
    machines: HashMap<String, NetrcEntry>,
}

impl Netrc {
    /// Parse netrc content. Unknown tokens are ignored.
    pub fn parse(content: &str) -> Self {
        let mut machines: HashMap<String, NetrcEntry> = HashMap::new();
        // `None` while outside any entry or inside `default`.
        let mut current: Option<String> = None;

        let mut tokens = tokenize(content).into_iter();
        while let Some(token) = tokens.next() {
            match token.as_str() {
                "machine" => current = tokens.next(),
                "default" => current = None,
                "login" | "password" | "account" => {
                    let Some(value) = tokens.next() else { break };
                    let Some(name) = &current else { continue };
                    let entry = machines.entry(name.clone()).or_default();
                    match token.as_str() {
                        "login" => entry.login = Some(value),
                        "password" => entry.password = Some(value),
                        _ => entry.account = Some(value),
                    }
                }
                _ => {}
            }
        }

        Self { machines }
    }

    /// Read and parse a netrc file.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        std::fs::read_to_string(path).map(|content| Self::parse(&content))
    }

    /// Entry for an exact machine name. `default` never matches.
    pub fn machine(&self, name: &str) -> Option<&NetrcEntry> {
        self.machines.get(name)
    }
}

/// Split into whitespace-separated tokens, dropping `macdef` blocks.
fn tokenize(content: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut lines = content.lines();

    while let Some(line) = lines.next() {
        let mut words = line.split_whitespace();
        while let Some(word) = words.next() {
            if word == "macdef" {
                for body in lines.by_ref() {
                    if body.trim().is_empty() {
                        break;
                    }
                }
                break;
            }
            tokens.push(word.to_string());
        }
    }

    tokens
}

/// Location of the user's netrc file: `$NETRC`, else `~/.netrc`
/// (`~/_netrc` on Windows).
pub fn default_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("NETRC").filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }

    let file = if cfg!(windows) { "_netrc" } else { ".netrc" };
    dirs::home_dir().map(|home| home.join(file))
}
