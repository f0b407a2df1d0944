//! Per-status display and expiration policy.
//!
//! | status  | mark | color  | TTL     |
//! |---------|------|--------|---------|
//! | unknown | `?`  | none   | 30s     |
//! | failure | `✗`  | red    | forever |
//! | pending | `●`  | yellow | 10s     |
//! | success | `✓`  | green  | forever |
//!
//! Failure and success are final CI outcomes for a revision, so they are
//! never re-queried once observed.

use chrono::{DateTime, Duration, Utc};
use console::Color;

use super::entry::{CommitStatus, RevisionEntry};

/// How long a cached status stays valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// Valid for this long after it was observed.
    For(Duration),
    /// Never expires.
    Forever,
}

impl Ttl {
    /// TTL of `secs` seconds.
    pub fn seconds(secs: i64) -> Self {
        Self::For(Duration::seconds(secs))
    }
}

/// Display and expiration rule for one status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkRule {
    /// Glyph printed for the status.
    pub glyph: &'static str,
    /// Foreground color, or `None` for the terminal default.
    pub color: Option<Color>,
    /// Cache lifetime.
    pub ttl: Ttl,
}

/// Immutable status → rule table, built once and passed by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPolicy {
    pub unknown: MarkRule,
    pub failure: MarkRule,
    pub pending: MarkRule,
    pub success: MarkRule,
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self {
            unknown: MarkRule {
                glyph: "?",
                color: None,
                ttl: Ttl::seconds(30),
            },
            failure: MarkRule {
                glyph: "✗",
                color: Some(Color::Red),
                ttl: Ttl::Forever,
            },
            pending: MarkRule {
                glyph: "●",
                color: Some(Color::Yellow),
                ttl: Ttl::seconds(10),
            },
            success: MarkRule {
                glyph: "✓",
                color: Some(Color::Green),
                ttl: Ttl::Forever,
            },
        }
    }
}

impl StatusPolicy {
    /// Rule for a status.
    pub fn rule(&self, status: CommitStatus) -> &MarkRule {
        match status {
            CommitStatus::Failure => &self.failure,
            CommitStatus::Pending => &self.pending,
            CommitStatus::Success => &self.success,
            CommitStatus::Unknown => &self.unknown,
        }
    }

    /// Whether `entry` can still be served from cache at `now`.
    ///
    /// Expires exactly at `last_modified + ttl`.
    pub fn is_fresh(&self, entry: &RevisionEntry, now: DateTime<Utc>) -> bool {
        match self.rule(entry.status).ttl {
            Ttl::Forever => true,
            Ttl::For(ttl) => entry
                .last_modified
                .checked_add_signed(ttl)
                .is_none_or(|expires_at| now < expires_at),
        }
    }
}
