//! Cached revision entry and status types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// CI status of a revision as reported by the commit status API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CommitStatus {
    /// No status reported yet, or a state this tool does not know.
    #[default]
    Unknown,
    /// At least one check failed.
    Failure,
    /// Checks are still running.
    Pending,
    /// All checks passed.
    Success,
}

impl CommitStatus {
    /// Parse an API or cache `state` string.
    ///
    /// Anything that is not `failure`, `pending` or `success` (the empty
    /// string, GitHub's `error`, states added later) is `Unknown`.
    pub fn from_state(state: &str) -> Self {
        match state {
            "failure" => Self::Failure,
            "pending" => Self::Pending,
            "success" => Self::Success,
            _ => Self::Unknown,
        }
    }

    /// The string stored in the cache file.
    pub fn as_state(self) -> &'static str {
        match self {
            Self::Unknown => "",
            Self::Failure => "failure",
            Self::Pending => "pending",
            Self::Success => "success",
        }
    }
}

impl fmt::Display for CommitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            other => write!(f, "{}", other.as_state()),
        }
    }
}

impl Serialize for CommitStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_state())
    }
}

impl<'de> Deserialize<'de> for CommitStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let state = Option::<String>::deserialize(deserializer)?;
        Ok(state
            .as_deref()
            .map(Self::from_state)
            .unwrap_or(Self::Unknown))
    }
}

/// Last observed state of one revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionEntry {
    /// Observed status.
    #[serde(rename = "Status", default)]
    pub status: CommitStatus,
    /// When the status was observed.
    ///
    /// A missing or unusable timestamp reads as the unix epoch, so only that
    /// entry goes stale instead of the whole cache failing to load.
    #[serde(
        rename = "LastModified",
        serialize_with = "chrono::serde::ts_seconds::serialize",
        deserialize_with = "lenient_seconds",
        default = "unix_epoch"
    )]
    pub last_modified: DateTime<Utc>,
}

fn unix_epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

fn lenient_seconds<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_i64()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(unix_epoch))
}

impl RevisionEntry {
    /// Create an entry observed at `at`.
    pub fn new(status: CommitStatus, at: DateTime<Utc>) -> Self {
        Self {
            status,
            last_modified: at,
        }
    }

    /// Create an entry observed now.
    pub fn observed_now(status: CommitStatus) -> Self {
        Self::new(status, Utc::now())
    }
}

impl Default for RevisionEntry {
    /// An unknown status observed at the unix epoch, so it is never fresh.
    fn default() -> Self {
        Self::new(CommitStatus::Unknown, unix_epoch())
    }
}
