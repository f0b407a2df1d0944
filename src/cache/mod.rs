//! Revision status caching.
//!
//! This module persists the last observed CI status of each revision and
//! decides, per status, how long that observation may be reused before the
//! remote API is asked again.

pub mod entry;
pub mod policy;
pub mod store;

pub use entry::{CommitStatus, RevisionEntry};
pub use policy::{MarkRule, StatusPolicy, Ttl};
pub use store::{cache_path, StatusCache, CACHE_DIR, CACHE_FILE};
