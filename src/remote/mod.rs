//! Remote repository access.
//!
//! - [`identity`] - remote URL normalization and API base selection
//! - [`credentials`] - token lookup across environment, netrc and git config
//! - [`netrc`] - netrc file parsing
//! - [`api`] - the commit status API client

pub mod api;
pub mod credentials;
pub mod identity;
pub mod netrc;

pub use api::{ClientOptions, StatusClient, StatusRecord, DEFAULT_TIMEOUT};
pub use credentials::{CredentialResolver, Token, TokenSource, TOKEN_CONFIG_KEY, TOKEN_ENV};
pub use identity::{RemoteIdentity, PUBLIC_API_BASE, PUBLIC_HOST};
pub use netrc::{Netrc, NetrcEntry};
