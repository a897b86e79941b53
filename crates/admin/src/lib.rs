//! StoreDeck admin library.
//!
//! Talks to a FakeStore-style REST API on behalf of the dashboard:
//!
//! - [`api`]: the request coordinator ([`ApiClient`]) and its product, cart,
//!   user and auth resource groups
//! - [`session`]: the signed-in session and the login/logout flow
//! - [`credentials`]: how the coordinator obtains a bearer token
//! - [`config`]: environment-driven configuration
//!
//! # Security
//!
//! Bearer tokens and passwords are held as `SecretString` and redacted from
//! `Debug` output. The session file stores the token in plain text; keep it
//! out of shared directories.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod session;

pub use api::{Activity, ApiClient, ApiResponse, Method, RequestOptions};
pub use config::DashboardConfig;
pub use error::ApiError;
pub use session::{SessionError, SessionStore};
