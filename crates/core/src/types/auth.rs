//! Authentication response model.

use serde::{Deserialize, Serialize};

/// Token returned by the login endpoint.
///
/// The token is opaque to StoreDeck; it is only ever echoed back in an
/// `Authorization: Bearer` header.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    pub token: String,
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthToken")
            .field("token", &"[REDACTED]")
            .finish()
    }
}
