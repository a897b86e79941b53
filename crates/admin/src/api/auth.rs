//! Login against the store API.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::instrument;

use super::{ApiClient, ApiResponse, Method};
use crate::error::ApiError;

/// Username and password for `/auth/login`.
#[derive(Clone)]
pub struct LoginCredentials {
    /// Account name
    pub username: String,
    /// Account password, redacted from `Debug`
    pub password: SecretString,
}

impl LoginCredentials {
    /// Credentials for `username`; the password is wrapped as a secret.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Auth resource group.
#[derive(Debug, Clone, Copy)]
pub struct Auth<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Auth operations.
    #[must_use]
    pub const fn auth(&self) -> Auth<'_> {
        Auth { client: self }
    }
}

impl Auth<'_> {
    /// Exchange credentials for a token.
    ///
    /// On success `data` is `{"token": "..."}`. Storing the token is up to the
    /// caller; see [`crate::session::login`].
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` with status 401 for rejected credentials.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(self, credentials: &LoginCredentials) -> Result<ApiResponse, ApiError> {
        let body = LoginRequest {
            username: &credentials.username,
            password: credentials.password.expose_secret(),
        };
        self.client
            .send_json(Method::Post, "/auth/login", &body)
            .await
    }
}
