//! Integration tests for StoreDeck.
//!
//! Each test starts a local `wiremock` server standing in for the store API
//! and drives the admin library against it.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storedeck-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use storedeck_admin::config::ApiConfig;
use storedeck_admin::credentials::{Anonymous, CredentialProvider};
use storedeck_admin::{ApiClient, ApiError};
use wiremock::MockServer;

/// A mock store API and a client pointed at it.
pub struct TestContext {
    pub server: MockServer,
    pub client: ApiClient,
}

impl TestContext {
    /// Anonymous client against a fresh mock server.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built.
    pub async fn new() -> Result<Self, ApiError> {
        Self::with_credentials(Arc::new(Anonymous)).await
    }

    /// Client using `credentials` against a fresh mock server.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built.
    pub async fn with_credentials(
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ApiError> {
        let server = MockServer::start().await;
        let config = ApiConfig::new(&server.uri())
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let client = ApiClient::new(&config, credentials)?;
        Ok(Self { server, client })
    }
}
