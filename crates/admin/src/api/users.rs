//! User account operations.

use serde::Serialize;
use storedeck_core::UserId;
use tracing::instrument;

use super::{ApiClient, ApiResponse, Method, RequestOptions};
use crate::error::ApiError;

/// User resource group.
#[derive(Debug, Clone, Copy)]
pub struct Users<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// User operations.
    #[must_use]
    pub const fn users(&self) -> Users<'_> {
        Users { client: self }
    }
}

impl Users<'_> {
    /// List all users.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list(self) -> Result<ApiResponse, ApiError> {
        self.client.get("/users").await
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn get(self, id: UserId) -> Result<ApiResponse, ApiError> {
        self.client.get(&format!("/users/{id}")).await
    }

    /// Register a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be serialized or the request fails.
    #[instrument(skip(self, user))]
    pub async fn create<T: Serialize + ?Sized>(self, user: &T) -> Result<ApiResponse, ApiError> {
        self.client.send_json(Method::Post, "/users", user).await
    }

    /// Replace a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be serialized or the request fails.
    #[instrument(skip(self, user), fields(user_id = %id))]
    pub async fn update<T: Serialize + ?Sized>(
        self,
        id: UserId,
        user: &T,
    ) -> Result<ApiResponse, ApiError> {
        self.client
            .send_json(Method::Put, &format!("/users/{id}"), user)
            .await
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete(self, id: UserId) -> Result<ApiResponse, ApiError> {
        self.client
            .request(&format!("/users/{id}"), RequestOptions::new(Method::Delete))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use storedeck_core::User;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ApiConfig;
    use crate::credentials::Anonymous;

    fn client_for(server: &MockServer) -> ApiClient {
        let config = ApiConfig::new(&server.uri()).unwrap();
        ApiClient::new(&config, Arc::new(Anonymous)).unwrap()
    }

    #[tokio::test]
    async fn test_list_parses_users() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 1, "email": "john@gmail.com", "username": "johnd" },
                { "id": 2, "email": "morrison@gmail.com", "username": "mor_2314" }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let users: Vec<User> = client_for(&server)
            .users()
            .list()
            .await
            .unwrap()
            .parse()
            .unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[1].username, "mor_2314");
        server.verify().await;
    }

    #[tokio::test]
    async fn test_get_uses_user_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 3, "email": "kevin@gmail.com", "username": "kevinryan"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let user: User = client_for(&server)
            .users()
            .get(UserId::new(3))
            .await
            .unwrap()
            .parse()
            .unwrap();

        assert_eq!(user.id, UserId::new(3));
        server.verify().await;
    }

    #[tokio::test]
    async fn test_update_puts_body() {
        let server = MockServer::start().await;
        let patch = json!({ "email": "new@gmail.com" });
        Mock::given(method("PUT"))
            .and(path("/users/7"))
            .and(body_json(&patch))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 7 })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .users()
            .update(UserId::new(7), &patch)
            .await
            .unwrap();

        assert_eq!(response.data["id"], 7);
        server.verify().await;
    }

    #[tokio::test]
    async fn test_delete_uses_delete_method() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/users/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 7 })))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .users()
            .delete(UserId::new(7))
            .await
            .unwrap();

        server.verify().await;
    }
}
