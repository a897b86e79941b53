//! Cart operations.

use serde::Serialize;
use storedeck_core::{CartId, UserId};
use tracing::instrument;

use super::{ApiClient, ApiResponse, Method, RequestOptions};
use crate::error::ApiError;

/// Cart resource group.
#[derive(Debug, Clone, Copy)]
pub struct Carts<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Cart operations.
    #[must_use]
    pub const fn carts(&self) -> Carts<'_> {
        Carts { client: self }
    }
}

impl Carts<'_> {
    /// List all carts.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list(self) -> Result<ApiResponse, ApiError> {
        self.client.get("/carts").await
    }

    /// Get a cart by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(cart_id = %id))]
    pub async fn get(self, id: CartId) -> Result<ApiResponse, ApiError> {
        self.client.get(&format!("/carts/{id}")).await
    }

    /// Create a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be serialized or the request fails.
    #[instrument(skip(self, cart))]
    pub async fn create<T: Serialize + ?Sized>(self, cart: &T) -> Result<ApiResponse, ApiError> {
        self.client.send_json(Method::Post, "/carts", cart).await
    }

    /// Replace a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be serialized or the request fails.
    #[instrument(skip(self, cart), fields(cart_id = %id))]
    pub async fn update<T: Serialize + ?Sized>(
        self,
        id: CartId,
        cart: &T,
    ) -> Result<ApiResponse, ApiError> {
        self.client
            .send_json(Method::Put, &format!("/carts/{id}"), cart)
            .await
    }

    /// Delete a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(cart_id = %id))]
    pub async fn delete(self, id: CartId) -> Result<ApiResponse, ApiError> {
        self.client
            .request(&format!("/carts/{id}"), RequestOptions::new(Method::Delete))
            .await
    }

    /// Carts belonging to a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn for_user(self, user_id: UserId) -> Result<ApiResponse, ApiError> {
        self.client.get(&format!("/carts/user/{user_id}")).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use storedeck_core::Cart;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ApiConfig;
    use crate::credentials::Anonymous;

    fn client_for(server: &MockServer) -> ApiClient {
        let config = ApiConfig::new(&server.uri()).unwrap();
        ApiClient::new(&config, Arc::new(Anonymous)).unwrap()
    }

    fn cart_json(id: u32, user_id: u32) -> serde_json::Value {
        json!({
            "id": id,
            "userId": user_id,
            "date": "2020-03-02T00:00:00.000Z",
            "products": [{ "productId": 1, "quantity": 2 }]
        })
    }

    #[tokio::test]
    async fn test_list_parses_carts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/carts"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([cart_json(1, 1), cart_json(2, 3)])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let carts: Vec<Cart> = client_for(&server)
            .carts()
            .list()
            .await
            .unwrap()
            .parse()
            .unwrap();

        assert_eq!(carts.len(), 2);
        assert_eq!(carts[1].user_id, UserId::new(3));
        server.verify().await;
    }

    #[tokio::test]
    async fn test_get_uses_cart_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/carts/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(cart_json(5, 1)))
            .expect(1)
            .mount(&server)
            .await;

        let cart: Cart = client_for(&server)
            .carts()
            .get(CartId::new(5))
            .await
            .unwrap()
            .parse()
            .unwrap();

        assert_eq!(cart.id, CartId::new(5));
        assert_eq!(cart.total_quantity(), 2);
        server.verify().await;
    }

    #[tokio::test]
    async fn test_for_user_parses_carts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/carts/user/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": 4,
                "userId": 2,
                "date": "2020-01-01T00:00:00.000Z",
                "products": [{ "productId": 1, "quantity": 4 }]
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let carts: Vec<Cart> = client_for(&server)
            .carts()
            .for_user(UserId::new(2))
            .await
            .unwrap()
            .parse()
            .unwrap();

        assert_eq!(carts.len(), 1);
        assert_eq!(carts[0].user_id, UserId::new(2));
        assert_eq!(carts[0].total_quantity(), 4);
        server.verify().await;
    }
}
