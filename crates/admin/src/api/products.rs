//! Product catalog operations.

use serde::Serialize;
use storedeck_core::ProductId;
use tracing::instrument;

use super::{ApiClient, ApiResponse, Method, RequestOptions};
use crate::error::ApiError;

/// Product resource group.
#[derive(Debug, Clone, Copy)]
pub struct Products<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Product operations.
    #[must_use]
    pub const fn products(&self) -> Products<'_> {
        Products { client: self }
    }
}

impl Products<'_> {
    /// List all products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list(self) -> Result<ApiResponse, ApiError> {
        self.client.get("/products").await
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` with status 404 if the product does not exist.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get(self, id: ProductId) -> Result<ApiResponse, ApiError> {
        self.client.get(&format!("/products/{id}")).await
    }

    /// Create a product. `product` is serialized as the request body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be serialized or the request fails.
    #[instrument(skip(self, product))]
    pub async fn create<T: Serialize + ?Sized>(self, product: &T) -> Result<ApiResponse, ApiError> {
        self.client.send_json(Method::Post, "/products", product).await
    }

    /// Replace a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be serialized or the request fails.
    #[instrument(skip(self, product), fields(product_id = %id))]
    pub async fn update<T: Serialize + ?Sized>(
        self,
        id: ProductId,
        product: &T,
    ) -> Result<ApiResponse, ApiError> {
        self.client
            .send_json(Method::Put, &format!("/products/{id}"), product)
            .await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete(self, id: ProductId) -> Result<ApiResponse, ApiError> {
        self.client
            .request(&format!("/products/{id}"), RequestOptions::new(Method::Delete))
            .await
    }

    /// List category names.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn categories(self) -> Result<ApiResponse, ApiError> {
        self.client.get("/products/categories").await
    }

    /// List products in a category. The name is percent-encoded into the path.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, category), fields(category = %category))]
    pub async fn in_category(self, category: &str) -> Result<ApiResponse, ApiError> {
        let path = format!("/products/category/{}", urlencoding::encode(category));
        self.client.get(&path).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use serde_json::json;
    use storedeck_core::{NewProduct, Product};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ApiConfig;
    use crate::credentials::Anonymous;

    fn client_for(server: &MockServer) -> ApiClient {
        let config = ApiConfig::new(&server.uri()).unwrap();
        ApiClient::new(&config, Arc::new(Anonymous)).unwrap()
    }

    #[tokio::test]
    async fn test_create_posts_serialized_product() {
        let server = MockServer::start().await;
        let product = NewProduct {
            title: "Desk Lamp".to_owned(),
            price: Decimal::new(1350, 2),
            description: "Warm white".to_owned(),
            category: "electronics".to_owned(),
            image: "https://i.pravatar.cc".to_owned(),
        };
        Mock::given(method("POST"))
            .and(path("/products"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "title": "Desk Lamp",
                "price": 13.5,
                "description": "Warm white",
                "category": "electronics",
                "image": "https://i.pravatar.cc"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 21,
                "title": "Desk Lamp",
                "price": 13.5,
                "description": "Warm white",
                "category": "electronics",
                "image": "https://i.pravatar.cc"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server).products().create(&product).await.unwrap();
        let created: Product = response.parse().unwrap();

        assert_eq!(created.id, ProductId::new(21));
        server.verify().await;
    }

    #[tokio::test]
    async fn test_update_and_delete_target_item_path() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/products/7"))
            .and(body_json(json!({ "title": "Renamed" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 7 })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/products/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 7 })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let id = ProductId::new(7);
        client
            .products()
            .update(id, &json!({ "title": "Renamed" }))
            .await
            .unwrap();
        client.products().delete(id).await.unwrap();
        server.verify().await;
    }

    #[tokio::test]
    async fn test_in_category_encodes_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/category/men%27s%20clothing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .products()
            .in_category("men's clothing")
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(
            requests.first().unwrap().url.path(),
            "/products/category/men%27s%20clothing"
        );
    }
}
