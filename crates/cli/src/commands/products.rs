//! Product commands.
//!
//! ```bash
//! storedeck products list
//! storedeck products category "men's clothing"
//! storedeck products create --data '{"title":"Lamp","price":13.5,"description":"","category":"electronics","image":""}'
//! ```

use clap::Subcommand;
use serde_json::Value;
use storedeck_core::{NewProduct, ProductId};

use super::{CliError, Context, parse_data, print_response};

#[derive(Subcommand)]
pub enum ProductAction {
    /// List all products
    List,
    /// Show one product
    Get { id: ProductId },
    /// Create a product from a JSON object
    Create {
        #[arg(long)]
        data: String,
    },
    /// Replace fields of a product
    Update {
        id: ProductId,
        #[arg(long)]
        data: String,
    },
    /// Delete a product
    Delete { id: ProductId },
    /// List category names
    Categories,
    /// List products in a category
    Category { name: String },
}

pub async fn run(ctx: &Context, action: ProductAction) -> Result<(), CliError> {
    let products = ctx.client.products();

    let response = match action {
        ProductAction::List => products.list().await?,
        ProductAction::Get { id } => products.get(id).await?,
        ProductAction::Create { data } => {
            let product: NewProduct = parse_data(&data)?;
            products.create(&product).await?
        }
        ProductAction::Update { id, data } => {
            let patch: Value = parse_data(&data)?;
            products.update(id, &patch).await?
        }
        ProductAction::Delete { id } => products.delete(id).await?,
        ProductAction::Categories => products.categories().await?,
        ProductAction::Category { name } => products.in_category(&name).await?,
    };

    print_response(&response)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use storedeck_admin::config::ApiConfig;
    use storedeck_admin::{ApiClient, SessionStore};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn context_for(server: &MockServer) -> Context {
        let store = Arc::new(SessionStore::in_memory());
        let config = ApiConfig::new(&server.uri()).unwrap();
        let client = ApiClient::new(&config, store.clone()).unwrap();
        Context { client, store }
    }

    #[tokio::test]
    async fn test_create_posts_parsed_product() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/products"))
            .and(body_json(json!({
                "title": "Lamp",
                "price": 13.5,
                "description": "",
                "category": "electronics",
                "image": ""
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 21 })))
            .expect(1)
            .mount(&server)
            .await;

        let data = r#"{"title":"Lamp","price":13.5,"description":"","category":"electronics","image":""}"#;
        run(
            &context_for(&server),
            ProductAction::Create {
                data: data.to_string(),
            },
        )
        .await
        .unwrap();

        server.verify().await;
    }

    #[tokio::test]
    async fn test_invalid_data_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = run(
            &context_for(&server),
            ProductAction::Create {
                data: "{\"title\":".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CliError::InvalidData(_)));
        server.verify().await;
    }

    #[tokio::test]
    async fn test_missing_product_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/99"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let err = run(
            &context_for(&server),
            ProductAction::Get {
                id: ProductId::new(99),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CliError::Api(ref e) if e.is_not_found()));
        server.verify().await;
    }
}
