//! Dashboard overview: collection sizes fetched concurrently.

use serde::Serialize;
use storedeck_admin::ApiClient;
use storedeck_core::{Cart, Product, User};
use tracing::info;

use super::{CliError, Context, print_json};

/// Collection sizes shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub products: usize,
    pub carts: usize,
    pub users: usize,
    pub units_in_carts: u32,
}

/// Fetch products, carts and users at the same time and count them.
pub async fn fetch(client: &ApiClient) -> Result<Overview, CliError> {
    let (products, carts, users) = tokio::join!(
        client.products().list(),
        client.carts().list(),
        client.users().list(),
    );

    let products: Vec<Product> = products?.parse()?;
    let carts: Vec<Cart> = carts?.parse()?;
    let users: Vec<User> = users?.parse()?;

    let overview = Overview {
        products: products.len(),
        carts: carts.len(),
        users: users.len(),
        units_in_carts: carts.iter().map(Cart::total_quantity).sum(),
    };
    info!(
        products = overview.products,
        carts = overview.carts,
        users = overview.users,
        "Fetched overview"
    );
    Ok(overview)
}

pub async fn run(ctx: &Context) -> Result<(), CliError> {
    let overview = fetch(&ctx.client).await?;
    let value = serde_json::to_value(overview).map_err(std::io::Error::other)?;
    print_json(&value)
}
