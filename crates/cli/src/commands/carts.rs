//! Cart commands.

use clap::Subcommand;
use serde_json::Value;
use storedeck_core::{CartId, NewCart, UserId};

use super::{CliError, Context, parse_data, print_response};

#[derive(Subcommand)]
pub enum CartAction {
    /// List all carts
    List,
    /// Show one cart
    Get { id: CartId },
    /// Create a cart from a JSON object (`userId`, `date`, `products`)
    Create {
        #[arg(long)]
        data: String,
    },
    /// Replace fields of a cart
    Update {
        id: CartId,
        #[arg(long)]
        data: String,
    },
    /// Delete a cart
    Delete { id: CartId },
    /// List a user's carts
    User { user_id: UserId },
}

pub async fn run(ctx: &Context, action: CartAction) -> Result<(), CliError> {
    let carts = ctx.client.carts();

    let response = match action {
        CartAction::List => carts.list().await?,
        CartAction::Get { id } => carts.get(id).await?,
        CartAction::Create { data } => {
            let cart: NewCart = parse_data(&data)?;
            carts.create(&cart).await?
        }
        CartAction::Update { id, data } => {
            let patch: Value = parse_data(&data)?;
            carts.update(id, &patch).await?
        }
        CartAction::Delete { id } => carts.delete(id).await?,
        CartAction::User { user_id } => carts.for_user(user_id).await?,
    };

    print_response(&response)
}
