//! Shopping cart models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{CartId, ProductId, UserId};

/// One product line in a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A shopping cart belonging to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Cart ID.
    pub id: CartId,
    /// Owner of the cart.
    pub user_id: UserId,
    /// When the cart was created.
    pub date: DateTime<Utc>,
    /// Product lines.
    #[serde(default)]
    pub products: Vec<CartLine>,
}

impl Cart {
    /// Total number of units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.products.iter().map(|line| line.quantity).sum()
    }
}

/// Payload for creating or replacing a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCart {
    pub user_id: UserId,
    pub date: DateTime<Utc>,
    pub products: Vec<CartLine>,
}
