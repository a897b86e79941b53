//! Core types for StoreDeck.
//!
//! Models mirror the JSON documents served by the store API.

pub mod auth;
pub mod cart;
pub mod id;
pub mod product;
pub mod user;

pub use auth::AuthToken;
pub use cart::{Cart, CartLine, NewCart};
pub use id::*;
pub use product::{NewProduct, Product, Rating};
pub use user::{Address, Geolocation, NewUser, PersonName, User};
