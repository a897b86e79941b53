//! StoreDeck Core - Shared types library.
//!
//! This crate provides the resource models used across all StoreDeck components:
//! - `admin` - Request coordinator, resource groups and session handling
//! - `cli` - Command-line dashboard front end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. The remote
//! store API is not schema-validated by the coordinator, so these models are
//! opt-in: callers deserialize a response into them when they want typed data.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs and the product, cart, user and auth models

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
