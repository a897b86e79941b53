//! Command implementations.
//!
//! Each command is a thin caller of the admin library: it issues one or more
//! API calls and prints the JSON result on stdout.

pub mod carts;
pub mod overview;
pub mod products;
pub mod session;
pub mod users;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use storedeck_admin::config::ConfigError;
use storedeck_admin::{ApiClient, ApiError, ApiResponse, SessionError, SessionStore};
use thiserror::Error;

/// Errors surfaced to `main`.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Invalid --data: {0}")]
    InvalidData(String),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Shared state for a single invocation.
pub struct Context {
    pub client: ApiClient,
    pub store: Arc<SessionStore>,
}

/// Parse a `--data` argument into the expected payload shape.
pub fn parse_data<T: DeserializeOwned>(data: &str) -> Result<T, CliError> {
    serde_json::from_str(data).map_err(|e| CliError::InvalidData(e.to_string()))
}

/// Print a response body as pretty JSON.
pub fn print_response(response: &ApiResponse) -> Result<(), CliError> {
    print_json(&response.data)
}

/// Print any JSON value.
#[allow(clippy::print_stdout)]
pub fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use storedeck_core::NewProduct;

    use super::*;

    #[test]
    fn test_parse_data_typed() {
        let product: NewProduct = parse_data(
            r#"{"title":"Lamp","price":13.5,"description":"d","category":"c","image":"i"}"#,
        )
        .unwrap();
        assert_eq!(product.title, "Lamp");
    }

    #[test]
    fn test_parse_data_rejects_wrong_shape() {
        let err = parse_data::<NewProduct>(r#"{"title":"Lamp"}"#).unwrap_err();
        assert!(matches!(err, CliError::InvalidData(_)));
    }
}
