//! Request description, response shape and de-duplication keys.

use std::collections::BTreeMap;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::error::ApiError;

/// HTTP methods used by the store API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Upper-case method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
        }
    }
}

/// Options for a single call to [`ApiClient::request`](super::ApiClient::request).
///
/// The default is a plain `GET` with no extra headers and no body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// HTTP method.
    pub method: Method,
    /// Extra headers, merged over `Content-Type: application/json`.
    pub headers: BTreeMap<String, String>,
    /// Pre-serialized JSON body.
    pub body: Option<String>,
}

impl RequestOptions {
    /// Options for the given method.
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Add or replace a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Use an already-serialized body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidRequest` if `value` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_string(value)
            .map_err(|e| ApiError::InvalidRequest(format!("cannot serialize body: {e}")))?;
        Ok(self.body(body))
    }

    /// De-duplication key: `path` joined to a canonical serialization of the
    /// options.
    ///
    /// Header names are lower-cased and sorted, and a JSON body has its object
    /// keys sorted, so option sets that differ only in ordering or header case
    /// share a key.
    #[must_use]
    pub fn dedup_key(&self, path: &str) -> String {
        #[derive(Serialize)]
        struct Canonical<'a> {
            method: Method,
            headers: BTreeMap<String, &'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            body: Option<Value>,
        }

        let canonical = Canonical {
            method: self.method,
            headers: self
                .headers
                .iter()
                .map(|(name, value)| (name.to_ascii_lowercase(), value.as_str()))
                .collect(),
            body: self.body.as_deref().map(|body| {
                serde_json::from_str::<Value>(body)
                    .map_or_else(|_| Value::String(body.to_owned()), sort_keys)
            }),
        };

        let options = serde_json::to_string(&canonical).unwrap_or_default();
        format!("{path}-{options}")
    }

    /// Outbound headers: `Content-Type: application/json`, then the caller's
    /// headers, then `Authorization: Bearer <token>` when a token is present.
    pub(crate) fn outbound_headers(
        &self,
        token: Option<&SecretString>,
    ) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::InvalidRequest(format!("header name {name:?}: {e}")))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::InvalidRequest(format!("header {name}: {e}")))?;
            headers.insert(header_name, header_value);
        }

        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|e| ApiError::InvalidRequest(format!("bearer token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }
}

/// Rebuild a JSON value with every object's keys in sorted order.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().map(|(k, v)| (k, sort_keys(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// A successful API response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code (always 2xx).
    pub status: u16,
    /// Parsed JSON body.
    pub data: Value,
}

impl ApiResponse {
    /// Deserialize `data` into a typed model.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Parse` if `data` does not match `T`.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(T::deserialize(&self.data)?)
    }

    /// Take the JSON body.
    #[must_use]
    pub fn into_data(self) -> Value {
        self.data
    }
}
