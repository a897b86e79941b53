//! Credential providers for the request coordinator.
//!
//! The coordinator never acquires, refreshes or stores tokens. It asks its
//! provider for the current bearer token right before each request and omits
//! the `Authorization` header when there is none.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

/// Source of the bearer token attached to outbound requests.
pub trait CredentialProvider: Send + Sync {
    /// The token to send, if any. Empty tokens are treated as absent.
    fn bearer_token(&self) -> Option<SecretString>;
}

impl<T: CredentialProvider + ?Sized> CredentialProvider for Arc<T> {
    fn bearer_token(&self) -> Option<SecretString> {
        (**self).bearer_token()
    }
}

/// Provider for anonymous access.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl CredentialProvider for Anonymous {
    fn bearer_token(&self) -> Option<SecretString> {
        None
    }
}

/// A fixed token, e.g. one passed on the command line.
#[derive(Clone)]
pub struct StaticToken(SecretString);

impl StaticToken {
    /// Wrap a token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }
}

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> Option<SecretString> {
        Some(self.0.clone())
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StaticToken").field(&"[REDACTED]").finish()
    }
}

/// Drop empty tokens, mirroring a falsy lookup in browser storage.
pub(crate) fn non_empty(token: Option<SecretString>) -> Option<SecretString> {
    token.filter(|t| !t.expose_secret().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_has_no_token() {
        assert!(Anonymous.bearer_token().is_none());
    }

    #[test]
    fn test_static_token_through_arc() {
        let provider: Arc<dyn CredentialProvider> = Arc::new(StaticToken::new("abc"));
        let token = provider.bearer_token();
        assert_eq!(token.map(|t| t.expose_secret().to_owned()), Some("abc".to_owned()));
    }

    #[test]
    fn test_empty_token_is_absent() {
        assert!(non_empty(StaticToken::new("").bearer_token()).is_none());
        assert!(non_empty(StaticToken::new("t").bearer_token()).is_some());
    }

    #[test]
    fn test_static_token_debug_redacts() {
        let debug = format!("{:?}", StaticToken::new("very-secret"));
        assert!(!debug.contains("very-secret"));
    }
}
