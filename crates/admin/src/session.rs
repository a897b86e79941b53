//! Session storage and the login/logout flow.
//!
//! A [`SessionStore`] holds the signed-in username and bearer token, optionally
//! persisted as a small JSON file. It is the [`CredentialProvider`] handed to
//! [`ApiClient`], so a successful [`login`] makes every later request carry
//! the token.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use storedeck_core::AuthToken;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::api::{ApiClient, LoginCredentials};
use crate::credentials::CredentialProvider;
use crate::error::ApiError;

/// Token stored by the demo fallback when the API rejects a login.
pub const DEMO_TOKEN: &str = "demo_token_12345";

/// Username of the store API's public demo account.
pub const DEMO_USERNAME: &str = "mor_2314";

/// Password of the store API's public demo account.
pub const DEMO_PASSWORD: &str = "83r5^_";

/// Errors from session storage or login.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The login request failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Reading or writing the session file failed.
    #[error("Session file error: {0}")]
    Io(#[from] io::Error),

    /// The session file exists but does not hold a session.
    #[error("Corrupt session file {path}: {message}")]
    Corrupt { path: PathBuf, message: String },
}

/// A signed-in user.
#[derive(Clone)]
pub struct StoredSession {
    /// Name the user signed in with
    pub username: String,
    /// Bearer token sent with every request
    pub token: SecretString,
}

impl StoredSession {
    /// Session for `username` holding `token`.
    #[must_use]
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: SecretString::from(token.into()),
        }
    }

    /// Offline session carrying [`DEMO_TOKEN`].
    #[must_use]
    pub fn demo(username: impl Into<String>) -> Self {
        Self::new(username, DEMO_TOKEN)
    }
}

impl std::fmt::Debug for StoredSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredSession")
            .field("username", &self.username)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// On-disk shape of the session file.
#[derive(Serialize, Deserialize)]
struct SessionFile {
    username: String,
    token: String,
}

/// Current session, shared with the API client as its credential provider.
#[derive(Debug)]
pub struct SessionStore {
    path: Option<PathBuf>,
    current: RwLock<Option<StoredSession>>,
}

impl SessionStore {
    /// A store that is never written to disk.
    #[must_use]
    pub const fn in_memory() -> Self {
        Self {
            path: None,
            current: RwLock::new(None),
        }
    }

    /// Open a file-backed store. A missing file means nobody is signed in.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` if the file exists but cannot be read, or
    /// `SessionError::Corrupt` if it is not a session file.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();

        let current = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => {
                let file: SessionFile =
                    serde_json::from_str(&contents).map_err(|e| SessionError::Corrupt {
                        path: path.clone(),
                        message: e.to_string(),
                    })?;
                debug!(path = %path.display(), username = %file.username, "Loaded session");
                Some(StoredSession::new(file.username, file.token))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: Some(path),
            current: RwLock::new(current),
        })
    }

    /// Backing file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The signed-in session.
    #[must_use]
    pub fn current(&self) -> Option<StoredSession> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the session and persist it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` if the file cannot be written. The in-memory
    /// session is updated regardless.
    pub async fn save(&self, session: StoredSession) -> Result<(), SessionError> {
        let file = SessionFile {
            username: session.username.clone(),
            token: session.token.expose_secret().to_owned(),
        };
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(session);

        if let Some(path) = &self.path {
            let contents = serde_json::to_string_pretty(&file).map_err(io::Error::other)?;
            tokio::fs::write(path, contents).await?;
            debug!(path = %path.display(), "Saved session");
        }
        Ok(())
    }

    /// Forget the session and remove the file.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` if an existing file cannot be removed.
    pub async fn clear(&self) -> Result<(), SessionError> {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;

        if let Some(path) = &self.path {
            match tokio::fs::remove_file(path).await {
                Ok(()) => debug!(path = %path.display(), "Removed session file"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

impl CredentialProvider for SessionStore {
    fn bearer_token(&self) -> Option<SecretString> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|session| session.token.clone())
    }
}

/// Log in through the API and store the returned token.
///
/// # Errors
///
/// Returns `SessionError::Api` if the login call fails or its response has no
/// `token` string (`ApiError::Parse`), and `SessionError::Io` if the session
/// cannot be saved.
#[instrument(skip(client, store, credentials), fields(username = %credentials.username))]
pub async fn login(
    client: &ApiClient,
    store: &SessionStore,
    credentials: &LoginCredentials,
) -> Result<StoredSession, SessionError> {
    let response = client.auth().login(credentials).await?;

    let AuthToken { token } = response.parse()?;

    let session = StoredSession::new(credentials.username.clone(), token);
    store.save(session.clone()).await?;

    info!("Logged in");
    Ok(session)
}

/// Clear the stored session.
///
/// # Errors
///
/// Returns `SessionError::Io` if the session file cannot be removed.
#[instrument(skip(store))]
pub async fn logout(store: &SessionStore) -> Result<(), SessionError> {
    store.clear().await?;
    info!("Logged out");
    Ok(())
}
