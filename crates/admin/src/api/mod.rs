//! Request coordinator for the store REST API.
//!
//! Every outbound call goes through [`ApiClient::request`], which:
//!
//! - collapses concurrent identical requests (same path, same canonical
//!   options) into a single network call whose outcome every caller receives
//! - attaches `Authorization: Bearer <token>` when the injected
//!   [`CredentialProvider`] has a token
//! - publishes an [`Activity`] snapshot (loading flag, last error message,
//!   in-flight count) that UI-like collaborators can watch
//!
//! Resource groups ([`Products`], [`Carts`], [`Users`], [`Auth`]) are thin
//! borrowing wrappers that fix path, method and body shape.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storedeck_admin::{ApiClient, config::ApiConfig, credentials::Anonymous};
//!
//! let client = ApiClient::new(&ApiConfig::new("https://fakestoreapi.com")?, Arc::new(Anonymous))?;
//!
//! // Both calls share one network round trip
//! let (a, b) = tokio::join!(client.products().list(), client.products().list());
//! assert_eq!(a?, b?);
//! ```

mod auth;
mod carts;
mod products;
mod request;
mod users;

pub use auth::{Auth, LoginCredentials};
pub use carts::Carts;
pub use products::Products;
pub use request::{ApiResponse, Method, RequestOptions};
pub use users::Users;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use secrecy::SecretString;
use serde_json::Value;
use tokio::runtime::Handle;
use tokio::sync::{oneshot, watch};
use tracing::{Instrument, debug, instrument, warn};

use crate::config::ApiConfig;
use crate::credentials::{CredentialProvider, non_empty};
use crate::error::ApiError;

type Outcome = Result<ApiResponse, ApiError>;
type SharedOutcome = Shared<BoxFuture<'static, Outcome>>;

/// Observable coordinator state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Activity {
    /// Set when a request is dispatched, cleared when *that* request settles.
    ///
    /// A single flag shared by all requests: with overlapping requests it can
    /// read `false` while others are still outstanding. Use `in_flight` for
    /// an accurate count.
    pub loading: bool,
    /// Message of the most recent failure, cleared when a request is dispatched.
    pub last_error: Option<String>,
    /// Number of dispatched requests that have not settled yet.
    pub in_flight: usize,
}

/// Client for the store REST API.
///
/// Cheap to clone; clones share the in-flight map and activity state.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    /// Origin without a trailing slash; request paths are appended verbatim.
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
    /// In-flight requests by de-duplication key
    pending: Mutex<HashMap<String, SharedOutcome>>,
    activity: watch::Sender<Activity>,
}

impl ApiClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(
        config: &ApiConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self::with_http_client(http, config, credentials))
    }

    /// Create a client around an existing `reqwest::Client`.
    #[must_use]
    pub fn with_http_client(
        http: reqwest::Client,
        config: &ApiConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        let (activity, _) = watch::channel(Activity::default());

        Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.base_url.as_str().trim_end_matches('/').to_owned(),
                credentials,
                pending: Mutex::new(HashMap::new()),
                activity,
            }),
        }
    }

    /// The origin requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    // =========================================================================
    // Activity
    // =========================================================================

    /// Current activity snapshot.
    #[must_use]
    pub fn activity(&self) -> Activity {
        self.inner.activity.borrow().clone()
    }

    /// Shared loading flag (see [`Activity::loading`]).
    #[must_use]
    pub fn loading(&self) -> bool {
        self.inner.activity.borrow().loading
    }

    /// Message of the most recent failure.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.inner.activity.borrow().last_error.clone()
    }

    /// Number of requests currently on the wire.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.inner.activity.borrow().in_flight
    }

    /// Watch activity changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Activity> {
        self.inner.activity.subscribe()
    }

    /// Number of distinct keys in the in-flight map.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.inner.lock_pending().len()
    }

    /// Whether a request for `path` with `options` is in flight.
    #[must_use]
    pub fn is_pending(&self, path: &str, options: &RequestOptions) -> bool {
        self.inner
            .lock_pending()
            .contains_key(&options.dedup_key(path))
    }

    // =========================================================================
    // Requests
    // =========================================================================

    /// Send a request to `base_url + path`.
    ///
    /// If an identical request (same path, same canonical options) is already
    /// in flight, no new call is made and this caller receives that request's
    /// outcome. Dispatched requests run to completion even if every caller
    /// stops waiting.
    ///
    /// # Errors
    ///
    /// - `ApiError::Http` for a non-2xx status
    /// - `ApiError::Network` for transport failures
    /// - `ApiError::Parse` if the body is not JSON
    /// - `ApiError::InvalidRequest` for unusable headers, or when called
    ///   outside a Tokio runtime
    #[instrument(skip(self, options), fields(method = %options.method, path = %path))]
    pub async fn request(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        let key = options.dedup_key(path);

        let (outcome, dispatch) = {
            let mut pending = self.inner.lock_pending();

            if let Some(existing) = pending.get(&key) {
                debug!("Joining in-flight request");
                (existing.clone(), None)
            } else {
                let runtime = Handle::try_current().map_err(|_| {
                    ApiError::InvalidRequest("no Tokio runtime to run the request on".to_owned())
                })?;
                let (sender, receiver) = oneshot::channel();
                let outcome = async move {
                    receiver.await.unwrap_or_else(|_| {
                        Err(ApiError::Network(
                            "request task ended without a result".to_owned(),
                        ))
                    })
                }
                .boxed()
                .shared();
                pending.insert(key.clone(), outcome.clone());
                (outcome, Some((runtime, key, sender)))
            }
        };

        // Spawned with the map unlocked: a task dropped on spawn settles
        // through its guard, which takes the lock
        if let Some((runtime, key, sender)) = dispatch {
            self.dispatch(&runtime, key, path, options, sender);
        }

        outcome.await
    }

    /// `GET` shorthand.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.request(path, RequestOptions::default()).await
    }

    /// Send `value` as a JSON body.
    async fn send_json<T: serde::Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        value: &T,
    ) -> Outcome {
        let options = RequestOptions::new(method).json(value)?;
        self.request(path, options).await
    }

    /// Start the network call for a key just added to the pending map.
    fn dispatch(
        &self,
        runtime: &Handle,
        key: String,
        path: &str,
        options: RequestOptions,
        sender: oneshot::Sender<Outcome>,
    ) {
        self.inner.activity.send_modify(|activity| {
            activity.loading = true;
            activity.last_error = None;
            activity.in_flight += 1;
        });

        // Owned by the task future, so a task dropped before its first poll
        // still settles
        let guard = SettleGuard {
            inner: Arc::clone(&self.inner),
            key,
        };
        let token = non_empty(self.inner.credentials.bearer_token());
        let url = format!("{}{path}", self.inner.base_url);
        let inner = Arc::clone(&self.inner);

        debug!(%url, authenticated = token.is_some(), "Dispatching request");

        runtime.spawn(
            async move {
                let guard = guard;
                let result = inner.send(&url, &options, token.as_ref()).await;
                if let Err(err) = &result {
                    warn!(error = %err, "Store API request failed");
                    guard.record_error(err);
                }
                drop(guard);
                // Every caller may have gone away
                let _ = sender.send(result);
            }
            .in_current_span(),
        );
    }
}

impl ApiClientInner {
    fn lock_pending(&self) -> MutexGuard<'_, HashMap<String, SharedOutcome>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn send(
        &self,
        url: &str,
        options: &RequestOptions,
        token: Option<&SecretString>,
    ) -> Outcome {
        let headers = options.outbound_headers(token)?;

        let mut builder = self
            .http
            .request(options.method.into(), url)
            .headers(headers);
        if let Some(body) = &options.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        let data: Value = serde_json::from_str(&text)?;

        Ok(ApiResponse {
            status: status.as_u16(),
            data,
        })
    }
}

/// Settles a dispatched request: removes its key and clears the loading flag.
///
/// Runs on drop so a panicking or aborted task cannot leave its key behind.
struct SettleGuard {
    inner: Arc<ApiClientInner>,
    key: String,
}

impl SettleGuard {
    fn record_error(&self, err: &ApiError) {
        let message = err.to_string();
        self.inner.activity.send_modify(|activity| {
            activity.last_error = Some(message);
        });
    }
}

impl Drop for SettleGuard {
    fn drop(&mut self) {
        self.inner.lock_pending().remove(&self.key);
        self.inner.activity.send_modify(|activity| {
            activity.loading = false;
            activity.in_flight = activity.in_flight.saturating_sub(1);
        });
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .field("pending", &self.pending_count())
            .finish_non_exhaustive()
    }
}
