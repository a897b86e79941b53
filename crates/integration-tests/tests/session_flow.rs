//! Login, persisted session and logout against a mock store API.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde_json::json;
use storedeck_admin::api::LoginCredentials;
use storedeck_admin::credentials::CredentialProvider;
use storedeck_admin::session::{self, DEMO_PASSWORD, DEMO_USERNAME};
use storedeck_admin::{ApiError, SessionError, SessionStore};
use storedeck_integration_tests::TestContext;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_login_persists_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("session.json");

    let store = Arc::new(SessionStore::open(&file).await.unwrap());
    let ctx = TestContext::with_credentials(store.clone()).await.unwrap();
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "eyJ.jwt" })))
        .expect(1)
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&ctx.server)
        .await;

    session::login(
        &ctx.client,
        &store,
        &LoginCredentials::new(DEMO_USERNAME, DEMO_PASSWORD),
    )
    .await
    .unwrap();

    // A new process picks the token up from disk
    let reopened = SessionStore::open(&file).await.unwrap();
    assert_eq!(reopened.current().unwrap().username, DEMO_USERNAME);
    assert_eq!(
        reopened.bearer_token().unwrap().expose_secret(),
        "eyJ.jwt"
    );

    ctx.client.users().list().await.unwrap();
    let requests = ctx.server.received_requests().await.unwrap();
    let login = requests.iter().find(|r| r.url.path() == "/auth/login").unwrap();
    let users = requests.iter().find(|r| r.url.path() == "/users").unwrap();
    assert!(login.headers.get("authorization").is_none());
    assert_eq!(users.headers["authorization"], "Bearer eyJ.jwt");

    session::logout(&store).await.unwrap();
    assert!(!file.exists());
    assert!(store.bearer_token().is_none());
    ctx.server.verify().await;
}

#[tokio::test]
async fn test_rejected_login_leaves_store_empty() {
    let store = Arc::new(SessionStore::in_memory());
    let ctx = TestContext::with_credentials(store.clone()).await.unwrap();
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("username or password is incorrect"))
        .mount(&ctx.server)
        .await;

    let err = session::login(&ctx.client, &store, &LoginCredentials::new("x", "y"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SessionError::Api(ApiError::Http { status: 401 })
    ));
    assert!(store.current().is_none());
    assert!(ctx.client.last_error().unwrap().contains("401"));
}
