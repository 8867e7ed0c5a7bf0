/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - A user store seeded with one known identity
/// - Router construction with a fixed test configuration
/// - Token minting helpers (arbitrary lifetime, foreign secret)
/// - Request and response-body helpers

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use serde_json::json;
use tower::ServiceExt as _;
use turnstile_api::app::{build_router, AppState};
use turnstile_api::config::{ApiConfig, AuthSettings, Config};
use turnstile_core::auth::password::{Argon2Hasher, PasswordHasher};
use turnstile_core::auth::token::{Claims, TokenCodec};
use turnstile_core::config::AuthConfig;
use turnstile_core::store::{MemoryUserStore, NewUser, UserStore};

/// Secret every integration test signs with.
pub const TEST_SECRET: &str = "integration-test-secret-32-bytes!!!!";

/// The seeded identity.
pub const SEEDED_EMAIL: &str = "user@example.com";
pub const SEEDED_PASSWORD: &str = "password1!";

/// Test context containing the app and everything needed to drive it
pub struct TestContext {
    pub app: axum::Router,
    pub config: Config,
}

impl TestContext {
    /// Creates a context whose store holds the seeded identity.
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            auth: AuthSettings {
                secret: TEST_SECRET.to_string(),
                header_name: "Authorization".to_string(),
                token_ttl_secs: 60,
            },
        };

        let hasher = Argon2Hasher;
        let store = Arc::new(MemoryUserStore::new());
        store
            .insert(NewUser {
                email: SEEDED_EMAIL.to_string(),
                password_hash: hasher.hash(SEEDED_PASSWORD)?,
                roles: "USER".to_string(),
                name: Some("Test User".to_string()),
            })
            .await?;

        let state = AppState::new(store, config.clone());
        let app = build_router(state);

        Ok(TestContext { app, config })
    }

    /// Mints a token over the test secret with the given lifetime.
    /// A negative lifetime produces an already-expired token.
    pub fn token_with_ttl(&self, subject: &str, ttl_secs: i64) -> String {
        let codec = TokenCodec::new(&self.config.auth_config());
        let claims = Claims::new(
            subject,
            vec!["USER".to_string()],
            chrono::Duration::seconds(ttl_secs),
        );
        codec.sign(&claims).unwrap()
    }

    /// Mints a token signed by a secret this app does not know.
    pub fn foreign_token(&self, subject: &str) -> String {
        let config = AuthConfig::new("some-other-secret-that-is-32-bytes!!");
        let codec = TokenCodec::new(&config);
        codec.encode(subject, &["USER".to_string()]).unwrap()
    }
}

/// Drives one request through the router.
pub async fn send(ctx: &TestContext, request: Request<Body>) -> Response {
    ctx.app.clone().oneshot(request).await.unwrap()
}

/// Posts a sign-in body and returns the raw response.
pub async fn signin(ctx: &TestContext, email: &str, password: &str) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/auth/signin")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "email": email, "password": password }).to_string(),
        ))
        .unwrap();

    send(ctx, request).await
}

/// Signs in as the seeded identity and returns the token.
pub async fn seeded_token(ctx: &TestContext) -> String {
    let response = signin(ctx, SEEDED_EMAIL, SEEDED_PASSWORD).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);

    let body = body_json(response).await;
    body["token"].as_str().unwrap().to_string()
}

/// Reads a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
