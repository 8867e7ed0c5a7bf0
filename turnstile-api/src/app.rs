/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use turnstile_api::{app::AppState, config::Config};
/// use turnstile_core::store::MemoryUserStore;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Arc::new(MemoryUserStore::new()), config);
/// let app = turnstile_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use crate::error::ApiError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use turnstile_core::auth::guard::{AccessDecision, AccessGuard};
use turnstile_core::auth::issuer::TokenIssuer;
use turnstile_core::auth::middleware::{authenticate_request, RequestAuthenticator};
use turnstile_core::auth::password::{Argon2Hasher, PasswordHasher};
use turnstile_core::auth::principal::AuthOutcome;
use turnstile_core::auth::token::TokenCodec;
use turnstile_core::auth::verifier::CredentialVerifier;
use turnstile_core::store::UserStore;

/// Routes reachable without authentication. Everything else requires a
/// valid token, including paths that match no route.
const PUBLIC_ROUTES: [&str; 2] = ["/health", "/v1/auth/*"];

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// User persistence capability
    pub store: Arc<dyn UserStore>,

    /// Password hashing capability
    pub hasher: Arc<dyn PasswordHasher>,

    /// Sign-in orchestration
    pub issuer: TokenIssuer,

    /// Per-request token authentication
    pub authenticator: RequestAuthenticator,

    /// Allow-list access policy
    pub guard: AccessGuard,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates application state over the given store
    pub fn new(store: Arc<dyn UserStore>, config: Config) -> Self {
        let auth_config = config.auth_config();
        let codec = TokenCodec::new(&auth_config);
        let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher);

        let verifier = CredentialVerifier::new(store.clone(), hasher.clone());

        Self {
            store,
            hasher,
            issuer: TokenIssuer::new(verifier, codec.clone()),
            authenticator: RequestAuthenticator::new(codec, &auth_config),
            guard: AccessGuard::new(PUBLIC_ROUTES),
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// The router is organized as follows:
/// ```text
/// /
/// ├── /health                   # Health check (public)
/// ├── /v1/                      # API v1 (versioned)
/// │   ├── /auth/                # Account endpoints (public)
/// │   │   ├── POST /signup
/// │   │   └── POST /signin
/// │   └── /users/               # User resources (authenticated)
/// │       ├── GET    /me
/// │       ├── GET    /
/// │       ├── GET    /:email
/// │       └── DELETE /:email
/// ```
///
/// # Middleware Stack
///
/// Applied in order (outermost first):
/// 1. CORS (tower-http CorsLayer)
/// 2. Error envelope (every failure status gets the uniform body)
/// 3. Logging (tower-http TraceLayer)
/// 4. Token authentication (computes the outcome, attaches the principal)
/// 5. Allow-list guard (denies unauthenticated access before dispatch)
///
/// The authentication and guard layers wrap the fallback too: a request for
/// an unknown path is still denied before the 404 unless it is allow-listed
/// or carries a valid token.
pub fn build_router(state: AppState) -> Router {
    // Import route handlers
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Account routes (public, allow-listed)
    let auth_routes = Router::new()
        .route("/signup", post(routes::auth::signup))
        .route("/signin", post(routes::auth::signin));

    // User resource routes (require an authenticated principal)
    let user_routes = Router::new()
        .route("/me", get(routes::users::me))
        .route("/", get(routes::users::list_users))
        .route("/:email", get(routes::users::get_user))
        .route("/:email", delete(routes::users::delete_user));

    // Build complete v1 API
    let v1_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/users", user_routes);

    // Combine all routes with middleware stack
    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            guard_layer,
        ))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            authenticate_layer,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(axum::middleware::from_fn(
            crate::middleware::envelope::render_failures,
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Token authentication middleware layer
///
/// Computes the request's authentication outcome exactly once and attaches
/// it (and the principal, when there is one) to request extensions.
async fn authenticate_layer(State(state): State<AppState>, req: Request, next: Next) -> Response {
    authenticate_request(state.authenticator.clone(), req, next).await
}

/// Allow-list enforcement layer
///
/// Consults the access guard with the outcome computed by
/// `authenticate_layer`; a denied request never reaches a handler.
async fn guard_layer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let outcome = req
        .extensions()
        .get::<AuthOutcome>()
        .cloned()
        .unwrap_or(AuthOutcome::Anonymous);

    match state.guard.evaluate(req.uri().path(), &outcome) {
        AccessDecision::Permitted => Ok(next.run(req).await),
        AccessDecision::Denied => Err(ApiError::Unauthenticated),
    }
}
