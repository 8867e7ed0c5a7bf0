//! # Turnstile API Server
//!
//! Stateless token-authentication service: accounts, sign-in, and a small
//! protected user resource surface.
//!
//! ## Architecture
//!
//! The server is built with Axum and provides:
//! - Account endpoints (signup, signin)
//! - Token-authenticated user endpoints
//! - A uniform error envelope on every failure path
//!
//! ## Usage
//!
//! ```bash
//! JWT_SECRET=$(openssl rand -hex 32) cargo run -p turnstile-api
//! ```

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use turnstile_api::app::{build_router, AppState};
use turnstile_api::config::Config;
use turnstile_core::auth::password::PasswordHasher;
use turnstile_core::store::{MemoryUserStore, NewUser, UserStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "turnstile_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!(
        "Turnstile API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let state = AppState::new(Arc::new(MemoryUserStore::new()), config.clone());
    seed_demo_account(&state).await?;

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Seeds the demo identity so the fresh (empty) memory store is immediately
/// usable: `user@example.com` / `password1!`.
async fn seed_demo_account(state: &AppState) -> anyhow::Result<()> {
    let password_hash = state.hasher.hash("password1!")?;
    state
        .store
        .insert(NewUser {
            email: "user@example.com".to_string(),
            password_hash,
            roles: "USER".to_string(),
            name: Some("Demo User".to_string()),
        })
        .await?;

    tracing::warn!("seeded demo account user@example.com; swap the memory store out before production use");
    Ok(())
}
