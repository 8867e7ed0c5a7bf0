/// User resource endpoints
///
/// Protected endpoints over the user store. Records are mapped into
/// [`UserProfile`] before leaving a handler; password hashes never appear in
/// a response.
///
/// # Endpoints
///
/// - `GET /v1/users/me` - Profile of the authenticated caller
/// - `GET /v1/users` - List all profiles
/// - `GET /v1/users/:email` - Fetch one profile
/// - `DELETE /v1/users/:email` - Remove an account

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use turnstile_core::auth::principal::Principal;
use turnstile_core::store::{UserRecord, UserStore};

/// User profile as shown to callers
#[derive(Debug, Serialize, Deserialize)]
pub struct UserProfile {
    /// Email address
    pub email: String,

    /// Granted roles
    pub roles: Vec<String>,

    /// Optional display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl From<&UserRecord> for UserProfile {
    fn from(record: &UserRecord) -> Self {
        Self {
            email: record.email.clone(),
            roles: record.role_list(),
            name: record.name.clone(),
            created_at: record.created_at,
        }
    }
}

/// Profile of the authenticated caller
///
/// The subject comes from the request's decoded token. A stale token whose
/// account has since been removed reads as 404.
pub async fn me(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Json<UserProfile>> {
    let user = state
        .store
        .find_by_identifier(&principal.subject)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(UserProfile::from(&user)))
}

/// List all profiles, oldest first
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserProfile>>> {
    let users = state.store.list().await?;

    Ok(Json(users.iter().map(UserProfile::from).collect()))
}

/// Fetch one profile by email
pub async fn get_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<Json<UserProfile>> {
    let user = state
        .store
        .find_by_identifier(&email)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(UserProfile::from(&user)))
}

/// Remove an account
pub async fn delete_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<StatusCode> {
    if state.store.delete(&email).await? {
        tracing::info!(%email, "account removed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
