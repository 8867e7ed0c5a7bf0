/// Authentication endpoints
///
/// This module provides the public account endpoints:
/// - Sign-up
/// - Sign-in
///
/// # Endpoints
///
/// - `POST /v1/auth/signup` - Register a new account
/// - `POST /v1/auth/signin` - Exchange credentials for a session token

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::users::UserProfile,
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use turnstile_core::auth::password::PasswordHasher;
use turnstile_core::store::{NewUser, UserStore};
use validator::Validate;

/// Role granted to every new account.
const DEFAULT_ROLE: &str = "USER";

/// Sign-up request
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Optional display name
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
}

/// Sign-in request
#[derive(Debug, Deserialize, Validate)]
pub struct SigninRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Sign-in response
#[derive(Debug, Serialize, Deserialize)]
pub struct SigninResponse {
    /// Signed session token
    pub token: String,
}

/// Register a new account
///
/// Validates the request, hashes the password and stores the record. New
/// accounts get the default `USER` role and no token; clients sign in next.
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/signup
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "password1!",
///   "name": "Jane Doe"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `409 Conflict`: Email already exists
/// - `500 Internal Server Error`: Server error
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<UserProfile>)> {
    // The envelope carries no field detail; any validation failure reads
    // as a bad request.
    req.validate().map_err(|_| ApiError::BadRequest)?;

    let password_hash = state.hasher.hash(&req.password)?;

    let user = state
        .store
        .insert(NewUser {
            email: req.email,
            password_hash,
            roles: DEFAULT_ROLE.to_string(),
            name: req.name,
        })
        .await?;

    tracing::info!(email = %user.email, "account created");

    Ok((StatusCode::CREATED, Json(UserProfile::from(&user))))
}

/// Exchange credentials for a session token
///
/// An unknown email and a wrong password produce the same 401 response.
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/signin
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "password1!"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "token": "eyJ..."
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `401 Unauthorized`: Invalid credentials
/// - `500 Internal Server Error`: Server error
pub async fn signin(
    State(state): State<AppState>,
    Json(req): Json<SigninRequest>,
) -> ApiResult<Json<SigninResponse>> {
    req.validate().map_err(|_| ApiError::BadRequest)?;

    let token = state.issuer.sign_in(&req.email, &req.password).await?;

    Ok(Json(SigninResponse { token }))
}
