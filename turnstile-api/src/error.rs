/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>`; the error converts to a bare
/// status plus an `ErrorCode` extension, and the envelope middleware renders
/// the uniform body. Clients only ever see entries of the static code table.
///
/// # Example
///
/// ```
/// use turnstile_api::error::{ApiError, ApiResult};
/// use axum::Json;
///
/// async fn handler() -> ApiResult<Json<serde_json::Value>> {
///     Err(ApiError::NotFound)
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use turnstile_core::auth::password::PasswordError;
use turnstile_core::auth::verifier::AuthError;
use turnstile_core::store::StoreError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Machine codes of the static error table
///
/// Every failure leaving the service renders as exactly one of these. The
/// code string and message are fixed; internal detail never reaches a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Failed sign-in (401)
    InvalidRequest,

    /// Missing or unusable authentication (401)
    Unauthenticated,

    /// Authenticated but not permitted (403)
    Forbidden,

    /// Malformed request body or parameters (400)
    BadRequest,

    /// Resource not found (404)
    NotFound,

    /// Method not supported on the route (405)
    MethodNotAllowed,

    /// Resource already exists (409)
    Conflict,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status for this code
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidRequest => StatusCode::UNAUTHORIZED,
            ErrorCode::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine code string placed in the response body
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidRequest => "INVALID_REQUEST",
            ErrorCode::Unauthenticated => "UNAUTHENTICATED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::Internal => "INTERNAL_ERROR",
        }
    }

    /// Fixed human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::Unauthenticated => {
                "Authentication is required to access this resource"
            }
            ErrorCode::Forbidden => "Access to this resource is denied",
            ErrorCode::BadRequest => "Request could not be processed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::MethodNotAllowed => "Method not allowed for this resource",
            ErrorCode::Conflict => "Resource already exists",
            ErrorCode::Internal => "An internal error occurred",
        }
    }

    /// Nearest table entry for a status produced outside `ApiError`
    ///
    /// Router-generated rejections (missing routes, wrong methods, body
    /// extraction failures) reach the envelope without a code extension; this
    /// picks the entry their status reads as. 401 resolves to the generic
    /// `Unauthenticated` since a failed sign-in always carries its own code.
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            401 => ErrorCode::Unauthenticated,
            403 => ErrorCode::Forbidden,
            404 => ErrorCode::NotFound,
            405 => ErrorCode::MethodNotAllowed,
            409 => ErrorCode::Conflict,
            400..=499 => ErrorCode::BadRequest,
            _ => ErrorCode::Internal,
        }
    }
}

/// Uniform error response body
///
/// Rendered by the envelope middleware for every error status.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Machine code (e.g. "UNAUTHENTICATED")
    pub status_code: String,

    /// Fixed human-readable message for the code
    pub message: String,

    /// Request method
    pub method: String,

    /// Request path
    pub path: String,

    /// RFC 3339 time the failure was rendered
    pub timestamp: String,
}

/// Unified API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Failed sign-in (401); unknown identifier and wrong password alike
    #[error("invalid request")]
    InvalidRequest,

    /// Request lacks an authenticated principal (401)
    #[error("authentication required")]
    Unauthenticated,

    /// Authenticated but not permitted (403); reserved, no handler emits it yet
    #[error("access denied")]
    Forbidden,

    /// Malformed request body or parameters (400)
    #[error("bad request")]
    BadRequest,

    /// Resource not found (404)
    #[error("resource not found")]
    NotFound,

    /// Resource already exists (409)
    #[error("resource already exists")]
    Conflict,

    /// Internal server error (500); the detail is logged, never sent
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// The static-table entry this error renders as
    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::InvalidRequest => ErrorCode::InvalidRequest,
            ApiError::Unauthenticated => ErrorCode::Unauthenticated,
            ApiError::Forbidden => ErrorCode::Forbidden,
            ApiError::BadRequest => ErrorCode::BadRequest,
            ApiError::NotFound => ErrorCode::NotFound,
            ApiError::Conflict => ErrorCode::Conflict,
            ApiError::Internal(_) => ErrorCode::Internal,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            // Log internal errors but don't expose details to clients
            tracing::error!("Internal error: {}", detail);
        }

        let code = self.code();
        let mut response = code.status().into_response();
        response.extensions_mut().insert(code);
        response
    }
}

/// Convert credential verification errors to API errors
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::InvalidRequest,
            AuthError::Store(StoreError::Duplicate) => ApiError::Conflict,
            AuthError::Store(StoreError::Unavailable(msg)) => ApiError::Internal(msg),
            AuthError::Password(e) => ApiError::Internal(e.to_string()),
            AuthError::Encode(e) => ApiError::Internal(e.to_string()),
        }
    }
}

/// Convert store errors to API errors
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => ApiError::Conflict,
            StoreError::Unavailable(msg) => ApiError::Internal(msg),
        }
    }
}

/// Convert password errors to API errors
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(format!("Password operation failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_table() {
        let table = [
            (ErrorCode::InvalidRequest, 401, "INVALID_REQUEST", "Invalid request"),
            (
                ErrorCode::Unauthenticated,
                401,
                "UNAUTHENTICATED",
                "Authentication is required to access this resource",
            ),
            (
                ErrorCode::Forbidden,
                403,
                "FORBIDDEN",
                "Access to this resource is denied",
            ),
            (
                ErrorCode::BadRequest,
                400,
                "BAD_REQUEST",
                "Request could not be processed",
            ),
            (ErrorCode::NotFound, 404, "NOT_FOUND", "Resource not found"),
            (
                ErrorCode::MethodNotAllowed,
                405,
                "METHOD_NOT_ALLOWED",
                "Method not allowed for this resource",
            ),
            (ErrorCode::Conflict, 409, "CONFLICT", "Resource already exists"),
            (
                ErrorCode::Internal,
                500,
                "INTERNAL_ERROR",
                "An internal error occurred",
            ),
        ];

        for (code, status, name, message) in table {
            assert_eq!(code.status().as_u16(), status);
            assert_eq!(code.as_str(), name);
            assert_eq!(code.message(), message);
        }
    }

    #[test]
    fn test_from_status_prefers_exact_entries() {
        assert_eq!(
            ErrorCode::from_status(StatusCode::METHOD_NOT_ALLOWED),
            ErrorCode::MethodNotAllowed
        );
        assert_eq!(
            ErrorCode::from_status(StatusCode::NOT_FOUND),
            ErrorCode::NotFound
        );
        assert_eq!(
            ErrorCode::from_status(StatusCode::UNAUTHORIZED),
            ErrorCode::Unauthenticated
        );
    }

    #[test]
    fn test_from_status_falls_back_by_class() {
        assert_eq!(
            ErrorCode::from_status(StatusCode::UNPROCESSABLE_ENTITY),
            ErrorCode::BadRequest
        );
        assert_eq!(
            ErrorCode::from_status(StatusCode::UNSUPPORTED_MEDIA_TYPE),
            ErrorCode::BadRequest
        );
        assert_eq!(
            ErrorCode::from_status(StatusCode::SERVICE_UNAVAILABLE),
            ErrorCode::Internal
        );
    }

    #[test]
    fn test_failed_sign_in_maps_to_invalid_request() {
        let err = ApiError::from(AuthError::InvalidCredentials);
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.code().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_duplicate_maps_to_conflict() {
        let err = ApiError::from(StoreError::Duplicate);
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[test]
    fn test_response_carries_code_extension() {
        let response = ApiError::Unauthenticated.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.extensions().get::<ErrorCode>(),
            Some(&ErrorCode::Unauthenticated)
        );
    }
}
