/// Uniform error response bodies
///
/// Every error status leaving the service carries the same JSON body:
///
/// ```json
/// {
///   "statusCode": "UNAUTHENTICATED",
///   "message": "Authentication is required to access this resource",
///   "method": "GET",
///   "path": "/v1/users",
///   "timestamp": "2024-01-01T00:00:00+00:00"
/// }
/// ```
///
/// Handlers and inner middleware return bare statuses tagged with an
/// `ErrorCode` extension; responses the router generates itself (missing
/// routes, wrong methods, body rejections) arrive untagged and are mapped by
/// status. This layer sits outside everything except CORS so no failure path
/// can bypass it.

use crate::error::{ErrorBody, ErrorCode};
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

/// Rewrites every error response into the uniform envelope.
pub async fn render_failures(req: Request, next: Next) -> Response {
    // Captured up front; the request is consumed by the inner stack.
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let code = response
        .extensions()
        .get::<ErrorCode>()
        .copied()
        .unwrap_or_else(|| ErrorCode::from_status(status));

    let body = ErrorBody {
        status_code: code.as_str().to_string(),
        message: code.message().to_string(),
        method,
        path,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, ApiResult};
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt as _;

    async fn missing() -> ApiResult<&'static str> {
        Err(ApiError::NotFound)
    }

    async fn healthy() -> &'static str {
        "ok"
    }

    fn app() -> Router {
        Router::new()
            .route("/widgets", get(missing))
            .route("/up", get(healthy))
            .layer(axum::middleware::from_fn(render_failures))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_tagged_errors_render_their_code() {
        let request = HttpRequest::builder()
            .method("GET")
            .uri("/widgets")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["statusCode"], "NOT_FOUND");
        assert_eq!(body["message"], "Resource not found");
        assert_eq!(body["method"], "GET");
        assert_eq!(body["path"], "/widgets");
        assert!(chrono::DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_router_fallback_is_mapped_by_status() {
        let request = HttpRequest::builder()
            .method("GET")
            .uri("/nowhere")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["statusCode"], "NOT_FOUND");
        assert_eq!(body["path"], "/nowhere");
    }

    #[tokio::test]
    async fn test_wrong_method_renders_method_not_allowed() {
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/up")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let body = body_json(response).await;
        assert_eq!(body["statusCode"], "METHOD_NOT_ALLOWED");
        assert_eq!(body["message"], "Method not allowed for this resource");
    }

    #[tokio::test]
    async fn test_success_responses_pass_through() {
        let request = HttpRequest::builder()
            .method("GET")
            .uri("/up")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"ok");
    }
}
