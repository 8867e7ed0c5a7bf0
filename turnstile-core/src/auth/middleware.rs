/// Request authentication middleware
///
/// Runs once per inbound request, before dispatch. Extracts the session
/// token from the configured header, decodes it, and attaches the
/// [`AuthOutcome`] to request extensions. The middleware itself never
/// rejects a request; it only records the outcome, and the access guard
/// downstream decides.
///
/// The header value is the raw token string with no scheme prefix; a value
/// of `Bearer <token>` will not decode. The default header name is
/// `Authorization` (see [`crate::config::AuthConfig`]).

use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};

use super::principal::{AuthOutcome, Principal};
use super::token::{DecodeError, TokenCodec};
use crate::config::AuthConfig;

/// Computes the authentication outcome of each inbound request.
#[derive(Clone)]
pub struct RequestAuthenticator {
    codec: TokenCodec,
    header_name: String,
}

impl RequestAuthenticator {
    /// Creates an authenticator reading the header named in `config`.
    pub fn new(codec: TokenCodec, config: &AuthConfig) -> Self {
        Self {
            codec,
            header_name: config.header_name.clone(),
        }
    }

    /// Inspects the headers and produces the outcome.
    ///
    /// Absent or blank header → [`AuthOutcome::Anonymous`]. A presented
    /// value that fails to decode → [`AuthOutcome::Invalid`], logged at WARN
    /// so failed presentations are auditable.
    pub fn authenticate(&self, headers: &HeaderMap) -> AuthOutcome {
        let value = match headers.get(self.header_name.as_str()) {
            None => return AuthOutcome::Anonymous,
            Some(value) => match value.to_str() {
                Ok(s) => s.trim(),
                Err(_) => {
                    tracing::warn!(header = %self.header_name, "rejected non-ASCII token header");
                    return AuthOutcome::Invalid(DecodeError::Malformed);
                }
            },
        };

        if value.is_empty() {
            return AuthOutcome::Anonymous;
        }

        match self.codec.decode(value) {
            Ok(claims) => AuthOutcome::Authenticated(Principal::new(claims.sub, claims.roles)),
            Err(reason) => {
                tracing::warn!(%reason, "rejected token presentation");
                AuthOutcome::Invalid(reason)
            }
        }
    }
}

/// Axum middleware around [`RequestAuthenticator::authenticate`].
///
/// Inserts the outcome (and, when authenticated, the [`Principal`] itself)
/// into request extensions, then always forwards the request.
pub async fn authenticate_request(
    authenticator: RequestAuthenticator,
    mut req: Request,
    next: Next,
) -> Response {
    let outcome = authenticator.authenticate(req.headers());

    if let AuthOutcome::Authenticated(principal) = &outcome {
        req.extensions_mut().insert(principal.clone());
    }
    req.extensions_mut().insert(outcome);

    next.run(req).await
}
