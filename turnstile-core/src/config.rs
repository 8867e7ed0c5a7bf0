/// Authentication configuration
///
/// Everything the authentication components need is carried in this struct
/// and handed to their constructors at startup. There is no global or
/// lazily-initialized state; tests construct one of these per case.

use chrono::Duration;

/// Default request header carrying the session token.
pub const DEFAULT_HEADER_NAME: &str = "Authorization";

/// Default lifetime of issued tokens, in seconds.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 60;

/// Configuration consumed by the token codec, issuer and request
/// authenticator.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC signing secret. Process-wide, read-only after startup; must be
    /// at least 32 bytes for HS256.
    pub secret: String,

    /// Name of the request header the raw token is read from.
    pub header_name: String,

    /// Lifetime of issued tokens. Short by default; there is no refresh
    /// mechanism, callers sign in again when the token lapses.
    pub token_ttl: Duration,
}

impl AuthConfig {
    /// Creates a configuration with the default header name and TTL.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            header_name: DEFAULT_HEADER_NAME.to_string(),
            token_ttl: Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
        }
    }
}
