/// Session token encoding and decoding
///
/// Tokens are JWTs signed with HS256 (HMAC-SHA256): three base64url segments
/// joined by `.`, carrying a subject identifier and a role list. They are
/// self-contained; the server keeps no per-token state and there is no
/// revocation list.
///
/// # Security
///
/// - **Algorithm**: pinned to HS256. A token declaring any other algorithm
///   is rejected during decode.
/// - **Signature check**: constant-time comparison, delegated to the
///   `jsonwebtoken` crate.
/// - **Expiry**: strict, a token is already invalid at the expiry instant.
///
/// # Example
///
/// ```
/// use turnstile_core::auth::token::TokenCodec;
/// use turnstile_core::config::AuthConfig;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = AuthConfig::new("a-demo-secret-of-at-least-32-bytes!!");
/// let codec = TokenCodec::new(&config);
///
/// let token = codec.encode("user@example.com", &["USER".to_string()])?;
/// let claims = codec.decode(&token)?;
/// assert_eq!(claims.sub, "user@example.com");
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;

/// Failure to produce a signed token.
///
/// Signing only fails on serialization or key problems, so callers treat
/// this as an internal error rather than a caller mistake.
#[derive(Debug, thiserror::Error)]
#[error("token signing failed: {0}")]
pub struct EncodeError(#[from] jsonwebtoken::errors::Error);

/// Why a presented token was rejected.
///
/// All variants are terminal for the request that presented the token;
/// nothing here is retryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Not three well-formed segments, or the payload is not valid claims.
    #[error("token is malformed")]
    Malformed,

    /// The signature does not match the recomputed HMAC, or the header
    /// declares a different algorithm.
    #[error("token signature is invalid")]
    InvalidSignature,

    /// Current time is at or past the embedded expiry.
    #[error("token has expired")]
    Expired,
}

/// Claims carried inside a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the unique identity key (an email address).
    pub sub: String,

    /// Roles granted to the subject, in issuance order.
    pub roles: Vec<String>,

    /// Issued at (Unix timestamp, seconds).
    pub iat: i64,

    /// Expiration time (Unix timestamp, seconds).
    pub exp: i64,
}

impl Claims {
    /// Creates claims expiring `ttl` from now. `exp > iat` holds for any
    /// positive `ttl`.
    pub fn new(subject: impl Into<String>, roles: Vec<String>, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: subject.into(),
            roles,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Checks whether the expiry instant has been reached.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Encodes and decodes session tokens with a fixed secret and TTL.
///
/// Pure function of input + secret + clock: no IO, no shared mutable state,
/// safe to clone into every request handler.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    /// Builds a codec from the signing secret and token TTL in `config`.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl: config.token_ttl,
        }
    }

    /// Issues a signed token for `subject` carrying `roles`, expiring after
    /// the configured TTL.
    pub fn encode(&self, subject: &str, roles: &[String]) -> Result<String, EncodeError> {
        let claims = Claims::new(subject, roles.to_vec(), self.ttl);
        self.sign(&claims)
    }

    /// Signs pre-built claims. Split out from [`encode`](Self::encode) so
    /// tests can mint tokens with arbitrary timestamps.
    pub fn sign(&self, claims: &Claims) -> Result<String, EncodeError> {
        let header = Header::new(Algorithm::HS256);
        Ok(encode(&header, claims, &self.encoding_key)?)
    }

    /// Validates a presented token and extracts its claims.
    ///
    /// Checks, in order: structure and payload shape (`Malformed`), the
    /// HS256 signature and declared algorithm (`InvalidSignature`), then
    /// expiry (`Expired`). Never panics on arbitrary input.
    pub fn decode(&self, token: &str) -> Result<Claims, DecodeError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is enforced below with a strict clock read; the library
        // check tolerates leeway and accepts a token at the expiry instant.
        validation.validate_exp = false;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    DecodeError::InvalidSignature
                }
                ErrorKind::ExpiredSignature => DecodeError::Expired,
                _ => DecodeError::Malformed,
            }
        })?;

        if data.claims.is_expired() {
            return Err(DecodeError::Expired);
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret-key-with-32-bytes!!";

    fn codec() -> TokenCodec {
        TokenCodec::new(&AuthConfig::new(SECRET))
    }

    #[test]
    fn test_round_trip_preserves_subject_and_roles() {
        let codec = codec();
        let roles = vec!["USER".to_string(), "ADMIN".to_string()];

        let token = codec.encode("user@example.com", &roles).unwrap();
        let claims = codec.decode(&token).unwrap();

        assert_eq!(claims.sub, "user@example.com");
        assert_eq!(claims.roles, roles);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_has_three_segments() {
        let token = codec().encode("user@example.com", &[]).unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_wrong_secret_is_invalid_signature() {
        let token = codec().encode("user@example.com", &[]).unwrap();
        let other = TokenCodec::new(&AuthConfig::new("a-different-secret-also-32-bytes!!!!"));

        assert_eq!(other.decode(&token), Err(DecodeError::InvalidSignature));
    }

    #[test]
    fn test_tampered_signature_is_invalid_signature() {
        let codec = codec();
        let token = codec.encode("user@example.com", &[]).unwrap();

        // Swap a character in the middle of the signature segment for another
        // alphabet member so the segment still parses as base64url.
        let dot = token.rfind('.').unwrap();
        let mut bytes = token.into_bytes();
        let mid = dot + 1 + (bytes.len() - dot - 1) / 2;
        bytes[mid] = if bytes[mid] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert_eq!(codec.decode(&tampered), Err(DecodeError::InvalidSignature));
    }

    #[test]
    fn test_malformed_shapes_are_rejected() {
        let codec = codec();
        let inputs = ["", "not-a-token", "a.b", "a.b.c.d", "ab..", "\u{1F980}.\u{1F980}.\u{1F980}"];

        for input in inputs {
            assert_eq!(
                codec.decode(input),
                Err(DecodeError::Malformed),
                "input: {input:?}"
            );
        }
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let codec = codec();

        // Negative TTL mints a token that expired an hour ago.
        let claims = Claims::new("user@example.com", vec![], Duration::seconds(-3600));
        assert!(claims.is_expired());

        let token = codec.sign(&claims).unwrap();
        assert_eq!(codec.decode(&token), Err(DecodeError::Expired));
    }

    #[test]
    fn test_token_is_rejected_at_the_expiry_instant() {
        let codec = codec();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "user@example.com".to_string(),
            roles: vec![],
            iat: now - 60,
            exp: now,
        };

        let token = codec.sign(&claims).unwrap();
        assert_eq!(codec.decode(&token), Err(DecodeError::Expired));
    }

    #[test]
    fn test_foreign_algorithm_is_rejected() {
        let codec = codec();
        let claims = Claims::new("user@example.com", vec![], Duration::seconds(60));

        // Same secret, different declared algorithm.
        let key = EncodingKey::from_secret(SECRET.as_bytes());
        let forged = encode(&Header::new(Algorithm::HS384), &claims, &key).unwrap();

        assert_eq!(codec.decode(&forged), Err(DecodeError::InvalidSignature));
    }

    #[test]
    fn test_claims_expiry_is_strict() {
        let now = Utc::now().timestamp();
        let live = Claims {
            sub: "a".to_string(),
            roles: vec![],
            iat: now,
            exp: now + 60,
        };
        let lapsed = Claims {
            sub: "a".to_string(),
            roles: vec![],
            iat: now - 120,
            exp: now - 60,
        };

        assert!(!live.is_expired());
        assert!(lapsed.is_expired());
    }
}
