/// Sign-in orchestration
///
/// [`TokenIssuer`] is the only place session tokens are minted: it verifies
/// the presented credentials and, on success, encodes a token for the
/// resulting principal. Sign-up does not issue tokens; new accounts sign in.

use super::token::TokenCodec;
use super::verifier::{AuthError, CredentialVerifier};

/// Issues session tokens for verified credentials.
#[derive(Clone)]
pub struct TokenIssuer {
    verifier: CredentialVerifier,
    codec: TokenCodec,
}

impl TokenIssuer {
    /// Creates an issuer over the given verifier and codec.
    pub fn new(verifier: CredentialVerifier, codec: TokenCodec) -> Self {
        Self { verifier, codec }
    }

    /// Verifies the pair and returns a fresh signed token carrying the
    /// principal's subject and roles.
    pub async fn sign_in(&self, identifier: &str, secret: &str) -> Result<String, AuthError> {
        let principal = self.verifier.verify(identifier, secret).await?;
        let token = self.codec.encode(&principal.subject, &principal.roles)?;

        tracing::debug!(subject = %principal.subject, "issued session token");
        Ok(token)
    }
}
