/// Credential verification
///
/// Checks a presented (identifier, secret) pair against stored identities.
/// Lookup goes through the [`UserStore`] capability and hash comparison
/// through [`PasswordHasher`]. An unknown identifier and a wrong password
/// produce the same error, so callers cannot probe which accounts exist.

use std::sync::Arc;

use super::password::{PasswordError, PasswordHasher};
use super::principal::Principal;
use super::token::EncodeError;
use crate::store::{StoreError, UserStore};

/// Error type for sign-in and credential checks
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Identifier not found or secret mismatch; never distinguished.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The user store could not serve the lookup.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The stored hash could not be processed.
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Token signing failed after a successful credential check.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Verifies presented credentials against the user store.
#[derive(Clone)]
pub struct CredentialVerifier {
    store: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl CredentialVerifier {
    /// Creates a verifier over the given store and hasher.
    pub fn new(store: Arc<dyn UserStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { store, hasher }
    }

    /// Checks the pair and builds the caller's [`Principal`] on success.
    ///
    /// Returns [`AuthError::InvalidCredentials`] both for an unknown
    /// identifier and for a wrong secret.
    pub async fn verify(&self, identifier: &str, secret: &str) -> Result<Principal, AuthError> {
        let user = self
            .store
            .find_by_identifier(identifier)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.hasher.matches(secret, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(Principal::new(user.email.clone(), user.role_list()))
    }
}
