/// Authentication and authorization for Turnstile
///
/// This module contains the whole authentication pipeline, leaves first:
///
/// # Modules
///
/// - [`token`]: signed session token encoding and decoding (HS256)
/// - [`password`]: password hashing capability and the Argon2id implementation
/// - [`principal`]: request identity and the per-request authentication outcome
/// - [`verifier`]: credential verification against the user store
/// - [`issuer`]: sign-in orchestration producing session tokens
/// - [`middleware`]: per-request token extraction and outcome attachment
/// - [`guard`]: allow-list access policy consulted before dispatch
///
/// # Security Notes
///
/// - Tokens are HS256-signed and verified with a constant-time comparison.
/// - Passwords are hashed with Argon2id (64 MB memory, 3 iterations).
/// - An unknown identifier and a wrong password are indistinguishable to
///   callers of sign-in.

pub mod token;
pub mod password;
pub mod principal;
pub mod verifier;
pub mod issuer;
pub mod middleware;
pub mod guard;
