/// Request identity
///
/// [`Principal`] is the identity attached to a request after a successful
/// token decode (or a successful credential check during sign-in).
/// [`AuthOutcome`] is the per-request authentication result the middleware
/// computes exactly once and the access guard consumes.

use serde::{Deserialize, Serialize};

use super::token::DecodeError;

/// Identity of an authenticated caller.
///
/// Immutable once constructed and scoped to a single request; never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Unique identity key: the token subject (an email address).
    pub subject: String,

    /// Roles granted to the subject, in issuance order.
    pub roles: Vec<String>,
}

impl Principal {
    /// Creates a principal for `subject` carrying `roles`.
    pub fn new(subject: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            subject: subject.into(),
            roles,
        }
    }

    /// Checks whether the principal carries a role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Authentication outcome of a single request.
///
/// A presented-but-broken token is kept distinct from no token at all so
/// failed presentations stay auditable; the access guard treats both as
/// unauthenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// A valid token was presented; its subject and roles follow.
    Authenticated(Principal),

    /// No token was presented.
    Anonymous,

    /// A token was presented but failed to decode.
    Invalid(DecodeError),
}

impl AuthOutcome {
    /// The authenticated principal, when there is one.
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            AuthOutcome::Authenticated(principal) => Some(principal),
            _ => None,
        }
    }

    /// Whether a valid token was presented.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthOutcome::Authenticated(_))
    }
}
