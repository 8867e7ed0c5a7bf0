/// Access policy
///
/// A fixed allow-list of route patterns is always permitted; every other
/// route requires an authenticated principal. There are no role checks: the
/// only deny reason is missing authentication, and a broken token denies
/// exactly like no token.

use super::principal::AuthOutcome;

/// Result of consulting the guard for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The route may be dispatched.
    Permitted,

    /// The route requires authentication and none was established.
    Denied,
}

/// Allow-list access policy, consulted once per request before dispatch.
///
/// Patterns are exact paths (`/health`) or prefixes ending in `*`
/// (`/v1/auth/*`). The decision is a pure function of the path and the
/// request's authentication outcome: no IO, no clock.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    allow: Vec<String>,
}

impl AccessGuard {
    /// Creates a guard permitting the given patterns unconditionally.
    pub fn new(allow: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            allow: allow.into_iter().map(Into::into).collect(),
        }
    }

    /// Decides whether the request may proceed to dispatch.
    pub fn evaluate(&self, path: &str, outcome: &AuthOutcome) -> AccessDecision {
        if self.is_allow_listed(path) || outcome.is_authenticated() {
            AccessDecision::Permitted
        } else {
            AccessDecision::Denied
        }
    }

    fn is_allow_listed(&self, path: &str) -> bool {
        self.allow.iter().any(|pattern| match pattern.strip_suffix('*') {
            Some(prefix) => path.starts_with(prefix),
            None => path == pattern.as_str(),
        })
    }
}
