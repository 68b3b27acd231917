//! Request context carrying the authenticated user.

use entry_auth::jwt::Claims;

/// Context for the current authenticated request.
///
/// Built from validated token claims and passed into service methods so
/// that every mutation knows who is acting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: i64,
}

impl RequestContext {
    /// Creates a context from validated claims.
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.user_id(),
        }
    }
}
