//! Request-scoped visitor state handed to every action.

use super::auth::AuthError;
use super::entity_ids::UserId;

/// Who is making the request.
///
/// Built by the HTTP layer from the verified session token. Actions never
/// look at headers; they ask this for the visitor.
#[derive(Clone, Copy, Debug, Default)]
pub struct AppState {
    /// The authenticated user's ID, if any.
    pub visitor_id: Option<UserId>,
}

impl AppState {
    /// Create state for an authenticated visitor.
    pub fn authenticated(visitor_id: UserId) -> Self {
        Self {
            visitor_id: Some(visitor_id),
        }
    }

    /// Create state for an unauthenticated request.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.visitor_id.is_some()
    }

    /// Require the visitor to be authenticated.
    pub fn require_auth(&self) -> Result<UserId, AuthError> {
        self.visitor_id.ok_or(AuthError::AuthenticationRequired)
    }
}
