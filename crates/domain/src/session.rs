//! Session aggregate and read views.

use serde::{Deserialize, Serialize};

use crate::id::generate_id;
use crate::token::Token;

/// The user bound to an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable identifier generated at login.
    pub id: String,
    /// The email address the session was opened with.
    pub email: String,
}

impl User {
    /// Creates a user record for the given email with a fresh id.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            email: email.into(),
        }
    }
}

/// An authenticated session.
///
/// Grouping the user and both tokens into one struct makes the state
/// invariant structural: a session either exists with all three fields
/// populated, or it does not exist at all. There is no representable
/// half-authenticated state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The authenticated user.
    pub user: User,
    /// Short-lived credential; renewed by refresh.
    pub access_token: Token,
    /// Long-lived credential used solely to mint new access tokens.
    pub refresh_token: Token,
}

/// A point-in-time read view of the session state.
///
/// `is_authenticated` is true exactly when the three optional fields
/// are all present.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    /// Whether a session is currently active.
    pub is_authenticated: bool,
    /// The current access token, if authenticated.
    pub access_token: Option<Token>,
    /// The current refresh token, if authenticated.
    pub refresh_token: Option<Token>,
    /// The current user, if authenticated.
    pub user: Option<User>,
}

impl SessionSnapshot {
    /// The logged-out view: not authenticated, all fields absent.
    #[must_use]
    pub const fn cleared() -> Self {
        Self {
            is_authenticated: false,
            access_token: None,
            refresh_token: None,
            user: None,
        }
    }
}

impl From<&Session> for SessionSnapshot {
    fn from(session: &Session) -> Self {
        Self {
            is_authenticated: true,
            access_token: Some(session.access_token.clone()),
            refresh_token: Some(session.refresh_token.clone()),
            user: Some(session.user.clone()),
        }
    }
}
