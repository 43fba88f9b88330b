//! Session error types

use thiserror::Error;

/// Errors surfaced by session operations.
///
/// Malformed tokens are deliberately absent from this taxonomy: the
/// codec folds decode failures into "expired", so callers only ever
/// observe lifecycle conditions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The refresh token is missing or expired; the session is over
    /// and only a new login can recover.
    #[error("session expired: refresh token is missing or expired")]
    SessionExpired,

    /// An operation was invoked in a state that does not support it,
    /// e.g. refreshing while logged out.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A session handle was used after its provider was dropped.
    #[error("no session provider in scope")]
    NoProvider,
}

impl AuthError {
    /// Creates an `InvalidState` error from a message.
    #[must_use]
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }
}

/// Result type alias for session operations.
pub type AuthResult<T> = Result<T, AuthError>;
