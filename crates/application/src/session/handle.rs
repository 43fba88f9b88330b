//! Weak session handles for consumers.

use std::sync::{Arc, Weak};

use authsim_domain::{AuthError, AuthResult, SessionSnapshot, Token, User};

use crate::session::manager::SessionInner;

/// A cloneable handle exposing session reads and operations.
///
/// Handles are meant to be passed explicitly into whatever component
/// needs session access, instead of that component reaching for some
/// ambient global. A handle does not keep the session alive: once the
/// owning [`SessionManager`](crate::session::SessionManager) is
/// dropped, every call fails with [`AuthError::NoProvider`]. Using a
/// handle without a provider is a wiring bug in the consumer, not a
/// lifecycle event.
#[derive(Clone)]
pub struct SessionHandle {
    inner: Weak<SessionInner>,
}

impl SessionHandle {
    pub(crate) const fn new(inner: Weak<SessionInner>) -> Self {
        Self { inner }
    }

    /// Opens a session for `email` after a simulated round trip.
    ///
    /// # Errors
    /// Fails only with [`AuthError::NoProvider`]; the login itself
    /// always succeeds.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<()> {
        self.provider()?.login(email, password).await;
        Ok(())
    }

    /// Closes the session. Idempotent.
    ///
    /// # Errors
    /// Fails only with [`AuthError::NoProvider`].
    pub fn logout(&self) -> AuthResult<()> {
        self.provider()?.logout();
        Ok(())
    }

    /// Rotates the access token using the current refresh token.
    ///
    /// # Errors
    /// [`AuthError::NoProvider`] without a provider, otherwise the
    /// same conditions as
    /// [`SessionManager::refresh_access_token`](crate::session::SessionManager::refresh_access_token).
    pub async fn refresh_access_token(&self) -> AuthResult<Token> {
        self.provider()?.refresh_access_token().await
    }

    /// Whether a session is currently active.
    ///
    /// # Errors
    /// Fails only with [`AuthError::NoProvider`].
    pub fn is_authenticated(&self) -> AuthResult<bool> {
        Ok(self.provider()?.snapshot().is_authenticated)
    }

    /// The current access token, if authenticated.
    ///
    /// # Errors
    /// Fails only with [`AuthError::NoProvider`].
    pub fn access_token(&self) -> AuthResult<Option<Token>> {
        Ok(self.provider()?.access_token())
    }

    /// The current refresh token, if authenticated.
    ///
    /// # Errors
    /// Fails only with [`AuthError::NoProvider`].
    pub fn refresh_token(&self) -> AuthResult<Option<Token>> {
        Ok(self.provider()?.snapshot().refresh_token)
    }

    /// The current user, if authenticated.
    ///
    /// # Errors
    /// Fails only with [`AuthError::NoProvider`].
    pub fn user(&self) -> AuthResult<Option<User>> {
        Ok(self.provider()?.snapshot().user)
    }

    /// A point-in-time view of all session fields.
    ///
    /// # Errors
    /// Fails only with [`AuthError::NoProvider`].
    pub fn snapshot(&self) -> AuthResult<SessionSnapshot> {
        Ok(self.provider()?.snapshot())
    }

    fn provider(&self) -> AuthResult<Arc<SessionInner>> {
        self.inner.upgrade().ok_or(AuthError::NoProvider)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use std::time::Duration;

    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::SessionConfig;
    use crate::ports::{Clock, ManualClock};
    use crate::session::SessionManager;

    fn manager() -> SessionManager {
        let start = Utc.timestamp_opt(1_700_000_000, 0).single().unwrap();
        let clock = Arc::new(ManualClock::new(start));
        let config = SessionConfig::new()
            .with_call_latency(Duration::ZERO)
            .with_poll_interval(Duration::from_secs(3600));
        SessionManager::new(clock as Arc<dyn Clock>, config)
    }

    #[tokio::test]
    async fn test_handle_delegates_operations_and_reads() {
        let manager = manager();
        let handle = manager.handle();

        handle.login("dev@example.com", "pw").await.unwrap();
        assert!(handle.is_authenticated().unwrap());
        assert_eq!(
            handle.user().unwrap().unwrap().email,
            "dev@example.com".to_string()
        );
        assert_eq!(handle.access_token().unwrap(), manager.access_token());

        handle.logout().unwrap();
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_handle_without_provider_fails() {
        let manager = manager();
        let handle = manager.handle();
        drop(manager);

        assert_eq!(handle.is_authenticated(), Err(AuthError::NoProvider));
        assert_eq!(handle.logout(), Err(AuthError::NoProvider));
        assert_eq!(
            handle.login("dev@example.com", "pw").await,
            Err(AuthError::NoProvider)
        );
        assert_eq!(
            handle.refresh_access_token().await,
            Err(AuthError::NoProvider)
        );
    }

    #[tokio::test]
    async fn test_handles_are_cloneable() {
        let manager = manager();
        let handle = manager.handle();
        let clone = handle.clone();

        handle.login("dev@example.com", "pw").await.unwrap();
        assert!(clone.is_authenticated().unwrap());
    }
}
