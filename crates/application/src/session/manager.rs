//! Session state machine.
//!
//! One [`SessionManager`] owns one logical session. The session value
//! is an `Option<Session>`: `None` is the cleared, logged-out state,
//! `Some` is the authenticated state with all fields populated. Every
//! transition swaps the whole option, so readers never observe a
//! half-built session.

use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use authsim_domain::{AuthError, AuthResult, Session, SessionSnapshot, Token, User};
use tokio::task::JoinHandle;

use crate::config::SessionConfig;
use crate::ports::Clock;
use crate::session::handle::SessionHandle;
use crate::session::monitor;

/// The owning state machine for one simulated session.
///
/// Login always succeeds (there is no credential store behind this
/// simulator), refresh rotates the access token while the refresh
/// token is valid, and logout unconditionally clears the state. While
/// authenticated, a background monitor keeps the access token fresh or
/// tears the session down once the refresh token is gone.
pub struct SessionManager {
    inner: Arc<SessionInner>,
}

impl SessionManager {
    /// Creates a manager in the cleared state.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, config: SessionConfig) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                state: RwLock::new(None),
                monitor: Mutex::new(None),
                op_gate: tokio::sync::Mutex::new(()),
                clock,
                config,
            }),
        }
    }

    /// Opens a session for `email` after a simulated round trip.
    ///
    /// The credential is accepted unchecked; this is a simulator, not
    /// an identity provider. An existing session is overwritten. The
    /// expiry monitor is (re-)armed once the new state is committed.
    pub async fn login(&self, email: &str, password: &str) {
        self.inner.login(email, password).await;
    }

    /// Closes the session and stops the monitor. Idempotent.
    pub fn logout(&self) {
        self.inner.logout();
    }

    /// Rotates the access token using the current refresh token.
    ///
    /// # Errors
    /// - [`AuthError::InvalidState`] when called while logged out.
    /// - [`AuthError::SessionExpired`] when the refresh token has
    ///   expired; the session is cleared before this returns, so
    ///   subsequent reads show the logged-out state.
    pub async fn refresh_access_token(&self) -> AuthResult<Token> {
        self.inner.refresh_access_token().await
    }

    /// Whether a session is currently active.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.state_read().is_some()
    }

    /// The current access token, if authenticated.
    #[must_use]
    pub fn access_token(&self) -> Option<Token> {
        self.inner.access_token()
    }

    /// The current refresh token, if authenticated.
    #[must_use]
    pub fn refresh_token(&self) -> Option<Token> {
        self.inner
            .state_read()
            .as_ref()
            .map(|session| session.refresh_token.clone())
    }

    /// The current user, if authenticated.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.inner
            .state_read()
            .as_ref()
            .map(|session| session.user.clone())
    }

    /// A point-in-time view of all session fields.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.snapshot()
    }

    /// Creates a weak handle for injecting session access into
    /// consumers. Handle operations fail with
    /// [`AuthError::NoProvider`] once the manager is dropped.
    #[must_use]
    pub fn handle(&self) -> SessionHandle {
        SessionHandle::new(Arc::downgrade(&self.inner))
    }
}

/// Shared core behind the manager, its handles, and the monitor task.
pub(crate) struct SessionInner {
    /// The single shared session value. `None` is the cleared state.
    state: RwLock<Option<Session>>,
    /// Handle of the running monitor task, if any. Aborted on every
    /// transition out of the authenticated state and replaced on every
    /// login, so at most one monitor exists per session instance.
    monitor: Mutex<Option<JoinHandle<()>>>,
    /// Serializes login/refresh across their latency windows: at most
    /// one such operation is in flight at a time.
    op_gate: tokio::sync::Mutex<()>,
    clock: Arc<dyn Clock>,
    config: SessionConfig,
}

impl SessionInner {
    pub(crate) async fn login(self: &Arc<Self>, email: &str, _password: &str) {
        let _gate = self.op_gate.lock().await;
        tokio::time::sleep(self.config.call_latency).await;

        let now = self.clock.now();
        let session = Session {
            user: User::new(email),
            access_token: Token::issue(self.config.access_token_ttl_seconds, now),
            refresh_token: Token::issue(self.config.refresh_token_ttl_seconds, now),
        };

        *self.state_write() = Some(session);
        monitor::arm(self);
        tracing::info!(email, "session opened");
    }

    pub(crate) async fn refresh_access_token(&self) -> AuthResult<Token> {
        let _gate = self.op_gate.lock().await;

        let refresh_token = match self.state_read().as_ref() {
            Some(session) => session.refresh_token.clone(),
            None => {
                return Err(AuthError::invalid_state(
                    "refresh requires an authenticated session",
                ));
            }
        };

        if refresh_token.is_expired(self.clock.now()) {
            tracing::warn!("refresh token expired; clearing session");
            self.clear();
            return Err(AuthError::SessionExpired);
        }

        tokio::time::sleep(self.config.call_latency).await;

        let token = Token::issue(self.config.access_token_ttl_seconds, self.clock.now());
        let mut state = self.state_write();
        let Some(session) = state.as_mut() else {
            // Logged out while the simulated round trip was in flight.
            return Err(AuthError::invalid_state(
                "session was closed during refresh",
            ));
        };
        session.access_token = token.clone();
        tracing::debug!("access token renewed");
        Ok(token)
    }

    pub(crate) fn logout(&self) {
        let was_active = self.state_read().is_some();
        self.clear();
        if was_active {
            tracing::info!("session closed");
        }
    }

    pub(crate) fn snapshot(&self) -> SessionSnapshot {
        self.state_read()
            .as_ref()
            .map_or_else(SessionSnapshot::cleared, SessionSnapshot::from)
    }

    pub(crate) fn access_token(&self) -> Option<Token> {
        self.state_read()
            .as_ref()
            .map(|session| session.access_token.clone())
    }

    pub(crate) fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    pub(crate) const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Swaps in the cleared state and stops the monitor.
    fn clear(&self) {
        *self.state_write() = None;
        self.disarm_monitor();
    }

    /// Replaces the monitor slot, aborting any previous task so two
    /// monitors never run for the same session instance.
    pub(crate) fn store_monitor(&self, handle: JoinHandle<()>) {
        let mut slot = self.monitor.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = slot.replace(handle) {
            previous.abort();
        }
    }

    fn disarm_monitor(&self) {
        let mut slot = self.monitor.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = slot.take() {
            handle.abort();
        }
    }

    fn state_read(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_write(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for SessionInner {
    fn drop(&mut self) {
        self.disarm_monitor();
    }
}
