//! Authsim demo binary.
//!
//! Walks one full session lifecycle against the wall clock with
//! compressed constants, so the auto-renewal and the forced logout
//! can be watched in a few seconds of log output.

use std::sync::Arc;
use std::time::Duration;

use authsim_application::{Clock, SessionConfig, SessionManager};
use authsim_infrastructure::SystemClock;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Authsim demo v{}", env!("CARGO_PKG_VERSION"));

    // Compressed lifecycle: 2 s access tokens, 8 s refresh token,
    // monitor polling every second.
    let config = SessionConfig::new()
        .with_access_token_ttl(2)
        .with_refresh_token_ttl(8)
        .with_call_latency(Duration::from_millis(200))
        .with_poll_interval(Duration::from_secs(1));

    let manager = SessionManager::new(Arc::new(SystemClock::new()) as Arc<dyn Clock>, config);
    let handle = manager.handle();

    handle
        .login("dev@example.com", "hunter2")
        .await
        .unwrap_or_else(|error| tracing::error!(%error, "login failed"));

    if let Ok(Some(user)) = handle.user() {
        tracing::info!(user.id, user.email, "authenticated");
    }

    // Let the monitor renew the access token a couple of times.
    tokio::time::sleep(Duration::from_secs(4)).await;
    match handle.access_token() {
        Ok(Some(token)) => tracing::info!(token = %token, "access token after auto-renewal"),
        Ok(None) => tracing::warn!("no access token"),
        Err(error) => tracing::error!(%error, "session handle lost its provider"),
    }

    // Outlive the refresh token; the monitor tears the session down.
    tokio::time::sleep(Duration::from_secs(6)).await;
    match handle.is_authenticated() {
        Ok(authenticated) => tracing::info!(authenticated, "state after refresh token expiry"),
        Err(error) => tracing::error!(%error, "session handle lost its provider"),
    }

    manager.logout();
    tracing::info!("demo finished");
}
