//! Background expiry monitor.
//!
//! A single recurring task bound to the lifetime of the authenticated
//! state: armed when a session opens, aborted whenever the session
//! leaves the authenticated state. Each tick checks whether the access
//! token is expired or will expire before the next tick, and either
//! renews it or tears the session down. Tick errors are never
//! surfaced to callers; the forced logout is the whole error handling.

use std::sync::{Arc, Weak};

use crate::session::manager::SessionInner;

/// Arms the monitor for the given session, replacing any previous one.
pub(crate) fn arm(inner: &Arc<SessionInner>) {
    let weak = Arc::downgrade(inner);
    let poll_interval = inner.config().poll_interval;

    let task = tokio::spawn(async move {
        loop {
            tokio::time::sleep(poll_interval).await;
            let Some(inner) = Weak::upgrade(&weak) else {
                // Provider dropped; nothing left to watch.
                break;
            };
            if !tick(&inner).await {
                break;
            }
        }
    });

    inner.store_monitor(task);
}

/// Runs one monitor tick. Returns false when the monitor should stop
/// scheduling further ticks.
async fn tick(inner: &Arc<SessionInner>) -> bool {
    let Some(access_token) = inner.access_token() else {
        // Stale tick: the session is already gone.
        return false;
    };

    // Renew when the token would expire before the next tick, so a
    // stale access token never survives a full polling interval.
    let buffer = i64::try_from(inner.config().poll_interval.as_secs()).unwrap_or(i64::MAX);
    if !access_token.is_expired_or_expiring(buffer, inner.now()) {
        return true;
    }

    match inner.refresh_access_token().await {
        Ok(_) => {
            tracing::debug!("access token auto-renewed");
            true
        }
        Err(error) => {
            tracing::warn!(%error, "auto-renewal failed; closing session");
            inner.logout();
            false
        }
    }
}
