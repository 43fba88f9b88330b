//! Opaque token codec with expiry metadata.
//!
//! Tokens are base64-encoded JSON claims. They are not signed and
//! carry no cryptographic guarantees; this codec exists so the rest of
//! the system can treat tokens as opaque strings while still tracking
//! their lifecycle. The codec is the sole encoder/decoder — consumers
//! must never parse token strings themselves.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::id::generate_id;

/// An opaque credential string with embedded expiry metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

/// The payload encoded into every token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Issued-at, unix seconds.
    iat: i64,
    /// Expires-at, unix seconds.
    exp: i64,
    /// Unique token id, so two tokens minted within the same second
    /// still compare unequal.
    jti: String,
}

/// Internal decode failure. Never crosses the codec boundary; expiry
/// checks fold it into "expired".
#[derive(Debug, Error)]
enum DecodeError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid claims payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl Token {
    /// Issues a token valid for `ttl_seconds` from `now`.
    ///
    /// `ttl_seconds` must be positive; the caller supplies `now` from
    /// its clock, which keeps issuance deterministic under test.
    #[must_use]
    pub fn issue(ttl_seconds: i64, now: DateTime<Utc>) -> Self {
        debug_assert!(ttl_seconds > 0, "token TTL must be positive");
        let issued = now.timestamp();
        let claims = Claims {
            iat: issued,
            exp: issued + ttl_seconds,
            jti: generate_id(),
        };
        // Serializing three plain fields cannot fail.
        let json = serde_json::to_vec(&claims).unwrap_or_default();
        Self(STANDARD.encode(json))
    }

    /// Returns true if the token is expired as of `now`.
    ///
    /// A token that fails to decode reads as expired; malformed input
    /// must terminate a session, never crash it.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.is_expired_or_expiring(0, now)
    }

    /// Returns true if the token is expired or will expire within
    /// `buffer_seconds` of `now`.
    ///
    /// The expiry instant itself counts as expired.
    #[must_use]
    pub fn is_expired_or_expiring(&self, buffer_seconds: i64, now: DateTime<Utc>) -> bool {
        self.decode()
            .map_or(true, |claims| now.timestamp() + buffer_seconds >= claims.exp)
    }

    /// When the token was issued, or None if it does not decode.
    #[must_use]
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        let claims = self.decode().ok()?;
        Utc.timestamp_opt(claims.iat, 0).single()
    }

    /// When the token expires, or None if it does not decode.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let claims = self.decode().ok()?;
        Utc.timestamp_opt(claims.exp, 0).single()
    }

    /// Seconds until expiry as of `now`; negative once past, None if
    /// the token does not decode.
    #[must_use]
    pub fn seconds_until_expiry(&self, now: DateTime<Utc>) -> Option<i64> {
        self.decode().ok().map(|claims| claims.exp - now.timestamp())
    }

    /// The raw token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn decode(&self) -> Result<Claims, DecodeError> {
        let bytes = STANDARD.decode(&self.0)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Token {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().unwrap()
    }

    #[test]
    fn test_token_valid_until_ttl_elapses() {
        let now = at(1_700_000_000);
        let token = Token::issue(60, now);

        assert!(!token.is_expired(now));
        assert!(!token.is_expired(now + Duration::seconds(59)));
        // Expiry instant itself counts as expired.
        assert!(token.is_expired(now + Duration::seconds(60)));
        assert!(token.is_expired(now + Duration::seconds(61)));
    }

    #[test]
    fn test_expiring_buffer() {
        let now = at(1_700_000_000);
        let token = Token::issue(60, now);

        assert!(!token.is_expired_or_expiring(0, now + Duration::seconds(31)));
        assert!(token.is_expired_or_expiring(30, now + Duration::seconds(31)));
        assert!(!token.is_expired_or_expiring(30, now + Duration::seconds(29)));
    }

    #[test]
    fn test_malformed_token_reads_as_expired() {
        let now = at(1_700_000_000);

        let not_base64 = Token::from("!!not-base64!!".to_string());
        assert!(not_base64.is_expired(now));
        assert_eq!(not_base64.expires_at(), None);

        let not_json = Token::from(STANDARD.encode("hello"));
        assert!(not_json.is_expired(now));
        assert_eq!(not_json.seconds_until_expiry(now), None);
    }

    #[test]
    fn test_claims_round_trip() {
        let now = at(1_700_000_000);
        let token = Token::issue(86_400, now);

        assert_eq!(token.issued_at(), Some(now));
        assert_eq!(token.expires_at(), Some(now + Duration::seconds(86_400)));
        assert_eq!(token.seconds_until_expiry(now), Some(86_400));
    }

    #[test]
    fn test_same_instant_tokens_differ() {
        let now = at(1_700_000_000);
        let a = Token::issue(60, now);
        let b = Token::issue(60, now);
        assert_ne!(a, b);
    }

    #[test]
    fn test_display_matches_raw_string() {
        let token = Token::issue(60, at(1_700_000_000));
        assert_eq!(token.to_string(), token.as_str());
    }
}
