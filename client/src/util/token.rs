//! Client-side expiry hint for the session token.
//!
//! Only the `exp` claim of the JWT payload is read; the signature is never
//! checked. A live-looking token proves nothing: the backend decides, and a
//! rejected token comes back as a 401 through the gateway.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token has no payload segment")]
    Malformed,
    #[error("token payload is not base64url: {0}")]
    Encoding(String),
    #[error("token payload is not a claims object: {0}")]
    Claims(String),
    #[error("token has no exp claim")]
    MissingExpiry,
}

#[derive(Deserialize)]
struct ExpiryClaim {
    exp: Option<f64>,
}

/// Expiry of `token` in seconds since the Unix epoch.
///
/// # Errors
///
/// Returns a [`TokenError`] if the payload segment is missing, is not
/// base64url-encoded JSON, or carries no numeric `exp`.
pub fn token_expiry(token: &str) -> Result<f64, TokenError> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|p| !p.is_empty())
        .ok_or(TokenError::Malformed)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| TokenError::Encoding(e.to_string()))?;
    let claim: ExpiryClaim = serde_json::from_slice(&bytes).map_err(|e| TokenError::Claims(e.to_string()))?;
    claim.exp.ok_or(TokenError::MissingExpiry)
}

/// True iff the expiry decodes and lies strictly after `now_secs`.
pub fn is_live(token: &str, now_secs: f64) -> bool {
    token_expiry(token).is_ok_and(|exp| exp > now_secs)
}

/// Current wall-clock time in seconds since the Unix epoch.
pub fn now_secs() -> f64 {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::now() / 1000.0
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0.0, |d| d.as_secs_f64())
    }
}
