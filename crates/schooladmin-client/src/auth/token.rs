//! Reading the expiry of a stored bearer token.
//!
//! The console never verifies signatures; it only peeks at `exp` so an
//! expired login can be discarded before the server rejects it.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

#[derive(Deserialize)]
struct ExpiryClaim {
    #[serde(default)]
    exp: Option<i64>,
}

/// Expiry (seconds since epoch) of a JWT, or `None` for opaque tokens.
pub fn token_expiry(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice::<ExpiryClaim>(&bytes).ok()?.exp
}

/// Whether `token` carries an `exp` at or before `now`.
pub fn is_expired(token: &str, now: i64) -> bool {
    token_expiry(token).is_some_and(|exp| now >= exp)
}
