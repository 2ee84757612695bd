//! Bearer token claim decoding.
//!
//! The client never verifies signatures; it only reads the payload segment of
//! the JWT to learn when the backend will stop accepting it.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token has no payload segment")]
    MissingPayload,

    #[error("token payload is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("token payload is not a JSON claims object: {0}")]
    Json(#[from] serde_json::Error),
}

/// Claims the client reads from the token payload. Every other claim is
/// ignored, whatever its type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Claims {
    /// Raw `exp` claim, in seconds since the Unix epoch. `None` only when the
    /// claim is absent; an explicit `null` is `Some(Value::Null)`.
    #[serde(default, deserialize_with = "present")]
    pub exp: Option<Value>,
}

impl Claims {
    /// Whether the token had expired at `now_ms` (milliseconds since the epoch).
    ///
    /// The comparison is strict: a token expiring exactly at `now_ms` is still
    /// valid. A token without an `exp` claim never expires from the client's
    /// point of view; a `null` expiry counts as the epoch and has expired.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn expired_at(&self, now_ms: i64) -> bool {
        self.exp
            .as_ref()
            .and_then(expiry_secs)
            .is_some_and(|exp| exp * 1000.0 < now_ms as f64)
    }
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Numeric reading of an `exp` value. Non-numeric values have no expiry.
fn expiry_secs(exp: &Value) -> Option<f64> {
    match exp {
        Value::Null => Some(0.0),
        Value::Number(n) => n.as_f64(),
        Value::String(raw) if raw.trim().is_empty() => Some(0.0),
        Value::String(raw) => match raw.trim().parse::<f64>() {
            Ok(secs) => Some(secs),
            Err(_) => None,
        },
        _ => None,
    }
}

/// Decode the claims from the second (payload) segment of `token`.
///
/// # Errors
///
/// Returns a [`TokenError`] if the payload segment is missing, not base64url,
/// or not a JSON object.
pub fn decode_claims(token: &str) -> Result<Claims, TokenError> {
    let payload = token.split('.').nth(1).ok_or(TokenError::MissingPayload)?;
    if payload.is_empty() {
        return Err(TokenError::MissingPayload);
    }
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    /// Unsigned JWT-shaped token carrying `payload` as its claims segment.
    pub fn token_with_payload(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{header}.{body}.signature")
    }

    /// Token whose `exp` claim falls at `expires_ms` (milliseconds since the epoch).
    #[allow(clippy::cast_precision_loss)]
    pub fn token_expiring_at_ms(expires_ms: i64) -> String {
        token_with_payload(&serde_json::json!({
            "sub": "ada@example.com",
            "exp": expires_ms as f64 / 1000.0,
        }))
    }
}
