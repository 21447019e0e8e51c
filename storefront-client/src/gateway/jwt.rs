//! Unverified JWT payload decoding
//!
//! Used only to restore a session while the auth service is unreachable.
//! The signature is never checked; callers must treat the result as
//! untrusted.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Deserialize;
use shared::EntityId;
use shared::models::{Role, User};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    #[serde(default)]
    id: Option<EntityId>,
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    exp: Option<i64>,
}

/// Decode the payload segment of a `header.payload.signature` token
fn decode_claims(token: &str) -> Option<Claims> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    // Some issuers pad the segment anyway
    let payload_bytes = URL_SAFE_NO_PAD.decode(parts[1].trim_end_matches('=')).ok()?;
    serde_json::from_slice(&payload_bytes).ok()
}

/// Expiry claim (`exp`, seconds since epoch)
pub fn token_expiry(token: &str) -> Option<i64> {
    decode_claims(token)?.exp
}

/// Rebuild the user carried in the token payload
///
/// Returns `None` when the token is malformed, expired at `now_secs`, or
/// carries neither `sub` nor `email`.
pub fn decode_user(token: &str, now_secs: i64) -> Option<User> {
    let claims = decode_claims(token)?;

    if claims.exp.is_some_and(|exp| exp < now_secs) {
        return None;
    }

    let has_subject = claims.sub.as_deref().is_some_and(|s| !s.is_empty());
    let has_email = claims.email.as_deref().is_some_and(|s| !s.is_empty());
    if !has_subject && !has_email {
        return None;
    }

    let id = claims
        .id
        .or_else(|| claims.sub.clone().map(EntityId::new))
        .unwrap_or_else(|| EntityId::new(""));
    let role = claims.role.as_deref().and_then(Role::parse).unwrap_or_default();

    Some(User {
        id,
        first_name: claims.first_name.or(claims.name).unwrap_or_default(),
        last_name: claims.last_name.unwrap_or_default(),
        email: claims.email.unwrap_or_default(),
        role,
        phone: claims.phone,
    })
}

#[cfg(test)]
pub(crate) fn encode_for_test(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.signature")
}
