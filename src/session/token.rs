//! Role extraction from the organization API's bearer token.
//!
//! The token is a JWT; only its payload is read. Signature checks belong to the
//! organization API, which sees the token on every forwarded request.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::Value;

use super::Role;
use crate::errors::AppError;

const ROLE_CLAIM_URI: &str = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";

/// Read the role claim from a JWT payload.
pub fn role_from_token(token: &str) -> Result<Role, AppError> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| AppError::Unauthorized("Malformed access token".to_string()))?;

    // Some issuers keep the padding; the URL-safe engine rejects it.
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| AppError::Unauthorized(format!("Malformed access token: {}", e)))?;

    let claims: Value = serde_json::from_slice(&bytes)
        .map_err(|e| AppError::Unauthorized(format!("Malformed access token: {}", e)))?;

    let claim = claims.get("role").or_else(|| claims.get(ROLE_CLAIM_URI));
    let role = match claim {
        Some(Value::String(role)) => Role::parse(role),
        // Multi-role tokens: the first recognised role wins
        Some(Value::Array(roles)) => roles.iter().filter_map(Value::as_str).find_map(Role::parse),
        _ => None,
    };

    role.ok_or_else(|| AppError::Unauthorized("Account has no console role".to_string()))
}

#[cfg(test)]
pub(crate) fn encode_test_token(claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}
