// Boundary identity plumbing
// Real authentication lives in front of this service; by the time a request
// lands here the gateway has already verified the session and forwards the
// account id in X-User-Id. The optional static bearer token fences off
// non-gateway callers.

use axum::http::HeaderMap;

use backend_domain::{RuntimeConfig, UserId};

pub fn authorize(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    if let Some(api_token) = &config.api_token {
        return extract_bearer(headers)
            .map(|v| v == *api_token)
            .unwrap_or(false);
    }
    true
}

pub fn caller_id(headers: &HeaderMap) -> Option<UserId> {
    let value = headers.get("X-User-Id")?.to_str().ok()?.trim();
    if value.is_empty() {
        return None;
    }
    Some(UserId(value.to_string()))
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let prefix = "Bearer ";
    if !value.starts_with(prefix) {
        return None;
    }
    let token = value[prefix.len()..].trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
