//! Per-request correlation id, recorded on the trace span and returned to
//! the caller.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream id that is passed through unchanged.
const MAX_INCOMING_LEN: usize = 128;

/// The caller's `X-Request-Id` when it is usable, otherwise a fresh UUID v4.
pub fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty() && s.len() <= MAX_INCOMING_LEN)
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let id = resolve_request_id(request.headers());
    tracing::Span::current().record("request_id", id.as_str());

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(id: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(id).unwrap());
        headers
    }

    #[test]
    fn test_keeps_upstream_id() {
        assert_eq!(resolve_request_id(&headers_with("lb-42")), "lb-42");
    }

    #[test]
    fn test_generates_uuid_when_absent() {
        let id = resolve_request_id(&HeaderMap::new());
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_replaces_blank_or_oversized_ids() {
        let blank = resolve_request_id(&headers_with("  "));
        assert!(Uuid::parse_str(&blank).is_ok());

        let long = "x".repeat(MAX_INCOMING_LEN + 1);
        let replaced = resolve_request_id(&headers_with(&long));
        assert!(Uuid::parse_str(&replaced).is_ok());
    }
}
