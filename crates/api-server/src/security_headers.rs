//! Response hardening headers.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};

/// The page loads its own assets plus plotly.js from the CDN. Plotly injects
/// inline styles and compiles some hover formatters at runtime.
const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; \
script-src 'self' https://cdn.plot.ly 'unsafe-eval'; \
style-src 'self' 'unsafe-inline'; \
img-src 'self' data: blob:; \
connect-src 'self'; \
frame-ancestors 'none'";

const HSTS: &str = "max-age=63072000; includeSubDomains";
const PAGE_CACHE: &str = "public, max-age=300";

/// Optional headers, fixed at startup.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderPolicy {
    /// Only meaningful behind TLS termination
    pub hsts: bool,
}

fn apply(headers: &mut HeaderMap, policy: HeaderPolicy, is_api: bool) {
    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(CONTENT_SECURITY_POLICY),
    );
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    // Figures depend on the query; the page and its assets do not
    if is_api {
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    } else if !headers.contains_key(header::CACHE_CONTROL) {
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(PAGE_CACHE));
    }

    if policy.hsts {
        headers.insert(header::STRICT_TRANSPORT_SECURITY, HeaderValue::from_static(HSTS));
    }
}

pub async fn security_headers_middleware(
    State(policy): State<HeaderPolicy>,
    request: Request,
    next: Next,
) -> Response {
    let is_api = request.uri().path().starts_with("/api");
    let mut response = next.run(request).await;
    apply(response.headers_mut(), policy, is_api);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_responses_are_not_cached() {
        let mut headers = HeaderMap::new();
        apply(&mut headers, HeaderPolicy::default(), true);

        assert_eq!(headers[header::CACHE_CONTROL], "no-store");
        assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert!(headers[header::CONTENT_SECURITY_POLICY]
            .to_str()
            .unwrap()
            .contains("https://cdn.plot.ly"));
        assert!(!headers.contains_key(header::STRICT_TRANSPORT_SECURITY));
    }

    #[test]
    fn test_page_gets_short_cache() {
        let mut headers = HeaderMap::new();
        apply(&mut headers, HeaderPolicy::default(), false);
        assert_eq!(headers[header::CACHE_CONTROL], PAGE_CACHE);
    }

    #[test]
    fn test_hsts_when_enabled() {
        let mut headers = HeaderMap::new();
        apply(&mut headers, HeaderPolicy { hsts: true }, false);
        assert_eq!(headers[header::STRICT_TRANSPORT_SECURITY], HSTS);
    }
}
