//! Fixed CORS headers.
//!
//! The same three headers go on every response, success or failure,
//! including responses produced outside the speak handler (404s, 405s).

use axum::Router;
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use tower_http::set_header::SetResponseHeaderLayer;

pub const CORS_HEADERS: [(HeaderName, &str); 3] = [
    (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
    (ACCESS_CONTROL_ALLOW_METHODS, "OPTIONS,POST"),
];

/// The CORS headers as a header map.
pub fn cors_header_map() -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(CORS_HEADERS.len());
    for (name, value) in CORS_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
    headers
}

/// Stamp the CORS headers onto every response the router produces.
pub fn with_cors_headers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    CORS_HEADERS
        .into_iter()
        .fold(router, |router, (name, value)| {
            router.layer(SetResponseHeaderLayer::overriding(
                name,
                HeaderValue::from_static(value),
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_header_map_values() {
        let headers = cors_header_map();
        assert_eq!(headers.len(), 3);
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-headers"], "Content-Type");
        assert_eq!(headers["access-control-allow-methods"], "OPTIONS,POST");
    }
}
