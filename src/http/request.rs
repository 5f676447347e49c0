//! Request metadata extraction.
//!
//! # Responsibilities
//! - Generate and propagate a unique request ID (UUID v4)
//! - Derive the root URL the caller used to reach this server
//! - Read single query parameters without rejecting malformed queries

use axum::http::{header::HOST, HeaderName, Request};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

/// Header carrying the request ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Header a reverse proxy uses to forward the path it received.
pub const X_ORIGINAL_URI: HeaderName = HeaderName::from_static("x-original-uri");

/// Layer assigning `x-request-id` to requests that lack one.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid)
}

/// Layer copying `x-request-id` onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(X_REQUEST_ID)
}

/// `scheme://host[:port]` as perceived by this server.
///
/// The scheme comes from an absolute request URI, else `http`. The authority
/// comes from `Host`, else from the URI (HTTP/2).
pub fn perceived_root_url<B>(request: &Request<B>) -> Option<String> {
    let scheme = request.uri().scheme_str().unwrap_or("http");
    let host = request
        .headers()
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .filter(|host| !host.is_empty())
        .or_else(|| request.uri().authority().map(|authority| authority.as_str()))?;
    Some(format!("{scheme}://{host}"))
}

/// First value of query parameter `name`, percent-decoded.
pub fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
