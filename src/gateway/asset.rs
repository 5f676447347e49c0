//! Static asset classification for UI requests.
//!
//! # Design Decisions
//! - Substring markers over the path plus query, no regex
//! - A request already carrying `url=` has been redirected before

/// Markers identifying an asset request or an already-configured entry point.
const STATIC_MARKERS: [&str; 7] = [".css", ".js", ".html", ".png", ".ico", ".svg", "url="];

/// True if the request should reach the static UI files untouched.
pub fn is_static_request(path: &str, query: Option<&str>) -> bool {
    let matches = |target: &str| STATIC_MARKERS.iter().any(|marker| target.contains(marker));
    matches(path) || query.is_some_and(matches)
}
