//! Path normalization helpers.

/// Remove every trailing `/`.
pub fn strip_trailing_slashes(path: &str) -> &str {
    path.trim_end_matches('/')
}

/// Strip trailing slashes and ensure a leading one. Empty stays empty.
pub fn normalize_root_path(path: &str) -> String {
    let trimmed = strip_trailing_slashes(path);
    if trimmed.is_empty() || trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Recover the proxy prefix from an `X-Original-URI` value.
///
/// Everything from the first occurrence of `ui_path` onward is dropped, along
/// with any query string.
pub fn root_path_from_original_uri(original_uri: &str, ui_path: &str) -> String {
    let path = original_uri.split('?').next().unwrap_or_default();
    let prefix = match path.find(ui_path) {
        Some(index) if !ui_path.is_empty() => &path[..index],
        _ => path,
    };
    normalize_root_path(prefix)
}
