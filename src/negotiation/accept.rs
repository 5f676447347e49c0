//! Accept header parsing.
//!
//! Only the two document media types survive parsing; everything else is
//! dropped instead of being ranked.

use crate::negotiation::Format;

/// One recognized segment of an Accept header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptEntry {
    pub format: Format,
    /// Quality in `[0, 1]`.
    pub quality: f64,
}

impl AcceptEntry {
    pub fn media_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Parse an Accept header into recognized entries, in header order.
pub fn parse_accept(header: &str) -> Vec<AcceptEntry> {
    header.split(',').filter_map(parse_segment).collect()
}

fn parse_segment(segment: &str) -> Option<AcceptEntry> {
    let mut parts = segment.split(';');
    let format = Format::from_mime_type(parts.next()?.trim())?;

    // Last q parameter wins; a malformed or out-of-range value means 1.0.
    let quality = parts
        .filter_map(quality_param)
        .last()
        .and_then(parse_quality)
        .unwrap_or(1.0);

    Some(AcceptEntry { format, quality })
}

/// Value of a `q` parameter. Parameter names are case-insensitive.
fn quality_param(param: &str) -> Option<&str> {
    let (name, value) = param.split_once('=')?;
    name.trim().eq_ignore_ascii_case("q").then_some(value)
}

fn parse_quality(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|q| (0.0..=1.0).contains(q))
}
