//! Content negotiation for the specification endpoint.
//!
//! # Data Flow
//! ```text
//! ?format=<json|yml|yaml>      ──▶ explicit override (wins when recognized)
//! Accept: a;q=x, b;q=y, ...    ──▶ accept.rs (parse, drop unknown types)
//!                              ──▶ highest-quality candidates (tolerance)
//!                              ──▶ tie-break preference
//! nothing usable               ──▶ YAML
//! ```
//!
//! # Design Decisions
//! - Pure function over request-local data, no shared state
//! - Malformed input degrades to the default, never an error
//! - Tie tolerance and tie-break order are policy, carried in `NegotiationPolicy`

pub mod accept;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use accept::{parse_accept, AcceptEntry};

/// Quality values closer than this are considered equal.
pub const DEFAULT_TIE_TOLERANCE: f64 = 1e-3;

/// Serialization format of the specification document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    #[serde(alias = "yml")]
    Yaml,
}

impl Format {
    /// Canonical MIME type, used for matching and for `Content-Type`.
    pub const fn mime_type(self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Yaml => "text/yaml",
        }
    }

    /// Resolve a known MIME type (case-insensitive).
    pub fn from_mime_type(media_type: &str) -> Option<Self> {
        [Format::Json, Format::Yaml]
            .into_iter()
            .find(|format| format.mime_type().eq_ignore_ascii_case(media_type))
    }

    /// Resolve a `format` query parameter value.
    pub fn from_query_value(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("json") {
            Some(Format::Json)
        } else if value.eq_ignore_ascii_case("yml") || value.eq_ignore_ascii_case("yaml") {
            Some(Format::Yaml)
        } else {
            None
        }
    }

    /// Short label for logs and metrics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
        }
    }

    fn other(self) -> Self {
        match self {
            Format::Json => Format::Yaml,
            Format::Yaml => Format::Json,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Negotiation policy knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NegotiationPolicy {
    /// Quality values at most this far apart are tied.
    pub tie_tolerance: f64,
    /// Preferred format when both formats are among the top candidates.
    pub tie_break: Format,
    /// Result when nothing usable was supplied.
    pub default_format: Format,
}

impl Default for NegotiationPolicy {
    fn default() -> Self {
        Self {
            tie_tolerance: DEFAULT_TIE_TOLERANCE,
            tie_break: Format::Yaml,
            default_format: Format::Yaml,
        }
    }
}

impl From<crate::config::schema::NegotiationConfig> for NegotiationPolicy {
    fn from(config: crate::config::schema::NegotiationConfig) -> Self {
        Self {
            tie_tolerance: config.tie_tolerance,
            tie_break: config.tie_break,
            ..Self::default()
        }
    }
}

impl NegotiationPolicy {
    /// Choose the output format from an optional override and Accept header.
    pub fn negotiate(&self, format_override: Option<&str>, accept: Option<&str>) -> Format {
        format_override
            .and_then(Format::from_query_value)
            .or_else(|| accept.and_then(|header| self.select_from_accept(header)))
            .unwrap_or(self.default_format)
    }

    /// Pick a format from an Accept header, or `None` if it names neither.
    pub fn select_from_accept(&self, header: &str) -> Option<Format> {
        let entries = parse_accept(header);
        let max_quality = entries
            .iter()
            .map(|entry| entry.quality)
            .fold(f64::NEG_INFINITY, f64::max);

        let candidates: Vec<Format> = entries
            .iter()
            .filter(|entry| (entry.quality - max_quality).abs() <= self.tie_tolerance)
            .map(|entry| entry.format)
            .collect();

        let preferred = self.tie_break;
        if candidates.contains(&preferred) {
            Some(preferred)
        } else if candidates.contains(&preferred.other()) {
            Some(preferred.other())
        } else {
            None
        }
    }
}

/// Negotiate with the default policy.
pub fn negotiate(format_override: Option<&str>, accept: Option<&str>) -> Format {
    NegotiationPolicy::default().negotiate(format_override, accept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_yaml() {
        assert_eq!(negotiate(None, None), Format::Yaml);
        assert_eq!(negotiate(None, Some("")), Format::Yaml);
        assert_eq!(negotiate(None, Some("text/html, */*;q=0.8")), Format::Yaml);
    }

    #[test]
    fn test_override_wins() {
        assert_eq!(negotiate(Some("json"), Some("text/yaml")), Format::Json);
        assert_eq!(negotiate(Some("JSON"), None), Format::Json);
        assert_eq!(negotiate(Some("yml"), Some("application/json")), Format::Yaml);
        assert_eq!(negotiate(Some("YaMl"), Some("application/json")), Format::Yaml);
    }

    #[test]
    fn test_unknown_override_falls_through() {
        assert_eq!(negotiate(Some("xyz"), Some("application/json")), Format::Json);
        assert_eq!(negotiate(Some(""), Some("application/json")), Format::Json);
        assert_eq!(negotiate(Some("xml"), None), Format::Yaml);
    }

    #[test]
    fn test_equal_quality_prefers_yaml() {
        assert_eq!(
            negotiate(None, Some("application/json;q=0.9, text/yaml;q=0.9")),
            Format::Yaml
        );
        assert_eq!(negotiate(None, Some("application/json, text/yaml")), Format::Yaml);
    }

    #[test]
    fn test_higher_quality_wins() {
        assert_eq!(
            negotiate(None, Some("application/json;q=1.0, text/yaml;q=0.5")),
            Format::Json
        );
        assert_eq!(
            negotiate(None, Some("application/json;q=0.2, text/yaml;q=0.7")),
            Format::Yaml
        );
    }

    #[test]
    fn test_near_equal_qualities_tie() {
        assert_eq!(
            negotiate(None, Some("application/json;q=0.9004, text/yaml;q=0.9")),
            Format::Yaml
        );
        assert_eq!(
            negotiate(None, Some("application/json;q=0.902, text/yaml;q=0.9")),
            Format::Json
        );
    }

    #[test]
    fn test_unknown_types_do_not_compete() {
        // text/html has the highest quality but is dropped during parsing.
        assert_eq!(
            negotiate(None, Some("text/html, application/json;q=0.1")),
            Format::Json
        );
    }

    #[test]
    fn test_configurable_tie_break() {
        let policy = NegotiationPolicy {
            tie_break: Format::Json,
            ..NegotiationPolicy::default()
        };
        assert_eq!(
            policy.negotiate(None, Some("text/yaml;q=0.9, application/json;q=0.9")),
            Format::Json
        );
        assert_eq!(policy.negotiate(None, Some("text/yaml")), Format::Yaml);
        assert_eq!(policy.negotiate(None, None), Format::Yaml);
    }

    #[test]
    fn test_configurable_tolerance() {
        let policy = NegotiationPolicy {
            tie_tolerance: 0.2,
            ..NegotiationPolicy::default()
        };
        assert_eq!(
            policy.negotiate(None, Some("application/json;q=1.0, text/yaml;q=0.9")),
            Format::Yaml
        );
    }

    #[test]
    fn test_zero_tolerance_keeps_best_entry() {
        let policy = NegotiationPolicy {
            tie_tolerance: 0.0,
            ..NegotiationPolicy::default()
        };
        assert_eq!(policy.negotiate(None, Some("application/json")), Format::Json);
        assert_eq!(
            policy.negotiate(None, Some("application/json;q=0.9, text/yaml;q=0.9")),
            Format::Yaml
        );
        assert_eq!(
            policy.negotiate(None, Some("application/json;q=0.9, text/yaml;q=0.8999")),
            Format::Json
        );
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(Format::Json.mime_type(), "application/json");
        assert_eq!(Format::Yaml.mime_type(), "text/yaml");
        assert_eq!(Format::from_mime_type("TEXT/YAML"), Some(Format::Yaml));
        assert_eq!(Format::from_mime_type("application/yaml"), None);
    }
}
