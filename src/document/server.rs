//! Server entries advertised by the specification document.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Description attached to entries synthesized by auto-configuration.
pub const AUTO_CONFIGURED_DESCRIPTION: &str = "(added by auto-configuration)";

/// One advertised base URL of the described API.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerEntry {
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Keyed in document order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub variables: IndexMap<String, ServerVariable>,

    /// `x-*` extensions and any other fields, kept for round-tripping.
    #[serde(flatten)]
    pub extensions: Map<String, Value>,
}

impl ServerEntry {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
            variables: IndexMap::new(),
            extensions: Map::new(),
        }
    }

    /// Entry inserted when the caller's origin is not yet advertised.
    pub fn auto_configured(url: impl Into<String>) -> Self {
        Self {
            description: Some(AUTO_CONFIGURED_DESCRIPTION.to_string()),
            ..Self::new(url)
        }
    }
}

/// Substitution variable of a server URL template.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerVariable {
    pub default: String,

    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub extensions: Map<String, Value>,
}
