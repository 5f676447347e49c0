//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::negotiation::Format;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Public server settings (context path, base URL).
    pub server: ServerConfig,

    /// Specification endpoint settings.
    pub spec: SpecConfig,

    /// Where the specification document is loaded from.
    pub document: DocumentConfig,

    /// Documentation UI settings.
    pub ui: UiConfig,

    /// Content negotiation policy.
    pub negotiation: NegotiationConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Public-facing server settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Path prefix under which the whole application is mounted.
    pub context_path: String,

    /// Externally visible base URL (e.g., "https://api.example.com").
    pub base_url: Option<String>,
}

/// Specification endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SpecConfig {
    /// Serve the specification endpoint.
    pub enabled: bool,

    /// Path the specification is served on.
    pub mapping: String,
}

impl Default for SpecConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mapping: "/openapi".to_string(),
        }
    }
}

/// Specification document source.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Explicit document file. Takes precedence over `search_dir`.
    pub path: Option<PathBuf>,

    /// Directory searched for `openapi.yaml`, `openapi.yml`, `openapi.json`.
    pub search_dir: PathBuf,

    /// Reload the document when the file changes.
    pub watch: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            path: None,
            search_dir: PathBuf::from("."),
            watch: false,
        }
    }
}

/// Documentation UI configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiConfig {
    /// Serve the UI and its redirect filter.
    pub enabled: bool,

    /// UI mount path. A trailing `*` or `/` is ignored.
    pub mapping: String,

    /// Highest-priority override for the server that hosts the specification.
    pub specification_server: Option<String>,

    /// Directory holding the UI's static assets.
    pub static_dir: Option<PathBuf>,

    /// Runtime inference of the caller-visible base URL.
    pub server_auto_config: AutoConfigConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mapping: "/api-specs/ui".to_string(),
            specification_server: None,
            static_dir: None,
            server_auto_config: AutoConfigConfig::default(),
        }
    }
}

impl UiConfig {
    /// Mount path with any trailing `*` and `/` removed.
    pub fn normalized_mapping(&self) -> String {
        let mapping = self.mapping.strip_suffix('*').unwrap_or(&self.mapping);
        mapping.strip_suffix('/').unwrap_or(mapping).to_string()
    }
}

/// Server auto-configuration switches.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AutoConfigConfig {
    /// Infer the base URL from each UI request and advertise it first.
    pub enabled: bool,

    /// Recover a proxy-rewritten prefix from `X-Original-URI`.
    pub original_uri_check: bool,
}

/// Content negotiation policy.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct NegotiationConfig {
    /// Quality values closer than this are treated as tied.
    pub tie_tolerance: f64,

    /// Format chosen when both formats tie at the highest quality.
    pub tie_break: Format,
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self {
            tie_tolerance: crate::negotiation::DEFAULT_TIE_TOLERANCE,
            tie_break: Format::Yaml,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
