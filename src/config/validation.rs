//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject a UI mounted at the root path
//! - Validate addresses and URLs
//! - Validate negotiation policy ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("UI cannot be served from root, change ui.mapping")]
    UiAtRoot,

    #[error("{field} must start with '/' (got '{value}')")]
    RelativePath { field: &'static str, value: String },

    #[error("{field} is not a valid URL: '{value}'")]
    InvalidUrl { field: &'static str, value: String },

    #[error("negotiation.tie_tolerance must be within (0, 1) (got {0})")]
    TieTolerance(f64),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.spec.enabled && !config.spec.mapping.starts_with('/') {
        errors.push(ValidationError::RelativePath {
            field: "spec.mapping",
            value: config.spec.mapping.clone(),
        });
    }

    if config.ui.enabled {
        let mapping = config.ui.normalized_mapping();
        if mapping.is_empty() {
            errors.push(ValidationError::UiAtRoot);
        } else if !mapping.starts_with('/') {
            errors.push(ValidationError::RelativePath {
                field: "ui.mapping",
                value: config.ui.mapping.clone(),
            });
        }

        if let Some(server) = config.ui.specification_server.as_deref().filter(|s| !s.is_empty()) {
            if Url::parse(server).is_err() {
                errors.push(ValidationError::InvalidUrl {
                    field: "ui.specification_server",
                    value: server.to_string(),
                });
            }
        }
    }

    let context_path = &config.server.context_path;
    if !context_path.is_empty() && !context_path.starts_with('/') {
        errors.push(ValidationError::RelativePath {
            field: "server.context_path",
            value: context_path.clone(),
        });
    }

    if let Some(base_url) = &config.server.base_url {
        if Url::parse(base_url).is_err() {
            errors.push(ValidationError::InvalidUrl {
                field: "server.base_url",
                value: base_url.clone(),
            });
        }
    }

    let tolerance = config.negotiation.tie_tolerance;
    if !(tolerance > 0.0 && tolerance < 1.0) {
        errors.push(ValidationError::TieTolerance(tolerance));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
