//! Redirect targets and outcomes.

use thiserror::Error;

use crate::gateway::servers::ServerListUpdate;
use crate::gateway::settings::OAUTH_HTML_PAGE;

pub const URL_QUERY: &str = "/?url=";
pub const OAUTH_QUERY: &str = "&oauth2RedirectUrl=";

/// Why dynamic resolution gave up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("request carries no usable Host header")]
    MissingRootUrl,

    #[error("invalid root URL '{url}': {reason}")]
    InvalidRootUrl { url: String, reason: String },

    #[error("specification document is not available")]
    DocumentUnavailable,
}

/// Per-request inputs of an auto-configured redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectContext {
    /// Caller-visible origin plus `root_path`.
    pub root_url: String,
    /// Reverse-proxy prefix, empty or starting with `/`.
    pub root_path: String,
    pub spec_path: String,
    pub ui_path: String,
    pub oauth_html_page: &'static str,
}

impl RedirectContext {
    pub fn new(root_url: String, root_path: String, spec_path: &str, ui_path: &str) -> Self {
        Self {
            root_url,
            root_path,
            spec_path: spec_path.to_string(),
            ui_path: ui_path.to_string(),
            oauth_html_page: OAUTH_HTML_PAGE,
        }
    }

    /// UI entry point pointed at the caller's own origin.
    pub fn location(&self) -> String {
        let Self {
            root_url,
            root_path,
            spec_path,
            ui_path,
            oauth_html_page,
        } = self;
        format!(
            "{root_path}{ui_path}{URL_QUERY}{root_url}{spec_path}{OAUTH_QUERY}{root_url}{ui_path}{oauth_html_page}"
        )
    }
}

/// How a redirect target was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    /// Auto-configuration disabled; configured URLs used.
    Static,
    /// Target derived from the request; server list reconciled.
    AutoConfigured {
        context: RedirectContext,
        update: ServerListUpdate,
    },
    /// Dynamic resolution failed; configured URLs used.
    FallbackFromError(ResolveError),
}

impl RedirectOutcome {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RedirectOutcome::Static => "static",
            RedirectOutcome::AutoConfigured { .. } => "auto_configured",
            RedirectOutcome::FallbackFromError(_) => "fallback",
        }
    }
}

/// A decided redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub location: String,
    pub outcome: RedirectOutcome,
}

/// Result of running the gateway on one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayDecision {
    /// Forward downstream unchanged.
    PassThrough,
    Redirect(Redirect),
}
