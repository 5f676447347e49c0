//! Static gateway settings resolved once at startup.
//!
//! The static redirect points at a base URL chosen from, lowest to highest
//! priority:
//! 1. `http://localhost:<listener port>`
//! 2. the first server advertised by the document
//! 3. `server.base_url`
//! 4. `ui.specification_server`

use url::Url;

use crate::config::schema::GatewayConfig;
use crate::document::SpecDocument;
use crate::gateway::path::strip_trailing_slashes;

/// Page the UI uses to complete OAuth2 flows.
pub const OAUTH_HTML_PAGE: &str = "/oauth2-redirect.html";

/// Everything the gateway needs to build redirect targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewaySettings {
    /// UI mount path including the context path.
    pub ui_path: String,
    /// Specification path including the context path.
    pub spec_path: String,
    /// Absolute specification URL for static redirects.
    pub spec_url: String,
    /// Absolute OAuth2 redirect page URL for static redirects.
    pub oauth2_redirect_url: String,
    pub auto_configure: bool,
    pub forward_original_uri: bool,
}

impl GatewaySettings {
    pub fn from_config(
        config: &GatewayConfig,
        listener_port: Option<u16>,
        document: Option<&SpecDocument>,
    ) -> Self {
        let base_url = resolve_base_url(config, listener_port, document);
        let context_path = strip_trailing_slashes(&config.server.context_path);
        let ui_mapping = config.ui.normalized_mapping();
        let spec_mapping = &config.spec.mapping;

        Self {
            ui_path: format!("{context_path}{ui_mapping}"),
            spec_path: format!("{context_path}{spec_mapping}"),
            spec_url: format!("{base_url}{context_path}{spec_mapping}"),
            oauth2_redirect_url: format!("{base_url}{context_path}{ui_mapping}{OAUTH_HTML_PAGE}"),
            auto_configure: config.ui.server_auto_config.enabled,
            forward_original_uri: config.ui.server_auto_config.original_uri_check,
        }
    }
}

/// Base URL of the server that hosts the specification.
pub fn resolve_base_url(
    config: &GatewayConfig,
    listener_port: Option<u16>,
    document: Option<&SpecDocument>,
) -> String {
    let mut base_url = match listener_port {
        Some(port) => format!("http://localhost:{port}"),
        None => "http://localhost".to_string(),
    };

    if let Some(first) = document.and_then(|doc| doc.servers().into_iter().next()) {
        match Url::parse(&first.url) {
            Ok(url) => {
                if let Some(origin) = server_origin(&url) {
                    base_url = origin;
                }
            }
            Err(e) => tracing::warn!(url = %first.url, error = %e, "Server URL invalid"),
        }
    }

    if let Some(configured) = &config.server.base_url {
        base_url = configured.clone();
    }

    if let Some(server) = config.ui.specification_server.as_deref().filter(|s| !s.is_empty()) {
        base_url = server.to_string();
    }

    strip_trailing_slashes(&base_url).to_string()
}

fn server_origin(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}://{host}:{port}", url.scheme()),
        None => format!("{}://{host}", url.scheme()),
    })
}
