//! UI redirect gateway.
//!
//! # Data Flow
//! ```text
//! UI request (path, query, Host, X-Original-URI)
//!     → path contains ui_path?           no  → PassThrough
//!     → asset.rs: static file / url=?    yes → PassThrough
//!     → auto-configuration disabled?     yes → static redirect
//!     → root path (path.rs) + root URL
//!     → servers.rs: reconcile under the document lock
//!     → redirect.rs: RedirectContext → Location
//!     (any failure on the dynamic path → static redirect + warning)
//! ```
//!
//! # Design Decisions
//! - Decided once per request, rendered by the HTTP layer
//! - Only auto-configuring requests touch the shared server list
//! - Failures never reach the caller; the static target always exists

pub mod asset;
pub mod loopback;
pub mod path;
pub mod redirect;
pub mod servers;
pub mod settings;

use std::sync::Arc;
use url::Url;

use crate::document::DocumentSlot;
use crate::observability::metrics;

pub use redirect::{GatewayDecision, Redirect, RedirectContext, RedirectOutcome, ResolveError};
pub use servers::ServerListUpdate;
pub use settings::GatewaySettings;

/// Request metadata the gateway decides on.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiRequest<'a> {
    /// Request path without query.
    pub path: &'a str,
    pub query: Option<&'a str>,
    /// `scheme://host[:port]` as perceived by this server.
    pub root_url: Option<&'a str>,
    /// Value of `X-Original-URI`, if sent.
    pub original_uri: Option<&'a str>,
}

/// Static-vs-redirect decision filter for the documentation UI.
#[derive(Debug, Clone)]
pub struct UiRedirectGateway {
    settings: GatewaySettings,
    documents: Arc<DocumentSlot>,
}

impl UiRedirectGateway {
    pub fn new(settings: GatewaySettings, documents: Arc<DocumentSlot>) -> Self {
        Self {
            settings,
            documents,
        }
    }

    /// Decide what to do with one request.
    pub fn decide(&self, request: &UiRequest<'_>) -> GatewayDecision {
        if !request.path.contains(self.settings.ui_path.as_str())
            || asset::is_static_request(request.path, request.query)
        {
            return GatewayDecision::PassThrough;
        }

        let redirect = if self.settings.auto_configure {
            match self.auto_configure(request) {
                Ok((context, update)) => Redirect {
                    location: context.location(),
                    outcome: RedirectOutcome::AutoConfigured { context, update },
                },
                Err(e) => {
                    tracing::warn!(
                        reason = %e,
                        "Failed to dynamically resolve redirect from request header, falling back to static configuration"
                    );
                    Redirect {
                        location: self.static_redirect(),
                        outcome: RedirectOutcome::FallbackFromError(e),
                    }
                }
            }
        } else {
            Redirect {
                location: self.static_redirect(),
                outcome: RedirectOutcome::Static,
            }
        };

        GatewayDecision::Redirect(redirect)
    }

    /// Target built purely from configuration.
    pub fn static_redirect(&self) -> String {
        format!(
            "{}{}{}{}{}",
            self.settings.ui_path,
            redirect::URL_QUERY,
            self.settings.spec_url,
            redirect::OAUTH_QUERY,
            self.settings.oauth2_redirect_url
        )
    }

    fn auto_configure(
        &self,
        request: &UiRequest<'_>,
    ) -> Result<(RedirectContext, ServerListUpdate), ResolveError> {
        let root_path = self.root_path(request);
        let origin = request.root_url.ok_or(ResolveError::MissingRootUrl)?;
        let root_url = format!("{origin}{root_path}");
        let root_uri = Url::parse(&root_url).map_err(|e| ResolveError::InvalidRootUrl {
            url: root_url.clone(),
            reason: e.to_string(),
        })?;

        let document = self.documents.get().ok_or(ResolveError::DocumentUnavailable)?;
        let update = document
            .reconcile_servers(|current| servers::reconcile(current, &root_url, &root_uri));

        if update != ServerListUpdate::Unchanged {
            tracing::info!(root_url = %root_url, update = %update, "Server list updated from request");
        }
        metrics::record_server_list_update(update.as_str());

        let context = RedirectContext::new(
            root_url,
            root_path,
            &self.settings.spec_path,
            &self.settings.ui_path,
        );
        Ok((context, update))
    }

    fn root_path(&self, request: &UiRequest<'_>) -> String {
        if !self.settings.forward_original_uri {
            return String::new();
        }
        request
            .original_uri
            .map(|uri| path::root_path_from_original_uri(uri, &self.settings.ui_path))
            .unwrap_or_default()
    }
}
