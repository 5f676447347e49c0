//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the specification endpoint and the UI mount
//! - Wire up middleware (UI filter, timeout, request ID, tracing)
//! - Bind server to listener and stop on the shutdown signal

use axum::{http::StatusCode, middleware, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::document::DocumentSlot;
use crate::gateway::{GatewaySettings, UiRedirectGateway};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::spec::spec_handler;
use crate::http::ui::{ui_assets_missing, ui_filter};
use crate::lifecycle::Shutdown;
use crate::negotiation::NegotiationPolicy;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub documents: Arc<DocumentSlot>,
    pub negotiation: NegotiationPolicy,
}

/// HTTP server for the specification and its UI.
pub struct HttpServer {
    config: GatewayConfig,
    documents: Arc<DocumentSlot>,
}

impl HttpServer {
    pub fn new(config: GatewayConfig, documents: Arc<DocumentSlot>) -> Self {
        Self { config, documents }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// `listener_port` feeds the lowest-priority base URL of static redirects.
    #[allow(deprecated)]
    pub fn build_router(&self, listener_port: Option<u16>) -> Router {
        let state = AppState {
            documents: Arc::clone(&self.documents),
            negotiation: NegotiationPolicy::from(self.config.negotiation),
        };

        let mut router = Router::new();

        if self.config.spec.enabled {
            let spec_path = format!(
                "{}{}",
                self.config.server.context_path.trim_end_matches('/'),
                self.config.spec.mapping
            );
            tracing::info!(path = %spec_path, "Specification endpoint enabled");
            router = router.route(&spec_path, get(spec_handler));
        }

        let mut router = router.with_state(state);

        if self.config.ui.enabled {
            let document = self.documents.get();
            let settings = GatewaySettings::from_config(&self.config, listener_port, document.as_deref());
            tracing::info!(
                ui_path = %settings.ui_path,
                spec_url = %settings.spec_url,
                auto_configure = settings.auto_configure,
                "UI enabled"
            );

            router = match &self.config.ui.static_dir {
                Some(dir) => router.nest_service(&settings.ui_path, ServeDir::new(dir)),
                None => router.nest_service(&settings.ui_path, get(ui_assets_missing)),
            };

            let gateway = Arc::new(UiRedirectGateway::new(settings, Arc::clone(&self.documents)));
            router = router.layer(middleware::from_fn_with_state(gateway, ui_filter));
        }

        router
            .fallback(|| async { (StatusCode::NOT_FOUND, "Not found") })
            .layer(TimeoutLayer::new(Duration::from_secs(self.config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.build_router(Some(addr.port()));

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown.signalled())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
