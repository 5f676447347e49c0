//! Metrics collection and exposition.
//!
//! # Metrics
//! - `openapi_documents_served_total` (counter): documents served, by format
//! - `openapi_document_unavailable_total` (counter): requests before the document was built
//! - `openapi_ui_redirects_total` (counter): UI redirects, by outcome
//! - `openapi_ui_passthrough_total` (counter): UI requests forwarded to static files
//! - `openapi_server_list_updates_total` (counter): reconciliations, by kind

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_document_served(format: &'static str) {
    counter!("openapi_documents_served_total", "format" => format).increment(1);
}

pub fn record_document_unavailable() {
    counter!("openapi_document_unavailable_total").increment(1);
}

pub fn record_redirect(outcome: &'static str) {
    counter!("openapi_ui_redirects_total", "outcome" => outcome).increment(1);
}

pub fn record_passthrough() {
    counter!("openapi_ui_passthrough_total").increment(1);
}

pub fn record_server_list_update(kind: &'static str) {
    counter!("openapi_server_list_updates_total", "kind" => kind).increment(1);
}
