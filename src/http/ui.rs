//! UI filter middleware.
//!
//! Runs the redirect gateway in front of the static UI files: assets and
//! already-configured entry points continue downstream, everything else
//! under the UI path is answered with `302 Found`.

use axum::{
    body::Body,
    extract::State,
    http::{header::LOCATION, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::gateway::{GatewayDecision, UiRedirectGateway, UiRequest};
use crate::http::request::{perceived_root_url, X_ORIGINAL_URI};
use crate::observability::metrics;

pub async fn ui_filter(
    State(gateway): State<Arc<UiRedirectGateway>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let root_url = perceived_root_url(&request);
    let decision = gateway.decide(&UiRequest {
        path: request.uri().path(),
        query: request.uri().query(),
        root_url: root_url.as_deref(),
        original_uri: request
            .headers()
            .get(X_ORIGINAL_URI)
            .and_then(|value| value.to_str().ok()),
    });

    match decision {
        GatewayDecision::PassThrough => {
            metrics::record_passthrough();
            next.run(request).await
        }
        GatewayDecision::Redirect(redirect) => {
            tracing::debug!(
                location = %redirect.location,
                outcome = redirect.outcome.as_str(),
                "Redirecting to UI entry point"
            );
            metrics::record_redirect(redirect.outcome.as_str());
            found(&redirect.location, &gateway)
        }
    }
}

fn found(location: &str, gateway: &UiRedirectGateway) -> Response {
    let value = HeaderValue::from_str(location).or_else(|e| {
        tracing::warn!(location = %location, error = %e, "Redirect target is not a valid header, using static target");
        HeaderValue::from_str(&gateway.static_redirect())
    });

    match value {
        Ok(value) => (StatusCode::FOUND, [(LOCATION, value)]).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Static redirect target is not a valid header");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Downstream when no static UI directory is configured.
pub async fn ui_assets_missing() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Swagger UI not found")
}
