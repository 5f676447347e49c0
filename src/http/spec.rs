//! Specification endpoint.

use axum::{
    extract::State,
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderMap, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
};

use crate::document::DOCUMENT_UNAVAILABLE_MESSAGE;
use crate::http::request::query_param;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Serve the document in the negotiated format.
pub async fn spec_handler(State(state): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    let Some(document) = state.documents.get() else {
        tracing::error!("Specification document requested before it was built");
        metrics::record_document_unavailable();
        return unavailable();
    };

    let format_override = query_param(uri.query(), "format");
    let accept = headers.get(ACCEPT).and_then(|value| value.to_str().ok());
    let format = state.negotiation.negotiate(format_override.as_deref(), accept);

    match document.render(format) {
        Ok(body) => {
            tracing::debug!(format = %format, "Serving specification document");
            metrics::record_document_served(format.as_str());
            (StatusCode::OK, [(CONTENT_TYPE, format.mime_type())], body).into_response()
        }
        Err(e) => {
            tracing::error!(format = %format, error = %e, "Failed to serialize specification document");
            unavailable()
        }
    }
}

fn unavailable() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        DOCUMENT_UNAVAILABLE_MESSAGE,
    )
        .into_response()
}
