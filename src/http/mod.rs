//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, perceived root URL, query parameters)
//!     → spec.rs (negotiate format, render document)
//!     → ui.rs (gateway decision: 302 or static UI files)
//!     → Send to client
//! ```

pub mod request;
pub mod server;
pub mod spec;
pub mod ui;

pub use request::{X_ORIGINAL_URI, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
