//! OpenAPI specification gateway library.

pub mod config;
pub mod document;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod negotiation;
pub mod observability;

pub use config::GatewayConfig;
pub use document::{DocumentSlot, SpecDocument};
pub use gateway::UiRedirectGateway;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use negotiation::{negotiate, Format};
