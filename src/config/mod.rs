//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → read once by the HTTP server and the gateway at startup
//!
//! On document change (document.watch = true):
//!     watcher.rs detects change
//!     → document loader parses the new file
//!     → atomic swap in the DocumentSlot
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    AutoConfigConfig, DocumentConfig, GatewayConfig, ListenerConfig, NegotiationConfig,
    ObservabilityConfig, ServerConfig, SpecConfig, TimeoutConfig, UiConfig,
};
pub use validation::{validate_config, ValidationError};
pub use watcher::{load_and_watch, DocumentWatcher};
