//! Specification document subsystem.
//!
//! # Data Flow
//! ```text
//! openapi.{yaml,yml,json}
//!     → loader.rs (locate, parse)
//!     → SpecDocument (body + mutex-guarded server list)
//!     → DocumentSlot (Arc swap, shared by every request)
//!
//! Readers:   spec endpoint → snapshot → render(Format)
//! Writers:   UI gateway    → reconcile_servers (one at a time)
//!            watcher       → install(new document)
//! ```
//!
//! # Design Decisions
//! - The server list is only reachable through accessor methods
//! - Server list changes replace the whole list, never edit in place
//! - An empty slot means "not built yet" and is reported, not negotiated

pub mod loader;
pub mod server;

use arc_swap::ArcSwapOption;
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

use crate::negotiation::Format;

pub use loader::{format_for_path, load_document, load_document_file, parse_document, resolve_document_path};
pub use server::{ServerEntry, ServerVariable, AUTO_CONFIGURED_DESCRIPTION};

/// Body returned when the document has not been built.
pub const DOCUMENT_UNAVAILABLE_MESSAGE: &str =
    "Something went wrong generating the OpenAPI document. Check application logs for more information.";

const SERVERS_KEY: &str = "servers";

/// Errors raised while loading or rendering a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("no openapi.yaml, openapi.yml or openapi.json found in {0}")]
    NotFound(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document root must be an object")]
    NotAnObject,

    #[error("invalid servers list: {0}")]
    InvalidServers(#[source] serde_json::Error),
}

/// An already-built API description with a shared, ordered server list.
#[derive(Debug)]
pub struct SpecDocument {
    body: Map<String, Value>,
    servers: Mutex<Vec<ServerEntry>>,
}

impl SpecDocument {
    /// Build from a parsed document value.
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        let Value::Object(body) = value else {
            return Err(DocumentError::NotAnObject);
        };

        let servers = match body.get(SERVERS_KEY) {
            Some(Value::Null) | None => Vec::new(),
            Some(raw) => {
                serde_json::from_value(raw.clone()).map_err(DocumentError::InvalidServers)?
            }
        };

        Ok(Self {
            body,
            servers: Mutex::new(servers),
        })
    }

    /// Snapshot of the current server list.
    pub fn servers(&self) -> Vec<ServerEntry> {
        self.lock_servers().clone()
    }

    /// Replace the server list.
    pub fn set_servers(&self, servers: Vec<ServerEntry>) {
        *self.lock_servers() = servers;
    }

    /// Read-check-replace the server list as one critical section.
    ///
    /// `reconcile` sees the current list and returns a replacement (or `None`
    /// to keep it) plus a value handed back to the caller.
    pub fn reconcile_servers<R>(
        &self,
        reconcile: impl FnOnce(&[ServerEntry]) -> (Option<Vec<ServerEntry>>, R),
    ) -> R {
        let mut servers = self.lock_servers();
        let (replacement, result) = reconcile(&servers);
        if let Some(replacement) = replacement {
            *servers = replacement;
        }
        result
    }

    /// Full document with the current server list.
    pub fn to_value(&self) -> Value {
        let servers = self.servers();
        let mut body = self.body.clone();
        if !servers.is_empty() || body.contains_key(SERVERS_KEY) {
            let servers = serde_json::to_value(servers).unwrap_or(Value::Array(Vec::new()));
            body.insert(SERVERS_KEY.to_string(), servers);
        }
        Value::Object(body)
    }

    /// Serialize in the requested format.
    pub fn render(&self, format: Format) -> Result<String, DocumentError> {
        let value = self.to_value();
        match format {
            Format::Json => Ok(serde_json::to_string_pretty(&value)?),
            Format::Yaml => Ok(serde_yaml::to_string(&value)?),
        }
    }

    fn lock_servers(&self) -> MutexGuard<'_, Vec<ServerEntry>> {
        self.servers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Shared handle to the current document, empty until one is installed.
#[derive(Debug, Default)]
pub struct DocumentSlot {
    current: ArcSwapOption<SpecDocument>,
}

impl DocumentSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: SpecDocument) -> Self {
        let slot = Self::new();
        slot.install(document);
        slot
    }

    /// Install (or replace) the current document.
    pub fn install(&self, document: SpecDocument) -> Arc<SpecDocument> {
        let document = Arc::new(document);
        self.current.store(Some(document.clone()));
        document
    }

    pub fn get(&self) -> Option<Arc<SpecDocument>> {
        self.current.load_full()
    }

    pub fn is_set(&self) -> bool {
        self.current.load().is_some()
    }
}
