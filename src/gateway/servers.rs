//! Server-list reconciliation.
//!
//! # Responsibilities
//! - Find the entry matching the caller's root URI (exact or loopback-equivalent)
//! - Move it to the front, or prepend a synthesized entry
//! - Leave the relative order of every other entry untouched
//!
//! # Design Decisions
//! - Pure over a borrowed list; the document applies the result under its lock
//! - Stored URLs that fail to parse never match and are logged

use std::fmt;
use url::Url;

use crate::document::ServerEntry;
use crate::gateway::loopback::same_loopback;

/// How a reconciliation changed the server list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerListUpdate {
    /// Matching entry was already first.
    Unchanged,
    /// Matching entry moved from `from` to index 0.
    MovedToFront { from: usize },
    /// No entry matched; a new one was prepended.
    Prepended,
}

impl ServerListUpdate {
    pub const fn as_str(self) -> &'static str {
        match self {
            ServerListUpdate::Unchanged => "unchanged",
            ServerListUpdate::MovedToFront { .. } => "moved",
            ServerListUpdate::Prepended => "prepended",
        }
    }
}

impl fmt::Display for ServerListUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Index of the first entry equivalent to `root`.
pub fn find_server(servers: &[ServerEntry], root: &str, root_uri: &Url) -> Option<usize> {
    servers.iter().position(|server| match Url::parse(&server.url) {
        Ok(server_uri) => {
            server.url == root || server_uri == *root_uri || same_loopback(&server_uri, root_uri)
        }
        Err(e) => {
            tracing::warn!(url = %server.url, error = %e, "Failed to parse server URL, skipping");
            false
        }
    })
}

/// Compute the list that advertises `root` first.
///
/// Returns `None` as the replacement when the list is already correct.
pub fn reconcile(
    servers: &[ServerEntry],
    root: &str,
    root_uri: &Url,
) -> (Option<Vec<ServerEntry>>, ServerListUpdate) {
    match find_server(servers, root, root_uri) {
        Some(0) => (None, ServerListUpdate::Unchanged),
        Some(from) => {
            let mut updated = servers.to_vec();
            let entry = updated.remove(from);
            updated.insert(0, entry);
            (Some(updated), ServerListUpdate::MovedToFront { from })
        }
        None => {
            let mut updated = Vec::with_capacity(servers.len() + 1);
            updated.push(ServerEntry::auto_configured(root));
            updated.extend_from_slice(servers);
            (Some(updated), ServerListUpdate::Prepended)
        }
    }
}
