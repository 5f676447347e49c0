//! Specification document watcher for hot reload.

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::config::schema::DocumentConfig;
use crate::document::{load_document, load_document_file, resolve_document_path, DocumentSlot};

/// Load the configured document into `slot`, then watch its file if
/// `document.watch` is set.
///
/// A file that exists but fails to load is still watched, so fixing it
/// installs the document without a restart.
pub fn load_and_watch(config: &DocumentConfig, slot: &Arc<DocumentSlot>) -> Option<RecommendedWatcher> {
    let path = match load_document(config) {
        Ok((path, document)) => {
            slot.install(document);
            Some(path)
        }
        Err(e) => {
            let path = resolve_document_path(config).ok().filter(|path| path.is_file());
            if config.watch && path.is_some() {
                tracing::warn!(error = %e, "Specification document unavailable, waiting for the file to change");
            } else {
                tracing::warn!(error = %e, "Specification document unavailable until restart");
            }
            path
        }
    };

    if !config.watch {
        return None;
    }

    match DocumentWatcher::new(&path?, Arc::clone(slot)).run() {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            tracing::error!(error = %e, "Failed to start document watcher");
            None
        }
    }
}

/// Reloads the document file into a slot whenever it changes.
pub struct DocumentWatcher {
    path: PathBuf,
    slot: Arc<DocumentSlot>,
}

impl DocumentWatcher {
    pub fn new(path: &Path, slot: Arc<DocumentSlot>) -> Self {
        Self {
            path: path.to_path_buf(),
            slot,
        }
    }

    /// Start watching the file in a background thread.
    ///
    /// Watching stops when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let slot = Arc::clone(&self.slot);
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!(path = ?path, "Document change detected, reloading");
                        match load_document_file(&path) {
                            Ok(document) => {
                                slot.install(document);
                            }
                            Err(e) => {
                                tracing::error!(error = %e, "Failed to reload document, keeping current one");
                            }
                        }
                    }
                }
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Document watcher started");
        Ok(watcher)
    }
}
