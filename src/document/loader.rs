//! Locating and parsing the static specification file.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::DocumentConfig;
use crate::document::{DocumentError, SpecDocument};
use crate::negotiation::Format;

/// File names probed in `search_dir`, in order.
const CANDIDATES: [&str; 3] = ["openapi.yaml", "openapi.yml", "openapi.json"];

/// Format implied by a file extension. Anything but `yaml`/`yml` is JSON.
pub fn format_for_path(path: &Path) -> Format {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
            Format::Yaml
        }
        _ => Format::Json,
    }
}

/// Find the document file named by the configuration.
pub fn resolve_document_path(config: &DocumentConfig) -> Result<PathBuf, DocumentError> {
    if let Some(path) = &config.path {
        return Ok(path.clone());
    }

    CANDIDATES
        .iter()
        .map(|name| config.search_dir.join(name))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| DocumentError::NotFound(config.search_dir.display().to_string()))
}

/// Parse document text in the given format.
pub fn parse_document(content: &str, format: Format) -> Result<SpecDocument, DocumentError> {
    let value: Value = match format {
        Format::Yaml => serde_yaml::from_str(content)?,
        Format::Json => serde_json::from_str(content)?,
    };
    SpecDocument::from_value(value)
}

/// Load the document from a file.
pub fn load_document_file(path: &Path) -> Result<SpecDocument, DocumentError> {
    let content = fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_document(&content, format_for_path(path))
}

/// Resolve and load the configured document.
pub fn load_document(config: &DocumentConfig) -> Result<(PathBuf, SpecDocument), DocumentError> {
    let path = resolve_document_path(config)?;
    let document = load_document_file(&path)?;
    tracing::info!(
        path = %path.display(),
        servers = document.servers().len(),
        "Specification document loaded"
    );
    Ok((path, document))
}
