//! Metadata document discovery and parsing.
//!
//! Each search root is either a metadata document itself or a directory walked
//! recursively for files named [`METADATA_FILE_NAME`]. Documents parse independently;
//! the first malformed document fails the whole load.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::MetadataModule;

/// File name of a metadata document.
pub const METADATA_FILE_NAME: &str = "config-metadata.json";

/// Error while loading metadata documents.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read metadata document '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse metadata document '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Find every metadata document under the given search roots, in a deterministic order.
pub fn discover_metadata_files(search_paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut found = Vec::new();

    for base in search_paths {
        if base.is_file() {
            found.push(base.clone());
            continue;
        }
        if !base.is_dir() {
            tracing::debug!(?base, "Metadata search path does not exist, skipping");
            continue;
        }

        WalkDir::new(base)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!(?base, error = %e, "Cannot read metadata search path entry");
                    None
                }
            })
            .filter(|entry| {
                entry.file_type().is_file() && entry.file_name() == METADATA_FILE_NAME
            })
            .for_each(|entry| found.push(entry.into_path()));
    }

    found
}

/// Parse one metadata document file.
pub fn parse_document(path: &Path) -> Result<Vec<MetadataModule>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_metadata_str(&content).map_err(|e| LoadError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parse a metadata document from a JSON string.
pub fn parse_metadata_str(json: &str) -> Result<Vec<MetadataModule>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Discover and parse all metadata documents, concatenating their modules in discovery order.
pub fn load_modules(search_paths: &[PathBuf]) -> Result<Vec<MetadataModule>, LoadError> {
    let mut modules = Vec::new();

    for path in discover_metadata_files(search_paths) {
        let parsed = parse_document(&path)?;
        tracing::debug!(path = %path.display(), modules = parsed.len(), "Loaded metadata document");
        modules.extend(parsed);
    }

    Ok(modules)
}
