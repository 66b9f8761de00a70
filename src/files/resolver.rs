//! Request path to on-disk file.
//!
//! Resolution happens in two steps. The decoded path is first checked for
//! traversal (`../` anywhere, or a leading `/`) and joined onto the server
//! root. Only the final component of that candidate is then looked up,
//! case-insensitively, among the entries of the lookup directory. The lookup
//! is single-level: subdirectories in the request only shape the candidate
//! that gets logged, never where the match is searched.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::config::ServerConfig;
use crate::files::index::NameIndex;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("path escapes the server root: {0}")]
    Traversal(String),
    #[error("file not found: {0}")]
    NotFound(String),
}

/// A file the request resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Lookup directory joined with the matched entry name
    pub absolute_path: PathBuf,
    /// Extension of the matched name, empty if it has none
    pub extension: String,
}

/// Rejects paths containing `../` or starting with `/`.
///
/// Deliberately a substring check: `..` without a trailing slash and
/// backslashes pass through untouched.
pub fn sanitize(path: &str) -> Result<&str, ResolveError> {
    if path.contains("../") || path.starts_with('/') {
        return Err(ResolveError::Traversal(path.to_string()));
    }
    Ok(path)
}

/// Text after the last `.`; empty when there is no dot or the last dot is
/// the first character (`.profile`).
pub fn extension_of(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(0) | None => "",
        Some(dot) => &file_name[dot + 1..],
    }
}

pub struct PathResolver {
    root: PathBuf,
    index: NameIndex,
}

impl PathResolver {
    /// `lookup_dir` is made absolute once here so resolved targets do not
    /// depend on later working-directory changes.
    pub fn new(root: impl Into<PathBuf>, lookup_dir: impl AsRef<Path>, ttl: Option<Duration>) -> Self {
        let lookup_dir = lookup_dir.as_ref();
        let lookup_dir = std::fs::canonicalize(lookup_dir).unwrap_or_else(|_| lookup_dir.to_path_buf());
        Self {
            root: root.into(),
            index: NameIndex::new(lookup_dir, ttl),
        }
    }

    pub fn from_config(cfg: &ServerConfig) -> Self {
        Self::new(
            cfg.root_dir.clone(),
            &cfg.lookup_dir,
            cfg.name_index_ttl_ms.map(Duration::from_millis),
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn lookup_dir(&self) -> &Path {
        self.index.dir()
    }

    /// Root and sanitized path joined with a single separator.
    pub fn candidate(&self, path: &str) -> Result<PathBuf, ResolveError> {
        let safe = sanitize(path)?;
        Ok(self.root.join(safe))
    }

    pub async fn resolve(&self, path: &str) -> Result<ResolvedTarget, ResolveError> {
        let candidate = self.candidate(path)?;
        tracing::info!("Full file path {}", candidate.display());

        let Some(base_name) = candidate.file_name().and_then(|n| n.to_str()) else {
            return Err(ResolveError::NotFound(path.to_string()));
        };

        let matched = match self.index.find(base_name).await {
            Ok(Some(name)) => name,
            Ok(None) => return Err(ResolveError::NotFound(path.to_string())),
            Err(e) => {
                tracing::error!(
                    dir = %self.index.dir().display(),
                    error = %e,
                    "Could not list lookup directory"
                );
                return Err(ResolveError::NotFound(path.to_string()));
            }
        };

        Ok(ResolvedTarget {
            extension: extension_of(&matched).to_string(),
            absolute_path: self.index.dir().join(&matched),
        })
    }
}
