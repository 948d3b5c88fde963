//! Error types for manifest loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading `package.json`
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest does not exist
    #[error("package.json not found: {0}")]
    NotFound(PathBuf),

    /// The manifest exists but could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid JSON
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
