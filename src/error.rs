//! Error types for the analyzer.
//!
//! Only conditions that make a whole call meaningless are errors. Per-file
//! problems (unreadable files, syntax errors, missing or malformed manifests)
//! are logged and degrade to empty output instead.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to callers of the analyzer.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    /// The project root does not exist or is not a directory.
    #[error("project root not found or not a directory: {}", .0.display())]
    NotFound(PathBuf),

    /// The project name cannot be used as a store key.
    #[error("invalid project name {0:?}: must be a single path component")]
    InvalidProjectName(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A persisted analysis exists but cannot be decoded.
    #[error("malformed stored analysis {}: {source}", path.display())]
    StoredAnalysis {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize analysis: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl AnalyzeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalyzeError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzeError>;
