//! Error types and error handling

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias used throughout the scaffolding library
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Scaffolding error type
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScaffoldError {
    /// The user declined to overwrite the target or interrupted a prompt
    #[error("Operation cancelled")]
    Cancelled,

    /// No template package directory exists for a catalog identifier
    #[error("Template package not found: {identifier} (searched {})", join_paths(searched))]
    TemplateNotFound {
        /// Template identifier that was looked up
        identifier: String,
        /// Roots that were searched, in priority order
        searched: Vec<PathBuf>,
    },

    /// The prompt flow finished without settling on a template
    #[error("No template was selected")]
    NoTemplateSelected,

    /// Filesystem operation failed
    #[error("I/O error at {}", path.display())]
    Io {
        /// Path the failed operation was acting on
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Manifest could not be parsed or serialized
    #[error("Manifest error in {}", path.display())]
    Manifest {
        /// Manifest path
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Manifest is valid JSON but not an object
    #[error("Manifest {} is not a JSON object", path.display())]
    InvalidManifest {
        /// Manifest path
        path: PathBuf,
    },

    /// Terminal interaction failed
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// Configuration could not be extracted
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl ScaffoldError {
    /// Attach a path to an I/O error
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Whether this error is a user cancellation rather than a failure
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "no template roots".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
