use std::path::PathBuf;

use thiserror::Error;

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    /// Descriptor manifest missing
    #[error("descriptor manifest not found: {path:?}")]
    ManifestNotFound { path: PathBuf },

    /// Search path missing or unreadable
    #[error("search path unreadable: {path:?}: {source}")]
    SearchPath {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Descriptor-set decode error
    #[error("invalid descriptor set {path:?}: {source}")]
    Decode {
        path: PathBuf,
        source: prost::DecodeError,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Main result type
pub type Result<T> = std::result::Result<T, Error>;
