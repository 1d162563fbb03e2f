//! Error types for the Stockroom storage backends.
//!
//! This module defines structured error types for key-value storage
//! operations, providing better error context and type safety compared to
//! string-based errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during backend storage operations.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
/// - Field additions/changes require a major version bump
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum BackendError {
    /// File I/O error.
    #[error("File I/O error for key {key}")]
    FileIo {
        /// The backend key the operation was for
        key: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Backend data directory could not be created or accessed.
    #[error("Data directory unavailable: {path}")]
    DirectoryUnavailable {
        /// The directory that was unavailable
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Key is not usable by this backend.
    #[error("Invalid backend key: {key}")]
    InvalidKey {
        /// The rejected key
        key: String,
    },
}

impl BackendError {
    /// Check if this error is related to I/O operations.
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            BackendError::FileIo { .. } | BackendError::DirectoryUnavailable { .. }
        )
    }

    /// Check if this error indicates a rejected key.
    pub fn is_invalid_key(&self) -> bool {
        matches!(self, BackendError::InvalidKey { .. })
    }

    /// Get the backend key if this error is about a specific key.
    pub fn key(&self) -> Option<&str> {
        match self {
            BackendError::FileIo { key, .. } | BackendError::InvalidKey { key } => Some(key),
            BackendError::DirectoryUnavailable { .. } => None,
        }
    }
}

// Conversion from BackendError to the main Error type
impl From<BackendError> for crate::Error {
    fn from(err: BackendError) -> Self {
        crate::Error::Backend(err)
    }
}
