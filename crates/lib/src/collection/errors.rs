//! Error types for durable collection operations.
//!
//! This module defines structured error types for collection snapshot
//! encoding and decoding. Storage-level failures surface as
//! [`BackendError`](crate::backend::BackendError) instead.

use thiserror::Error;

/// Errors that can occur while encoding or decoding a collection snapshot.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
/// - Field additions/changes require a major version bump
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CollectionError {
    /// Serialization of a collection snapshot failed.
    #[error("Serialization failed for collection '{collection}'")]
    SerializationFailed {
        /// Backend key of the collection
        collection: String,
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// Stored snapshot bytes could not be decoded.
    ///
    /// This means the durable copy of the collection is corrupt, so startup
    /// fails rather than silently dropping data.
    #[error("Deserialization failed for collection '{collection}'")]
    DeserializationFailed {
        /// Backend key of the collection
        collection: String,
        /// The underlying deserialization error
        #[source]
        source: serde_json::Error,
    },
}

impl CollectionError {
    /// Check if this error is related to serialization.
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, CollectionError::SerializationFailed { .. })
    }

    /// Check if this error indicates corrupt stored data.
    pub fn is_corrupt_data(&self) -> bool {
        matches!(self, CollectionError::DeserializationFailed { .. })
    }

    /// Get the collection name associated with this error.
    pub fn collection_name(&self) -> &str {
        match self {
            CollectionError::SerializationFailed { collection, .. }
            | CollectionError::DeserializationFailed { collection, .. } => collection,
        }
    }
}

// Conversion from CollectionError to the main Error type
impl From<CollectionError> for crate::Error {
    fn from(err: CollectionError) -> Self {
        crate::Error::Collection(err)
    }
}
