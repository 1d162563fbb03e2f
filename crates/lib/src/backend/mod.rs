//! Backend implementations for Stockroom storage
//!
//! This module provides the core `Backend` trait and the built-in
//! implementations: [`InMemory`] for ephemeral storage and [`OnDisk`] for a
//! directory of per-key files.
//!
//! The `Backend` trait defines the interface for storing and retrieving raw
//! collection snapshots. This allows the store logic ([`Collection`],
//! [`Storefront`]) to be independent of the specific storage mechanism.
//!
//! [`Collection`]: crate::collection::Collection
//! [`Storefront`]: crate::Storefront

use crate::Result;
use std::any::Any;

pub mod errors;
mod in_memory;
mod on_disk;

pub use errors::BackendError;
pub use in_memory::InMemory;
pub use on_disk::OnDisk;

/// Backend trait abstracting the underlying storage mechanism for Stockroom
/// collections.
///
/// The interface is a flat key-value store of byte strings. Every durable
/// collection owns one key and re-writes its full serialized snapshot under
/// that key on each mutation, so backends never need partial updates,
/// iteration, or transactions.
///
/// All backend implementations must be `Send` and `Sync` to allow sharing
/// across stores via `Arc`, and implement `Any` to allow for downcasting if
/// needed.
pub trait Backend: Send + Sync + Any {
    /// Retrieves the value stored under a key.
    ///
    /// # Arguments
    /// * `key` - The key to read.
    ///
    /// # Returns
    /// A `Result` containing `Some(bytes)` if the key exists, `None` if it
    /// does not. An `Err` is reserved for storage failures.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores a value under a key, replacing any previous value.
    ///
    /// # Arguments
    /// * `key` - The key to write.
    /// * `bytes` - The serialized value to store.
    ///
    /// # Returns
    /// A `Result` indicating success or an error during storage.
    fn set(&self, key: &str, bytes: Vec<u8>) -> Result<()>;

    /// Removes a key and its value.
    ///
    /// # Arguments
    /// * `key` - The key to remove.
    ///
    /// # Returns
    /// A `Result` indicating success. Succeeds even if the key doesn't exist.
    fn remove(&self, key: &str) -> Result<()>;

    /// Returns a reference to the backend instance as a dynamic `Any` type.
    ///
    /// This allows for downcasting to a concrete backend implementation if
    /// necessary, enabling access to implementation-specific methods. Use
    /// with caution.
    fn as_any(&self) -> &dyn Any;
}
