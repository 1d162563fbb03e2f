//! Entity model shared by every durable collection.
//!
//! An [`Entity`] is a uniquely-keyed record that a [`Collection`] can store,
//! look up, and partially update. The associated [`Entity::Patch`] type
//! carries a partial update: fields left unset keep their current value, so
//! callers never have to round-trip a whole record to change one field.
//!
//! [`Collection`]: crate::collection::Collection

mod id;

pub use id::EntityId;

use serde::{Serialize, de::DeserializeOwned};

/// A record stored in a durable collection.
///
/// Entities are plain serde-serializable values. The id returned by
/// [`Entity::id`] must never change for the lifetime of the record; the
/// collection keys its uniqueness checks and lookups on it.
pub trait Entity: Clone + Serialize + DeserializeOwned {
    /// Partial update accepted by [`Collection::patch`].
    ///
    /// [`Collection::patch`]: crate::collection::Collection::patch
    type Patch;

    /// Returns the unique identifier of this entity.
    fn id(&self) -> &EntityId;

    /// Merges a partial update into this entity.
    ///
    /// Fields the patch leaves unset keep their current value. The id is not
    /// patchable.
    fn apply(&mut self, patch: Self::Patch);
}
