//! Durable ordered collections of uniquely-keyed entities.
//!
//! A [`Collection`] owns an ordered list of entities and mirrors it to a
//! single [`Backend`](crate::backend::Backend) key. The full snapshot is
//! re-serialized on every mutation, synchronously, before the mutating call
//! returns; on startup the snapshot is restored, or the collection is seeded
//! from defaults when the key does not exist yet.
//!
//! The mutation contract, in order: apply the change in memory, persist the
//! whole snapshot, then notify subscribers. A persist failure rolls the
//! in-memory change back and surfaces the error, so memory and storage never
//! diverge. Subscribers therefore only ever observe durable state.
//!
//! Ordering is insertion order and carries no correctness semantics beyond
//! display: [`Placement`] decides whether new entities go to the front
//! (newest-first lists) or the back (append-style lists).

pub mod errors;

pub use errors::CollectionError;

use crate::Result;
use crate::backend::Backend;
use crate::entity::{Entity, EntityId};
use std::sync::Arc;
use tracing::{debug, error};

/// Where a collection inserts new entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Append new entities after existing ones.
    #[default]
    Back,
    /// Prepend new entities before existing ones, for newest-first lists.
    Front,
}

/// The kind of mutation a [`ChangeEvent`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// An entity was inserted.
    Added,
    /// An existing entity was partially updated.
    Patched,
    /// An entity was removed.
    Removed,
}

/// Notification delivered to subscribers after a mutation has been persisted.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    /// Backend key of the collection that changed.
    pub collection: String,
    /// What happened.
    pub change: Change,
    /// The entity the change was about.
    pub id: EntityId,
}

/// Callback invoked after a persisted mutation.
///
/// Callbacks receive event data only, never a reference back into the
/// collection, so they cannot re-enter it. A failing callback is logged and
/// does not affect the already-persisted mutation.
pub type ChangeCallback = dyn Fn(&ChangeEvent) -> Result<()> + Send + Sync;

/// A durable, ordered, uniquely-keyed set of entities.
///
/// Uniqueness is keyed on [`Entity::id`]: [`Collection::add`] refuses a
/// duplicate id and never overwrites. Lookups and removals by an absent id
/// are no-ops reported through the returned `bool`; an `Err` always means a
/// storage or encoding failure.
pub struct Collection<T: Entity> {
    name: String,
    placement: Placement,
    items: Vec<T>,
    backend: Arc<dyn Backend>,
    subscribers: Vec<Arc<ChangeCallback>>,
}

impl<T: Entity> std::fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("name", &self.name)
            .field("placement", &self.placement)
            .field("len", &self.items.len())
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl<T: Entity> Collection<T> {
    /// Opens a collection under the given backend key.
    ///
    /// If the key holds a snapshot it is restored; undecodable bytes are a
    /// hard error. If the key does not exist the collection is seeded from
    /// `defaults` and the seed is persisted immediately, so a first run and
    /// a restored run leave identical storage behind.
    ///
    /// # Arguments
    /// * `name` - The backend key this collection mirrors itself to.
    /// * `placement` - Where [`Collection::add`] inserts new entities.
    /// * `backend` - Shared storage backend.
    /// * `defaults` - Seed entities for a first run.
    pub fn open(
        name: impl Into<String>,
        placement: Placement,
        backend: Arc<dyn Backend>,
        defaults: Vec<T>,
    ) -> Result<Self> {
        let name = name.into();
        let items = match backend.get(&name)? {
            Some(bytes) => {
                let items: Vec<T> = serde_json::from_slice(&bytes).map_err(|source| {
                    CollectionError::DeserializationFailed {
                        collection: name.clone(),
                        source,
                    }
                })?;
                debug!(collection = %name, count = items.len(), "Restored collection from backend");
                items
            }
            None => {
                let bytes = serde_json::to_vec(&defaults).map_err(|source| {
                    CollectionError::SerializationFailed {
                        collection: name.clone(),
                        source,
                    }
                })?;
                backend.set(&name, bytes)?;
                debug!(collection = %name, count = defaults.len(), "Seeded collection with defaults");
                defaults
            }
        };
        Ok(Self {
            name,
            placement,
            items,
            backend,
            subscribers: Vec::new(),
        })
    }

    /// Returns the backend key this collection is stored under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns all entities in insertion order.
    pub fn all(&self) -> &[T] {
        &self.items
    }

    /// Looks up an entity by id.
    pub fn get(&self, id: &EntityId) -> Option<&T> {
        self.items.iter().find(|e| e.id() == id)
    }

    /// Returns true if an entity with this id exists.
    pub fn contains(&self, id: &EntityId) -> bool {
        self.items.iter().any(|e| e.id() == id)
    }

    /// Returns the number of entities.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the collection holds no entities.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Inserts a new entity at the collection's placement position.
    ///
    /// # Returns
    /// `Ok(true)` if the entity was inserted and persisted, `Ok(false)` if
    /// an entity with the same id already exists (the existing entity is
    /// never overwritten), or an `Err` on storage failure.
    pub fn add(&mut self, entity: T) -> Result<bool> {
        if self.contains(entity.id()) {
            debug!(collection = %self.name, id = %entity.id(), "Rejected duplicate id");
            return Ok(false);
        }
        let id = entity.id().clone();
        match self.placement {
            Placement::Front => self.items.insert(0, entity),
            Placement::Back => self.items.push(entity),
        }
        if let Err(e) = self.persist() {
            // Roll back so memory never diverges from storage
            match self.placement {
                Placement::Front => {
                    self.items.remove(0);
                }
                Placement::Back => {
                    self.items.pop();
                }
            }
            return Err(e);
        }
        self.notify(Change::Added, id);
        Ok(true)
    }

    /// Removes the entity with the given id.
    ///
    /// # Returns
    /// `Ok(true)` if the entity existed and the removal was persisted,
    /// `Ok(false)` if no such entity exists, or an `Err` on storage failure.
    pub fn remove(&mut self, id: &EntityId) -> Result<bool> {
        let Some(idx) = self.items.iter().position(|e| e.id() == id) else {
            return Ok(false);
        };
        let removed = self.items.remove(idx);
        if let Err(e) = self.persist() {
            self.items.insert(idx, removed);
            return Err(e);
        }
        self.notify(Change::Removed, id.clone());
        Ok(true)
    }

    /// Merges a partial update into the entity with the given id.
    ///
    /// Fields the patch leaves unset keep their current value; the entity
    /// keeps its position in the order.
    ///
    /// # Returns
    /// `Ok(true)` if the entity existed and the update was persisted,
    /// `Ok(false)` if no such entity exists, or an `Err` on storage failure.
    pub fn patch(&mut self, id: &EntityId, patch: T::Patch) -> Result<bool> {
        let Some(idx) = self.items.iter().position(|e| e.id() == id) else {
            return Ok(false);
        };
        let previous = self.items[idx].clone();
        self.items[idx].apply(patch);
        if let Err(e) = self.persist() {
            self.items[idx] = previous;
            return Err(e);
        }
        self.notify(Change::Patched, id.clone());
        Ok(true)
    }

    /// Registers a callback invoked after every persisted mutation.
    pub fn subscribe(&mut self, callback: Arc<ChangeCallback>) {
        self.subscribers.push(callback);
    }

    /// Re-serializes the full snapshot to the backend key.
    fn persist(&self) -> Result<()> {
        let bytes =
            serde_json::to_vec(&self.items).map_err(|source| CollectionError::SerializationFailed {
                collection: self.name.clone(),
                source,
            })?;
        self.backend.set(&self.name, bytes)
    }

    /// Delivers a change event to every subscriber, after the persist.
    fn notify(&self, change: Change, id: EntityId) {
        let event = ChangeEvent {
            collection: self.name.clone(),
            change,
            id,
        };
        for callback in &self.subscribers {
            if let Err(e) = callback(&event) {
                error!(collection = %self.name, error = %e, "Change callback failed");
            }
        }
    }
}
