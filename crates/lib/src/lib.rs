//!
//! Stockroom: durable entity stores for a storefront.
//! This library provides the user database, session handling, and the sibling
//! product/review/complaint stores behind a storefront application.
//!
//! ## Core Concepts
//!
//! Stockroom is built around several key concepts:
//!
//! * **Backends (`backend::Backend`)**: A pluggable key/value storage layer holding one JSON snapshot per store (`InMemory` for tests and ephemeral runs, `OnDisk` for real data directories).
//! * **Collections (`collection::Collection`)**: An ordered, durable list of entities over one backend key. Every mutation applies in memory, persists the whole snapshot, and only then notifies subscribers; a failed write rolls the memory back.
//! * **Entities (`entity::Entity`)**: The stored record types (`User`, `Product`, `Review`, `Complaint`), each with an id and a patch type for partial updates.
//! * **Identity (`identity::IdentityStore`)**: The user database plus at most one active session, kept deep-equal to its database record by reconciliation after every mutation. A remembered session survives restarts through a durable id-only slot.
//! * **Stores (`catalog`, `reviews`, `complaints`)**: Domain stores for products, product reviews, and contact/complaint messages.
//! * **Storefront (`storefront::Storefront`)**: The facade that opens every store over one shared backend, seeding first-run fixtures.
//! * **Clock (`clock::Clock`) / Notifier (`notify::Notifier`)**: Injected collaborators for time-based ids/dates and outbound messages, swappable in tests.

pub mod backend;
pub mod catalog;
pub mod clock;
pub mod collection;
pub mod complaints;
pub mod constants;
pub mod entity;
pub mod identity;
pub mod notify;
pub mod reviews;
pub mod storefront;

mod seed;

pub use backend::Backend;
pub use catalog::{CatalogStore, Category, Product, ProductPatch};
pub use clock::{Clock, SystemClock};
pub use collection::{Change, ChangeCallback, ChangeEvent, Collection, Placement};
pub use complaints::{Complaint, ComplaintKind, ComplaintStatus, ComplaintStore};
pub use entity::{Entity, EntityId};
pub use identity::{ActiveSession, IdentityStore, Role, SessionEvent, User, UserPatch};
pub use notify::{LogNotifier, MessageKind, Notifier};
pub use reviews::{Review, ReviewStore};
pub use storefront::Storefront;

/// Test clock, re-exported when the `testing` feature is enabled.
#[cfg(any(test, feature = "testing"))]
pub use clock::{ClockHold, FixedClock};

/// Recording notifier, re-exported when the `testing` feature is enabled.
#[cfg(any(test, feature = "testing"))]
pub use notify::RecordingNotifier;

/// Result type used throughout the stockroom library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the stockroom library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured storage errors from the backend module
    #[error(transparent)]
    Backend(backend::BackendError),

    /// Structured snapshot errors from the collection module
    #[error(transparent)]
    Collection(collection::CollectionError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Backend(_) => "backend",
            Error::Collection(_) => "collection",
        }
    }

    /// Check if this error came from the storage layer.
    pub fn is_storage_error(&self) -> bool {
        matches!(self, Error::Backend(_))
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Backend(backend_err) => backend_err.is_io_error(),
            _ => false,
        }
    }

    /// Check if this error reports a key the backend cannot store.
    pub fn is_invalid_key(&self) -> bool {
        match self {
            Error::Backend(backend_err) => backend_err.is_invalid_key(),
            _ => false,
        }
    }

    /// Check if this error reports an unreadable persisted snapshot.
    pub fn is_corrupt_data(&self) -> bool {
        match self {
            Error::Collection(collection_err) => collection_err.is_corrupt_data(),
            _ => false,
        }
    }

    /// Check if this error is a snapshot serialization failure.
    pub fn is_serialization_error(&self) -> bool {
        match self {
            Error::Collection(collection_err) => collection_err.is_serialization_error(),
            _ => false,
        }
    }

    /// The collection a snapshot error belongs to, if any.
    pub fn collection_name(&self) -> Option<&str> {
        match self {
            Error::Collection(collection_err) => Some(collection_err.collection_name()),
            _ => None,
        }
    }
}
