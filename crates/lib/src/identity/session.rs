//! Session state and the durable remember-me slot.
//!
//! The identity store holds at most one active session: a copy of the
//! logged-in user plus a remembered flag. A remembered session additionally
//! persists a [`SessionRef`] in its own backend key so the login survives a
//! restart. Only the user id is persisted; restoration re-reads the record
//! from the user database, so the slot can never resurrect a stale profile.

use crate::Result;
use crate::backend::Backend;
use crate::collection::CollectionError;
use crate::constants::SESSION;
use crate::entity::EntityId;
use crate::identity::types::User;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// The single in-memory session.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub(super) user: User,
    pub(super) remembered: bool,
}

impl ActiveSession {
    /// The user this session belongs to, as last reconciled with the
    /// database.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// True if the session survives a restart via the durable slot.
    pub fn remembered(&self) -> bool {
        self.remembered
    }
}

/// Durable reference to a remembered session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRef {
    /// Id of the remembered user.
    pub user_id: EntityId,
}

/// Session lifecycle notification.
///
/// Events are delivered after the corresponding in-memory state change. A
/// start is emitted only once any slot write is durable; an end is emitted
/// even when clearing the slot fails, since the session itself is already
/// gone by then.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A session began, via login.
    Started {
        /// The user the session belongs to.
        user_id: EntityId,
    },
    /// The session copy was re-synced to a changed database record.
    Refreshed {
        /// The user the session belongs to.
        user_id: EntityId,
    },
    /// The session ended, via logout or invalidation.
    Ended {
        /// The user the session belonged to.
        user_id: EntityId,
    },
}

/// Callback invoked on session lifecycle changes.
pub type SessionCallback = dyn Fn(&SessionEvent) -> Result<()> + Send + Sync;

/// Reads the remembered session reference from the slot.
///
/// A missing slot is `None`. An unreadable slot is discarded (and deleted)
/// rather than failing startup: a corrupt slot only costs the remembered
/// login, never the database.
pub(super) fn read_slot(backend: &Arc<dyn Backend>) -> Result<Option<SessionRef>> {
    let Some(bytes) = backend.get(SESSION)? else {
        return Ok(None);
    };
    match serde_json::from_slice(&bytes) {
        Ok(slot) => Ok(Some(slot)),
        Err(e) => {
            warn!(error = %e, "Discarding unreadable session slot");
            backend.remove(SESSION)?;
            Ok(None)
        }
    }
}

/// Persists the remembered session reference to the slot.
pub(super) fn write_slot(backend: &Arc<dyn Backend>, slot: &SessionRef) -> Result<()> {
    let bytes = serde_json::to_vec(slot).map_err(|source| CollectionError::SerializationFailed {
        collection: SESSION.to_string(),
        source,
    })?;
    backend.set(SESSION, bytes)
}

/// Removes the slot. Safe to call when no slot exists.
pub(super) fn clear_slot(backend: &Arc<dyn Backend>) -> Result<()> {
    backend.remove(SESSION)
}
