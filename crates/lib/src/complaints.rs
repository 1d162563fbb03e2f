//! Contact and complaint message store.
//!
//! Messages arrive through the storefront's contact forms and queue up
//! newest-first for an administrator. The only mutation after filing is
//! marking a message as read.

use crate::Result;
use crate::backend::Backend;
use crate::clock::Clock;
use crate::collection::{ChangeCallback, Collection, Placement};
use crate::constants::COMPLAINTS;
use crate::entity::{Entity, EntityId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Which form a message came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplaintKind {
    /// General contact message.
    Contact,
    /// Complaint about an order or product.
    Complaint,
}

impl ComplaintKind {
    /// Stable lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintKind::Contact => "contact",
            ComplaintKind::Complaint => "complaint",
        }
    }
}

impl std::fmt::Display for ComplaintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an administrator has seen the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplaintStatus {
    /// Not yet seen.
    New,
    /// Seen by an administrator.
    Read,
}

impl ComplaintStatus {
    /// Stable lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::New => "new",
            ComplaintStatus::Read => "read",
        }
    }
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message filed through a contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    /// Unique identifier, generated at filing time.
    pub id: EntityId,
    /// Sender name as typed into the form.
    pub name: String,
    /// Sender email as typed into the form.
    pub email: String,
    /// Which form the message came through.
    #[serde(rename = "type")]
    pub kind: ComplaintKind,
    /// Free-form message body.
    pub message: String,
    /// Order reference, when the sender supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Filing date, RFC3339.
    pub date: String,
    /// Read status.
    pub status: ComplaintStatus,
}

/// Partial update to a [`Complaint`].
#[derive(Debug, Clone, Default)]
pub struct ComplaintPatch {
    /// New read status.
    pub status: Option<ComplaintStatus>,
}

impl Entity for Complaint {
    type Patch = ComplaintPatch;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn apply(&mut self, patch: ComplaintPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// Typed store over the complaint collection.
pub struct ComplaintStore {
    complaints: Collection<Complaint>,
    clock: Arc<dyn Clock>,
}

impl ComplaintStore {
    /// Opens the complaint store over the shared backend. There is no seed
    /// data; the queue starts empty.
    pub(crate) fn open(backend: Arc<dyn Backend>, clock: Arc<dyn Clock>) -> Result<Self> {
        let complaints = Collection::open(COMPLAINTS, Placement::Front, backend, Vec::new())?;
        Ok(Self { complaints, clock })
    }

    /// Files a new message as unread and returns its generated id.
    pub fn file(
        &mut self,
        name: &str,
        email: &str,
        kind: ComplaintKind,
        message: &str,
        order_id: Option<String>,
    ) -> Result<EntityId> {
        let complaint = Complaint {
            id: EntityId::from(Uuid::new_v4().to_string()),
            name: name.to_string(),
            email: email.to_string(),
            kind,
            message: message.to_string(),
            order_id,
            date: self.clock.now_rfc3339(),
            status: ComplaintStatus::New,
        };
        let id = complaint.id.clone();
        self.complaints.add(complaint)?;
        Ok(id)
    }

    /// All messages, newest first.
    pub fn all(&self) -> &[Complaint] {
        self.complaints.all()
    }

    /// Marks a message as read. Absent ids are a no-op reported as
    /// `Ok(false)`.
    pub fn mark_read(&mut self, id: &EntityId) -> Result<bool> {
        self.complaints.patch(
            id,
            ComplaintPatch {
                status: Some(ComplaintStatus::Read),
            },
        )
    }

    /// Number of messages no administrator has seen yet.
    pub fn unread_count(&self) -> usize {
        self.complaints
            .all()
            .iter()
            .filter(|c| c.status == ComplaintStatus::New)
            .count()
    }

    /// Registers a callback for persisted complaint changes.
    pub fn subscribe(&mut self, callback: Arc<ChangeCallback>) {
        self.complaints.subscribe(callback)
    }
}
