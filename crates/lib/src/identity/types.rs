//! User record types for the identity store.

use crate::entity::{Entity, EntityId};
use serde::{Deserialize, Serialize};

/// Authorization role attached to a user record.
///
/// The store itself never checks roles; the role is data for the caller's
/// authorization gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular storefront customer.
    User,
    /// Administrative user.
    Admin,
}

impl Role {
    /// Returns the role as its serialized string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user record in the durable user database.
///
/// The credential is an opaque string compared by equality only; this layer
/// deliberately performs no hashing. Optional profile fields are omitted
/// from the stored snapshot when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique, immutable identifier.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Login email. Uniqueness is case-insensitive; the stored casing is
    /// whatever the user typed at signup.
    pub email: String,
    /// Opaque login credential.
    #[serde(default)]
    pub password: String,
    /// Authorization role.
    pub role: Role,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Shipping address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Short profile text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Partial update to a [`User`] record.
///
/// `None` leaves a field unchanged. Optional profile fields are replaced
/// when set; there is no way to clear one back to absent. The id is not
/// patchable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    /// New display name.
    pub name: Option<String>,
    /// New login email. `update_profile` rejects it when another account
    /// already uses it (case-insensitive).
    pub email: Option<String>,
    /// New credential.
    pub password: Option<String>,
    /// New role.
    pub role: Option<Role>,
    /// New phone number.
    pub phone: Option<String>,
    /// New address.
    pub address: Option<String>,
    /// New profile text.
    pub bio: Option<String>,
    /// New avatar URL.
    pub avatar: Option<String>,
}

impl Entity for User {
    type Patch = UserPatch;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(password) = patch.password {
            self.password = password;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if patch.phone.is_some() {
            self.phone = patch.phone;
        }
        if patch.address.is_some() {
            self.address = patch.address;
        }
        if patch.bio.is_some() {
            self.bio = patch.bio;
        }
        if patch.avatar.is_some() {
            self.avatar = patch.avatar;
        }
    }
}
