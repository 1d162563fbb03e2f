//! User database, the active session, and the reconciliation between them.
//!
//! The [`IdentityStore`] owns the durable user collection and at most one
//! active session. Every mutating operation runs the same tail step,
//! [`IdentityStore::reconcile`], before returning: the session copy is
//! re-synced to the database record it references, or invalidated when the
//! record is gone. Between operations the session is therefore always
//! deep-equal to its database record; a dangling session is never
//! observable.
//!
//! Validation failures (wrong credentials, duplicate email) and mutations
//! of absent users are reported through returned `bool`s, exactly like the
//! storefront behaves toward its forms. An `Err` always means storage
//! failed.

mod session;
mod types;

pub use session::{ActiveSession, SessionCallback, SessionEvent, SessionRef};
pub use types::{Role, User, UserPatch};

use crate::Result;
use crate::backend::Backend;
use crate::clock::Clock;
use crate::collection::{ChangeCallback, Collection, Placement};
use crate::constants::{AVATAR_URL, RESET_SECRET, USERS};
use crate::entity::EntityId;
use crate::notify::{MessageKind, Notifier};
use std::sync::Arc;
use tracing::{debug, error, info};

/// The identity layer: user database plus the single active session.
pub struct IdentityStore {
    users: Collection<User>,
    session: Option<ActiveSession>,
    backend: Arc<dyn Backend>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    subscribers: Vec<Arc<SessionCallback>>,
}

impl IdentityStore {
    /// Opens the identity store over the shared backend.
    ///
    /// Seeds the bootstrap users on first run, then validates any durable
    /// session reference against the freshly loaded database: a reference
    /// to a user that no longer exists is silently discarded and the
    /// process starts unauthenticated.
    pub(crate) fn open(
        backend: Arc<dyn Backend>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let users = Collection::open(
            USERS,
            Placement::Back,
            backend.clone(),
            crate::seed::seed_users(),
        )?;
        let mut store = Self {
            users,
            session: None,
            backend,
            clock,
            notifier,
            subscribers: Vec::new(),
        };
        store.restore_session()?;
        Ok(store)
    }

    /// Validates the durable session reference found at startup.
    fn restore_session(&mut self) -> Result<()> {
        let Some(slot) = session::read_slot(&self.backend)? else {
            return Ok(());
        };
        match self.users.get(&slot.user_id) {
            Some(user) => {
                debug!(user_id = %slot.user_id, "Restored remembered session");
                self.session = Some(ActiveSession {
                    user: user.clone(),
                    remembered: true,
                });
            }
            None => {
                debug!(user_id = %slot.user_id, "Discarding stale session reference");
                session::clear_slot(&self.backend)?;
            }
        }
        Ok(())
    }

    // --- Read surface ---

    /// The user of the active session, reconciled with the database.
    pub fn current_user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| s.user())
    }

    /// True if a session is active.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&ActiveSession> {
        self.session.as_ref()
    }

    /// All users in database order.
    pub fn users(&self) -> &[User] {
        self.users.all()
    }

    /// Case-insensitive email lookup; first match wins.
    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users
            .all()
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
    }

    // --- Session lifecycle ---

    /// Attempts a login.
    ///
    /// The email is matched case-insensitively, the credential by exact
    /// equality. `Ok(false)` covers both an unknown email and a wrong
    /// credential; the caller cannot tell them apart and the session is
    /// left untouched. On success the session becomes this user;
    /// `remember` decides whether the durable slot is written or any
    /// previously remembered login is cleared.
    pub fn login(&mut self, email: &str, password: &str, remember: bool) -> Result<bool> {
        let Some(user) = self.find_by_email(email).cloned() else {
            debug!("Login rejected");
            return Ok(false);
        };
        if user.password != password {
            debug!("Login rejected");
            return Ok(false);
        }
        if remember {
            session::write_slot(
                &self.backend,
                &SessionRef {
                    user_id: user.id.clone(),
                },
            )?;
        } else {
            // An earlier remembered login must not outlive this one
            session::clear_slot(&self.backend)?;
        }
        let user_id = user.id.clone();
        self.session = Some(ActiveSession {
            user,
            remembered: remember,
        });
        info!(user_id = %user_id, "Session started");
        self.emit(SessionEvent::Started { user_id });
        Ok(true)
    }

    /// Registers a new user.
    ///
    /// `Ok(false)` when the email is already registered (case-insensitive).
    /// Otherwise the user is appended to the database with a generated
    /// time-based id, a derived avatar, and the `user` role; a confirmation
    /// message is handed to the notifier. Signup does not log the new user
    /// in.
    pub fn signup(&mut self, name: &str, email: &str, password: &str) -> Result<bool> {
        if self.find_by_email(email).is_some() {
            debug!("Signup rejected: email already registered");
            return Ok(false);
        }
        let user = User {
            id: self.generate_user_id(),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: Role::User,
            phone: None,
            address: None,
            bio: Some("New member".to_string()),
            avatar: Some(derived_avatar(name)),
        };
        let user_id = user.id.clone();
        let email = user.email.clone();
        // Id generation already avoided collisions, so this cannot be a duplicate
        self.users.add(user)?;
        info!(user_id = %user_id, "User created");
        self.notifier.send(&email, MessageKind::SignupConfirmation);
        self.reconcile()?;
        Ok(true)
    }

    /// Ends the active session and clears the durable slot.
    ///
    /// Idempotent: calling without an active session still clears the slot
    /// and succeeds. A failed slot clear is reported as `Err`, but the
    /// in-memory session is gone either way.
    pub fn logout(&mut self) -> Result<()> {
        // Session first, slot second: the session must end even when the
        // slot clear fails.
        let ended = self.session.take();
        let cleared = session::clear_slot(&self.backend);
        if let Some(active) = ended {
            let user_id = active.user().id.clone();
            info!(user_id = %user_id, "Session ended");
            self.emit(SessionEvent::Ended { user_id });
        }
        cleared
    }

    // --- Self-service mutations ---

    /// Merges profile fields into the active user's database record.
    ///
    /// `Ok(false)` without an active session, or when the patch would move
    /// the email onto one already registered to another account
    /// (case-insensitive, same rule as signup). The database record is
    /// updated first, then the session copy is re-synced from it before
    /// the call returns.
    pub fn update_profile(&mut self, patch: UserPatch) -> Result<bool> {
        let Some(user_id) = self.active_user_id() else {
            return Ok(false);
        };
        if let Some(email) = patch.email.as_deref()
            && self.find_by_email(email).is_some_and(|u| u.id != user_id)
        {
            debug!("Profile update rejected: email already registered");
            return Ok(false);
        }
        let updated = self.users.patch(&user_id, patch)?;
        self.reconcile()?;
        Ok(updated)
    }

    /// Replaces the active user's credential.
    ///
    /// `Ok(false)` without an active session. Runs db-first like
    /// [`IdentityStore::update_profile`].
    pub fn change_password(&mut self, new_password: &str) -> Result<bool> {
        let Some(user_id) = self.active_user_id() else {
            return Ok(false);
        };
        let changed = self.users.patch(
            &user_id,
            UserPatch {
                password: Some(new_password.to_string()),
                ..Default::default()
            },
        )?;
        if changed {
            info!(user_id = %user_id, "Password changed");
        }
        self.reconcile()?;
        Ok(changed)
    }

    /// Requests a password reset link.
    ///
    /// The response shape is fixed regardless of whether the email is
    /// registered, and the log line is identical in both cases; only the
    /// notifier learns the difference.
    pub fn forgot_password(&self, email: &str) -> Result<()> {
        debug!("Password reset requested");
        if self.find_by_email(email).is_some() {
            self.notifier.send(email, MessageKind::PasswordReset);
        }
        Ok(())
    }

    // --- Admin surface (authorization is the caller's concern) ---

    /// Deletes a user from the database.
    ///
    /// `Ok(false)` when no such user exists. If the deleted user is the
    /// active session, the same call invalidates the session and clears
    /// the durable slot; deleting one's own account gets no special
    /// treatment.
    pub fn delete_user(&mut self, id: &EntityId) -> Result<bool> {
        let removed = self.users.remove(id)?;
        if removed {
            info!(user_id = %id, "User deleted");
        }
        self.reconcile()?;
        Ok(removed)
    }

    /// Resets a user's credential to the fixed known value.
    ///
    /// `Ok(false)` when no such user exists. If the affected user is the
    /// active session, the session copy is re-synced before the call
    /// returns.
    pub fn reset_user_password(&mut self, id: &EntityId) -> Result<bool> {
        let reset = self.users.patch(
            id,
            UserPatch {
                password: Some(RESET_SECRET.to_string()),
                ..Default::default()
            },
        )?;
        if reset {
            info!(user_id = %id, "Password reset to the known value");
        }
        self.reconcile()?;
        Ok(reset)
    }

    // --- Observers ---

    /// Registers a callback for session lifecycle events.
    ///
    /// Only changes after registration are observed; the startup restore
    /// happens before any subscriber can attach.
    pub fn subscribe_session(&mut self, callback: Arc<SessionCallback>) {
        self.subscribers.push(callback);
    }

    /// Registers a callback for persisted user database changes.
    pub fn subscribe_users(&mut self, callback: Arc<ChangeCallback>) {
        self.users.subscribe(callback);
    }

    // --- Internals ---

    fn active_user_id(&self) -> Option<EntityId> {
        self.session.as_ref().map(|s| s.user().id.clone())
    }

    /// Brings the active session back in line with the database.
    ///
    /// Runs synchronously at the end of every mutating operation. A changed
    /// record replaces the session copy; a missing record invalidates the
    /// session and clears the durable slot.
    fn reconcile(&mut self) -> Result<()> {
        let Some(user_id) = self.active_user_id() else {
            return Ok(());
        };
        match self.users.get(&user_id).cloned() {
            Some(db_user) => {
                if let Some(active) = self.session.as_mut()
                    && active.user != db_user
                {
                    active.user = db_user;
                    debug!(user_id = %user_id, "Session refreshed from database");
                    self.emit(SessionEvent::Refreshed { user_id });
                }
                Ok(())
            }
            None => {
                // The in-memory session goes first: a failed slot clear
                // must not leave a session pointing at a removed user.
                self.session = None;
                let cleared = session::clear_slot(&self.backend);
                info!(user_id = %user_id, "Session invalidated: user removed");
                self.emit(SessionEvent::Ended { user_id });
                cleared
            }
        }
    }

    /// Time-based id in the `user_<millis>` format.
    ///
    /// Bumps the millisecond value while the id is taken, so signups within
    /// the same millisecond still get unique ids.
    fn generate_user_id(&self) -> EntityId {
        let mut millis = self.clock.now_millis();
        loop {
            let id = EntityId::from(format!("user_{millis}"));
            if !self.users.contains(&id) {
                return id;
            }
            millis += 1;
        }
    }

    fn emit(&self, event: SessionEvent) {
        for callback in &self.subscribers {
            if let Err(e) = callback(&event) {
                error!(error = %e, "Session callback failed");
            }
        }
    }
}

/// Avatar URL derived from the display name.
fn derived_avatar(name: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(name.as_bytes()).collect();
    format!("{AVATAR_URL}?name={encoded}&background=random")
}
