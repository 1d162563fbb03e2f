//! Tests for the IdentityStore: login, signup, and session reconciliation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use stockroom::backend::{Backend, BackendError, InMemory, OnDisk};
use stockroom::{MessageKind, Role, Storefront, UserPatch};

use crate::helpers::{CapturingNotifier, StepClock, open_dir, open_mem, open_mem_capturing};

#[test]
fn seeded_users_can_log_in() {
    let mut store = open_mem();
    assert!(
        store
            .identity_mut()
            .login("admin@xavier.com", "XavierSecure#2024", false)
            .unwrap()
    );
    let admin = store.identity().current_user().unwrap();
    assert_eq!(admin.role, Role::Admin);
    assert_eq!(admin.name, "System Administrator");
}

#[test]
fn email_matches_case_insensitively_but_password_exactly() {
    let mut store = open_mem();
    let identity = store.identity_mut();

    assert!(identity.login("JOHN@EXAMPLE.COM", "password123", false).unwrap());
    identity.logout().unwrap();

    assert!(!identity.login("john@example.com", "PASSWORD123", false).unwrap());
    assert!(!identity.login("john@example.com", "password1234", false).unwrap());
    assert!(!store.identity().is_authenticated());
}

#[test]
fn failed_login_leaves_the_current_session_alone() {
    let mut store = open_mem();
    let identity = store.identity_mut();
    assert!(identity.login("john@example.com", "password123", false).unwrap());

    assert!(!identity.login("jane@example.com", "wrong", false).unwrap());
    assert!(!identity.login("nobody@example.com", "password123", false).unwrap());

    let user = identity.current_user().unwrap();
    assert_eq!(user.email, "john@example.com");
}

#[test]
fn signup_registers_but_does_not_log_in() {
    let mut store = open_mem();
    let identity = store.identity_mut();

    assert!(identity.signup("Alice Example", "alice@example.com", "wonder").unwrap());
    assert!(!identity.is_authenticated());

    assert!(identity.login("ALICE@example.com", "wonder", false).unwrap());
    let alice = identity.current_user().unwrap();
    assert_eq!(alice.name, "Alice Example");
    assert_eq!(alice.role, Role::User);
    assert_eq!(alice.bio.as_deref(), Some("New member"));
    assert!(alice.id.as_str().starts_with("user_"));
    assert_eq!(
        alice.avatar.as_deref(),
        Some("https://ui-avatars.com/api/?name=Alice+Example&background=random")
    );
}

#[test]
fn signup_rejects_registered_emails_case_insensitively() {
    let mut store = open_mem();
    let identity = store.identity_mut();
    let before = identity.users().len();

    assert!(!identity.signup("Impostor", "John@Example.Com", "pw").unwrap());
    assert_eq!(identity.users().len(), before);
}

#[test]
fn generated_user_ids_are_unique_and_time_based() {
    let mut store = open_mem();
    let identity = store.identity_mut();

    let mut ids = Vec::new();
    for n in 0..5 {
        let email = format!("user{n}@example.com");
        assert!(identity.signup("Someone", &email, "pw").unwrap());
        let id = identity.find_by_email(&email).unwrap().id.to_string();
        assert!(id.starts_with("user_"), "unexpected id shape: {id}");
        ids.push(id);
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 5);
}

#[test]
fn new_users_append_at_the_back_of_the_database() {
    let mut store = open_mem();
    let identity = store.identity_mut();
    identity.signup("Last One", "last@example.com", "pw").unwrap();
    assert_eq!(identity.users().last().unwrap().email, "last@example.com");
}

#[test]
fn remembered_login_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = open_dir(dir.path());
        assert!(
            store
                .identity_mut()
                .login("john@example.com", "password123", true)
                .unwrap()
        );
    }

    let store = open_dir(dir.path());
    let identity = store.identity();
    assert!(identity.is_authenticated());
    assert_eq!(identity.current_user().unwrap().email, "john@example.com");
    assert!(identity.session().unwrap().remembered());
}

#[test]
fn unremembered_login_does_not_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = open_dir(dir.path());
        assert!(
            store
                .identity_mut()
                .login("john@example.com", "password123", false)
                .unwrap()
        );
        assert!(store.identity().is_authenticated());
    }

    let store = open_dir(dir.path());
    assert!(!store.identity().is_authenticated());
}

#[test]
fn logging_in_without_remember_clears_an_earlier_slot() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = open_dir(dir.path());
        let identity = store.identity_mut();
        identity.login("john@example.com", "password123", true).unwrap();
        identity.login("jane@example.com", "password123", false).unwrap();
        assert_eq!(identity.current_user().unwrap().email, "jane@example.com");
    }

    let store = open_dir(dir.path());
    assert!(!store.identity().is_authenticated());
}

#[test]
fn logout_clears_the_slot_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = open_dir(dir.path());
        let identity = store.identity_mut();
        identity.login("john@example.com", "password123", true).unwrap();
        identity.logout().unwrap();
        identity.logout().unwrap();
        assert!(!identity.is_authenticated());
    }

    let store = open_dir(dir.path());
    assert!(!store.identity().is_authenticated());
}

#[test]
fn profile_updates_keep_session_and_database_in_lockstep() {
    let mut store = open_mem();
    let identity = store.identity_mut();
    identity.login("jane@example.com", "password123", false).unwrap();

    assert!(
        identity
            .update_profile(UserPatch {
                name: Some("Jane Smith-Jones".to_string()),
                phone: Some("555-0199".to_string()),
                ..Default::default()
            })
            .unwrap()
    );

    let db = identity.find_by_email("jane@example.com").unwrap().clone();
    assert_eq!(db.name, "Jane Smith-Jones");
    assert_eq!(db.phone.as_deref(), Some("555-0199"));
    // Untouched fields survive the patch
    assert_eq!(db.bio.as_deref(), Some("Tech enthusiast"));
    assert_eq!(identity.current_user(), Some(&db));
}

#[test]
fn profile_email_updates_cannot_take_another_accounts_address() {
    let mut store = open_mem();
    let identity = store.identity_mut();
    identity.login("jane@example.com", "password123", false).unwrap();

    let moved = identity
        .update_profile(UserPatch {
            email: Some("JOHN@example.com".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert!(!moved);
    assert_eq!(identity.current_user().unwrap().email, "jane@example.com");
    // Both accounts still log in with their own addresses
    assert_eq!(
        identity.find_by_email("john@example.com").unwrap().id,
        "u1"
    );

    // Re-casing your own address is not a duplicate
    assert!(
        identity
            .update_profile(UserPatch {
                email: Some("Jane@Example.COM".to_string()),
                ..Default::default()
            })
            .unwrap()
    );
    assert_eq!(identity.current_user().unwrap().email, "Jane@Example.COM");
}

#[test]
fn password_change_takes_effect_for_the_next_login() {
    let mut store = open_mem();
    let identity = store.identity_mut();
    identity.login("john@example.com", "password123", false).unwrap();

    assert!(identity.change_password("n3w-secret").unwrap());
    identity.logout().unwrap();

    assert!(!identity.login("john@example.com", "password123", false).unwrap());
    assert!(identity.login("john@example.com", "n3w-secret", false).unwrap());
}

#[test]
fn admin_reset_restores_the_known_password() {
    let mut store = open_mem();
    let identity = store.identity_mut();
    identity.signup("Reset Me", "reset@example.com", "forgotten").unwrap();
    let id = identity.find_by_email("reset@example.com").unwrap().id.clone();

    assert!(identity.reset_user_password(&id).unwrap());
    assert!(!identity.login("reset@example.com", "forgotten", false).unwrap());
    assert!(identity.login("reset@example.com", "password123", false).unwrap());
}

#[test]
fn admin_reset_refreshes_a_live_session() {
    let mut store = open_mem();
    let identity = store.identity_mut();
    identity.login("john@example.com", "password123", false).unwrap();
    identity.change_password("interim").unwrap();

    let id = identity.current_user().unwrap().id.clone();
    assert!(identity.reset_user_password(&id).unwrap());

    let db = identity.find_by_email("john@example.com").unwrap().clone();
    assert_eq!(db.password, "password123");
    assert_eq!(identity.current_user(), Some(&db));
}

#[test]
fn deleting_the_active_user_ends_the_session() {
    let mut store = open_mem();
    let identity = store.identity_mut();
    identity.login("john@example.com", "password123", false).unwrap();
    let id = identity.current_user().unwrap().id.clone();
    let before = identity.users().len();

    assert!(identity.delete_user(&id).unwrap());
    assert!(!identity.is_authenticated());
    assert_eq!(identity.users().len(), before - 1);
    assert!(identity.find_by_email("john@example.com").is_none());
}

#[test]
fn deleting_a_remembered_user_clears_the_slot_too() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = open_dir(dir.path());
        let identity = store.identity_mut();
        identity.login("john@example.com", "password123", true).unwrap();
        let id = identity.current_user().unwrap().id.clone();
        identity.delete_user(&id).unwrap();
    }

    let store = open_dir(dir.path());
    assert!(!store.identity().is_authenticated());
    assert!(store.identity().find_by_email("john@example.com").is_none());
}

#[test]
fn deleting_an_absent_user_is_a_quiet_no_op() {
    let mut store = open_mem();
    let identity = store.identity_mut();
    identity.login("john@example.com", "password123", false).unwrap();

    assert!(!identity.delete_user(&"ghost".into()).unwrap());
    // The unrelated session is untouched
    assert!(identity.is_authenticated());
}

#[test]
fn deletion_invalidates_the_session_even_when_the_slot_clear_fails() {
    let (mut store, fail_removes) = open_sticky_remove();
    let identity = store.identity_mut();
    identity.login("john@example.com", "password123", false).unwrap();
    let id = identity.current_user().unwrap().id.clone();

    fail_removes.store(true, Ordering::SeqCst);
    let err = identity.delete_user(&id).unwrap_err();
    assert!(err.is_storage_error());

    // The database mutation stuck, and the session must not outlive it
    assert!(identity.find_by_email("john@example.com").is_none());
    assert!(!identity.is_authenticated());
    assert!(identity.current_user().is_none());
}

#[test]
fn logout_ends_the_session_even_when_the_slot_clear_fails() {
    let (mut store, fail_removes) = open_sticky_remove();
    let identity = store.identity_mut();
    identity.login("john@example.com", "password123", true).unwrap();

    fail_removes.store(true, Ordering::SeqCst);
    let err = identity.logout().unwrap_err();
    assert!(err.is_storage_error());
    assert!(!identity.is_authenticated());
}

#[test]
fn slot_for_a_vanished_user_is_discarded_at_open() {
    let dir = tempfile::tempdir().unwrap();
    // Initialize the stores, then plant a slot pointing at nobody
    drop(open_dir(dir.path()));
    let backend = OnDisk::open(dir.path()).unwrap();
    backend
        .set("_session", br#"{"user_id":"ghost"}"#.to_vec())
        .unwrap();

    let store = open_dir(dir.path());
    assert!(!store.identity().is_authenticated());
    // The stale slot was deleted, not just ignored
    assert_eq!(backend.get("_session").unwrap(), None);
}

#[test]
fn corrupt_slot_bytes_cost_only_the_remembered_login() {
    let dir = tempfile::tempdir().unwrap();
    drop(open_dir(dir.path()));
    let backend = OnDisk::open(dir.path()).unwrap();
    backend.set("_session", b"{broken".to_vec()).unwrap();

    let store = open_dir(dir.path());
    assert!(!store.identity().is_authenticated());
    assert_eq!(backend.get("_session").unwrap(), None);
    // The user database itself is intact
    assert_eq!(store.identity().users().len(), 3);
}

#[test]
fn forgot_password_notifies_only_registered_addresses() {
    let (store, notifier) = open_mem_capturing();
    let identity = store.identity();

    identity.forgot_password("john@example.com").unwrap();
    identity.forgot_password("stranger@example.com").unwrap();

    assert_eq!(
        notifier.count_for("john@example.com", MessageKind::PasswordReset),
        1
    );
    assert_eq!(
        notifier.count_for("stranger@example.com", MessageKind::PasswordReset),
        0
    );
}

#[test]
fn signup_hands_a_confirmation_to_the_notifier() {
    let (mut store, notifier) = open_mem_capturing();
    store
        .identity_mut()
        .signup("New User", "new@example.com", "pw")
        .unwrap();

    assert_eq!(
        notifier.sent(),
        vec![("new@example.com".to_string(), MessageKind::SignupConfirmation)]
    );
}

/// Backend whose key removals can be switched to fail, for exercising the
/// slot-clear failure paths.
struct StickyRemoveBackend {
    inner: Arc<InMemory>,
    fail_removes: Arc<AtomicBool>,
}

impl Backend for StickyRemoveBackend {
    fn get(&self, key: &str) -> stockroom::Result<Option<Vec<u8>>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, bytes: Vec<u8>) -> stockroom::Result<()> {
        self.inner.set(key, bytes)
    }

    fn remove(&self, key: &str) -> stockroom::Result<()> {
        if self.fail_removes.load(Ordering::SeqCst) {
            return Err(BackendError::FileIo {
                key: key.to_string(),
                source: std::io::Error::other("simulated remove failure"),
            }
            .into());
        }
        self.inner.remove(key)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Opens a storefront whose backend removals fail once the returned switch
/// is flipped.
fn open_sticky_remove() -> (Storefront, Arc<AtomicBool>) {
    let fail_removes = Arc::new(AtomicBool::new(false));
    let backend = StickyRemoveBackend {
        inner: Arc::new(InMemory::new()),
        fail_removes: fail_removes.clone(),
    };
    let store = Storefront::open_with(Box::new(backend), StepClock::new(), CapturingNotifier::new())
        .expect("open storefront");
    (store, fail_removes)
}
