//! Tests for the durable Collection over a backend key.
//!
//! These exercise the generic layer through a small local entity type; the
//! store-level behavior on real entities is covered in `identity` and
//! `stores`.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use stockroom::backend::{Backend, InMemory};
use stockroom::{Change, ChangeEvent, Collection, Entity, EntityId, Placement};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Bookmark {
    id: EntityId,
    url: String,
}

#[derive(Default)]
struct BookmarkPatch {
    url: Option<String>,
}

impl Entity for Bookmark {
    type Patch = BookmarkPatch;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn apply(&mut self, patch: BookmarkPatch) {
        if let Some(url) = patch.url {
            self.url = url;
        }
    }
}

fn bookmark(id: &str, url: &str) -> Bookmark {
    Bookmark {
        id: EntityId::from(id),
        url: url.to_string(),
    }
}

fn ids(collection: &Collection<Bookmark>) -> Vec<String> {
    collection.all().iter().map(|b| b.id.to_string()).collect()
}

#[test]
fn front_placement_prepends_and_back_appends() {
    let backend: Arc<dyn Backend> = Arc::new(InMemory::new());
    let mut front =
        Collection::open("front", Placement::Front, backend.clone(), Vec::new()).unwrap();
    let mut back = Collection::open("back", Placement::Back, backend, Vec::new()).unwrap();

    for id in ["a", "b", "c"] {
        front.add(bookmark(id, "https://example.com")).unwrap();
        back.add(bookmark(id, "https://example.com")).unwrap();
    }

    assert_eq!(ids(&front), ["c", "b", "a"]);
    assert_eq!(ids(&back), ["a", "b", "c"]);
}

#[test]
fn duplicate_ids_are_rejected_without_overwriting() {
    let backend: Arc<dyn Backend> = Arc::new(InMemory::new());
    let mut collection =
        Collection::open("bookmarks", Placement::Back, backend, Vec::new()).unwrap();

    assert!(collection.add(bookmark("a", "https://first.example")).unwrap());
    assert!(!collection.add(bookmark("a", "https://second.example")).unwrap());

    assert_eq!(collection.len(), 1);
    let kept = collection.get(&EntityId::from("a")).unwrap();
    assert_eq!(kept.url, "https://first.example");
}

#[test]
fn reopen_restores_the_persisted_snapshot() {
    let backend: Arc<dyn Backend> = Arc::new(InMemory::new());
    {
        let mut collection =
            Collection::open("bookmarks", Placement::Back, backend.clone(), Vec::new()).unwrap();
        collection.add(bookmark("a", "https://example.com")).unwrap();
        collection.add(bookmark("b", "https://example.org")).unwrap();
        collection.remove(&EntityId::from("a")).unwrap();
    }
    let collection: Collection<Bookmark> =
        Collection::open("bookmarks", Placement::Back, backend, Vec::new()).unwrap();
    assert_eq!(ids(&collection), ["b"]);
}

#[test]
fn defaults_seed_only_the_first_open() {
    let backend: Arc<dyn Backend> = Arc::new(InMemory::new());
    {
        let mut collection = Collection::open(
            "bookmarks",
            Placement::Back,
            backend.clone(),
            vec![bookmark("seed", "https://example.com")],
        )
        .unwrap();
        collection.remove(&EntityId::from("seed")).unwrap();
    }
    // The second open must restore the emptied snapshot, not reseed
    let collection: Collection<Bookmark> = Collection::open(
        "bookmarks",
        Placement::Back,
        backend,
        vec![bookmark("seed", "https://example.com")],
    )
    .unwrap();
    assert!(collection.is_empty());
}

#[test]
fn corrupt_snapshots_fail_the_open() {
    let backend: Arc<dyn Backend> = Arc::new(InMemory::new());
    backend.set("bookmarks", b"{not json".to_vec()).unwrap();

    let err = Collection::<Bookmark>::open("bookmarks", Placement::Back, backend, Vec::new())
        .unwrap_err();
    assert!(err.is_corrupt_data());
    assert_eq!(err.collection_name(), Some("bookmarks"));
}

#[test]
fn subscribers_observe_persisted_mutations_in_order() {
    let backend: Arc<dyn Backend> = Arc::new(InMemory::new());
    let mut collection =
        Collection::open("bookmarks", Placement::Back, backend, Vec::new()).unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    collection.subscribe(Arc::new(move |event: &ChangeEvent| {
        sink.lock()
            .unwrap()
            .push((event.change, event.id.to_string()));
        Ok(())
    }));

    collection.add(bookmark("a", "https://example.com")).unwrap();
    collection
        .patch(
            &EntityId::from("a"),
            BookmarkPatch {
                url: Some("https://example.org".to_string()),
            },
        )
        .unwrap();
    collection.remove(&EntityId::from("a")).unwrap();
    // Rejected mutations emit nothing
    collection.remove(&EntityId::from("missing")).unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            (Change::Added, "a".to_string()),
            (Change::Patched, "a".to_string()),
            (Change::Removed, "a".to_string()),
        ]
    );
}
