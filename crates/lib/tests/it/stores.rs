//! Tests for the catalog, review, and complaint stores.

use std::sync::{Arc, Mutex};

use stockroom::{
    Category, Change, ChangeEvent, ComplaintKind, ComplaintStatus, EntityId, Product, ProductPatch,
};

use crate::helpers::{open_dir, open_mem};

fn gadget(id: &str) -> Product {
    Product {
        id: EntityId::from(id),
        name: "USB-C Dock".to_string(),
        price: 89.0,
        category: Category::Accessories,
        description: "Eleven ports in one brick.".to_string(),
        image: "https://images.example.com/dock.jpg".to_string(),
        brand: Some("Anker".to_string()),
    }
}

#[test]
fn catalog_seeds_and_appends_new_products_at_the_back() {
    let mut store = open_mem();
    assert_eq!(store.catalog().all().len(), 9);
    assert_eq!(store.catalog().all()[0].name, "iPhone 15 Pro Max");

    assert!(store.catalog_mut().add(gadget("p_dock")).unwrap());
    assert_eq!(store.catalog().all().last().unwrap().id, "p_dock");
}

#[test]
fn catalog_rejects_duplicate_product_ids() {
    let mut store = open_mem();
    // "1" is taken by a seed product
    assert!(!store.catalog_mut().add(gadget("1")).unwrap());
    assert_eq!(store.catalog().all().len(), 9);
    assert_eq!(store.catalog().get(&"1".into()).unwrap().name, "iPhone 15 Pro Max");
}

#[test]
fn catalog_updates_merge_only_set_fields() {
    let mut store = open_mem();
    let id = EntityId::from("1");

    assert!(
        store
            .catalog_mut()
            .update(
                &id,
                ProductPatch {
                    price: Some(999.0),
                    ..Default::default()
                },
            )
            .unwrap()
    );

    let product = store.catalog().get(&id).unwrap();
    assert_eq!(product.price, 999.0);
    assert_eq!(product.name, "iPhone 15 Pro Max");
    assert_eq!(product.brand.as_deref(), Some("Apple"));
}

#[test]
fn catalog_changes_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = open_dir(dir.path());
        store.catalog_mut().add(gadget("p_dock")).unwrap();
        store.catalog_mut().remove(&"2".into()).unwrap();
    }

    let store = open_dir(dir.path());
    assert_eq!(store.catalog().all().len(), 9);
    assert!(store.catalog().get(&"p_dock".into()).is_some());
    assert!(store.catalog().get(&"2".into()).is_none());
}

#[test]
fn catalog_subscribers_observe_persisted_changes() {
    let mut store = open_mem();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    store.catalog_mut().subscribe(Arc::new(move |event: &ChangeEvent| {
        sink.lock().unwrap().push((event.change, event.id.clone()));
        Ok(())
    }));

    store.catalog_mut().add(gadget("p_dock")).unwrap();
    store.catalog_mut().remove(&"p_dock".into()).unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            (Change::Added, EntityId::from("p_dock")),
            (Change::Removed, EntityId::from("p_dock")),
        ]
    );
}

#[test]
fn new_reviews_lead_the_list_and_the_product_view() {
    let mut store = open_mem();
    assert_eq!(store.reviews().all().len(), 3);

    let id = store
        .reviews_mut()
        .add(&"1".into(), &"u2".into(), "Jane Smith", 3, "Solid, heavy.")
        .unwrap();

    // Front placement puts the newest review first overall
    assert_eq!(store.reviews().all()[0].id, id);

    // And the clock-issued date sorts it first for its product
    let for_product = store.reviews().for_product(&"1".into());
    assert_eq!(for_product.len(), 3);
    assert_eq!(for_product[0].id, id);
    assert_eq!(for_product[0].user_name, "Jane Smith");
}

#[test]
fn review_ratings_clamp_into_range_and_average() {
    let mut store = open_mem();
    // Seeds give product "1" ratings 5 and 4
    assert_eq!(store.reviews().average_rating(&"1".into()), 4.5);

    store
        .reviews_mut()
        .add(&"1".into(), &"u1".into(), "John Doe", 9, "Off the scale")
        .unwrap();
    let for_product = store.reviews().for_product(&"1".into());
    assert_eq!(for_product[0].rating, 5);
    let average = store.reviews().average_rating(&"1".into());
    assert!((average - 14.0 / 3.0).abs() < f32::EPSILON);
}

#[test]
fn unreviewed_products_average_to_zero() {
    let store = open_mem();
    assert_eq!(store.reviews().average_rating(&"9".into()), 0.0);
}

#[test]
fn reviews_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let id = {
        let mut store = open_dir(dir.path());
        store
            .reviews_mut()
            .add(&"5".into(), &"u1".into(), "John Doe", 4, "Loud and clear")
            .unwrap()
    };

    let store = open_dir(dir.path());
    assert_eq!(store.reviews().all().len(), 4);
    assert_eq!(store.reviews().all()[0].id, id);
}

#[test]
fn complaints_start_empty_and_queue_newest_first() {
    let mut store = open_mem();
    assert!(store.complaints().all().is_empty());

    store
        .complaints_mut()
        .file("John Doe", "john@example.com", ComplaintKind::Contact, "Hi there", None)
        .unwrap();
    let second = store
        .complaints_mut()
        .file(
            "Jane Smith",
            "jane@example.com",
            ComplaintKind::Complaint,
            "Order arrived damaged",
            Some("ORD-1042".to_string()),
        )
        .unwrap();

    let all = store.complaints().all();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, second);
    assert_eq!(all[0].order_id.as_deref(), Some("ORD-1042"));
    assert_eq!(all[1].order_id, None);
}

#[test]
fn marking_complaints_read_drains_the_unread_count() {
    let mut store = open_mem();
    let first = store
        .complaints_mut()
        .file("John Doe", "john@example.com", ComplaintKind::Complaint, "Broken", None)
        .unwrap();
    store
        .complaints_mut()
        .file("Jane Smith", "jane@example.com", ComplaintKind::Contact, "Question", None)
        .unwrap();
    assert_eq!(store.complaints().unread_count(), 2);

    assert!(store.complaints_mut().mark_read(&first).unwrap());
    assert_eq!(store.complaints().unread_count(), 1);

    // Already-read and absent ids change nothing
    assert!(store.complaints_mut().mark_read(&first).unwrap());
    assert!(!store.complaints_mut().mark_read(&"ghost".into()).unwrap());
    assert_eq!(store.complaints().unread_count(), 1);
}

#[test]
fn complaints_survive_a_restart_with_their_status() {
    let dir = tempfile::tempdir().unwrap();
    let id = {
        let mut store = open_dir(dir.path());
        let id = store
            .complaints_mut()
            .file("John Doe", "john@example.com", ComplaintKind::Complaint, "Broken", None)
            .unwrap();
        store.complaints_mut().mark_read(&id).unwrap();
        id
    };

    let store = open_dir(dir.path());
    let complaint = store.complaints().all().iter().find(|c| c.id == id).unwrap();
    assert_eq!(complaint.status, ComplaintStatus::Read);
    assert_eq!(store.complaints().unread_count(), 0);
}

#[test]
fn generated_review_and_complaint_ids_are_unique() {
    let mut store = open_mem();
    let a = store
        .reviews_mut()
        .add(&"1".into(), &"u1".into(), "John Doe", 5, "First")
        .unwrap();
    let b = store
        .reviews_mut()
        .add(&"1".into(), &"u1".into(), "John Doe", 5, "Second")
        .unwrap();
    assert_ne!(a, b);
    assert!(!a.is_empty());
}
