//! Integration tests for entity handles
//!
//! Tests conversion into shared handles, identity, and downcasting.

use std::borrow::Cow;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Weak};

use ecstore_foundation::{
    Entity, EntityList, IntoEntity, InvalidEntity, SharedEntity, downcast, same_entity,
};

struct Counter {
    id: String,
    hits: AtomicU32,
}

impl Counter {
    fn new(id: &str) -> Arc<Self> {
        Arc::new(Self {
            id: id.to_string(),
            hits: AtomicU32::new(0),
        })
    }
}

impl Entity for Counter {
    fn id(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.id)
    }
}

// =============================================================================
// Conversion
// =============================================================================

#[test]
fn arc_converts() {
    let shared = Counter::new("a").into_entity().unwrap();
    assert_eq!(shared.id(), "a");
}

#[test]
fn borrowed_arc_converts_to_same_object() {
    let counter = Counter::new("a");
    let shared = (&counter).into_entity().unwrap();
    assert!(same_entity(&shared, &(counter as SharedEntity)));
}

#[test]
fn erased_weak_converts_while_alive() {
    let strong: SharedEntity = Counter::new("a");
    let weak: Weak<dyn Entity> = Arc::downgrade(&strong);
    assert!(weak.clone().into_entity().is_ok());

    drop(strong);
    assert_eq!(weak.into_entity().unwrap_err(), InvalidEntity::Dangling);
}

#[test]
fn nested_option_of_weak() {
    let strong = Counter::new("a");
    let some = Some(Arc::downgrade(&strong));
    assert!(some.into_entity().is_ok());

    let none: Option<Weak<Counter>> = None;
    assert_eq!(none.into_entity().unwrap_err(), InvalidEntity::Missing);
}

// =============================================================================
// Aliasing
// =============================================================================

#[test]
fn list_aliases_entity_contents() {
    let counter = Counter::new("a");
    let list: EntityList = std::iter::once(Arc::clone(&counter) as SharedEntity).collect();

    counter.hits.fetch_add(3, Ordering::SeqCst);

    let seen = list.downcast::<Counter>();
    assert_eq!(seen[0].hits.load(Ordering::SeqCst), 3);
}

#[test]
fn downcast_round_trip() {
    let counter = Counter::new("a");
    let shared: SharedEntity = counter.clone();
    let back = downcast::<Counter>(shared).unwrap();
    assert!(Arc::ptr_eq(&back, &counter));
}

#[test]
fn shared_entity_debug_names_type_and_id() {
    let shared: SharedEntity = Counter::new("c-7");
    assert_eq!(format!("{shared:?}"), "Counter(c-7)");

    let err = None::<Arc<Counter>>.into_entity().unwrap_err();
    assert_eq!(err, InvalidEntity::Missing);
}
