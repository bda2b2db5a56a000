//! Integration tests for store snapshots

use std::sync::Arc;

use ecstore_foundation::{SharedEntity, same_entity};
use ecstore_storage::Store;

use crate::common::{ComplexEntity, OtherEntity, SimpleEntity};

fn populated() -> Store {
    let store = Store::new();
    store
        .add([SimpleEntity::new("s1"), SimpleEntity::new("s2")])
        .unwrap();
    store.add([ComplexEntity::new("c1")]).unwrap();
    store
}

#[test]
fn snapshot_agrees_with_store() {
    let store = populated();
    let snapshot = store.snapshot();

    assert_eq!(snapshot.count_total(), store.count_total());
    assert_eq!(
        snapshot.count_of::<SimpleEntity>(),
        store.count_of::<SimpleEntity>()
    );
    assert_eq!(
        snapshot.get_all(&SimpleEntity::default()).unwrap().ids(),
        store.get_all(&SimpleEntity::default()).unwrap().ids()
    );

    let mut snap_keys = snapshot.type_keys();
    let mut store_keys = store.type_keys();
    snap_keys.sort_by_key(|key| key.name());
    store_keys.sort_by_key(|key| key.name());
    assert_eq!(snap_keys, store_keys);
}

#[test]
fn snapshot_is_isolated_from_removal() {
    let store = Store::new();
    let e = SimpleEntity::new("gone-later");
    store.add([&e]).unwrap();

    let snapshot = store.snapshot();
    store.remove([&e]).unwrap();

    assert!(store.get_by_id("gone-later").is_none());
    let held = snapshot.get_by_id("gone-later").unwrap();
    assert!(same_entity(&held, &(e as SharedEntity)));
}

#[test]
fn snapshot_sees_entity_mutation() {
    let store = Store::new();
    let e = SimpleEntity::new("before");
    store.add([&e]).unwrap();

    let snapshot = store.snapshot();
    e.rename("after");

    // Membership is frozen, the entities themselves are shared
    let first = snapshot
        .get_first(&SimpleEntity::default())
        .unwrap()
        .unwrap();
    assert_eq!(first.id(), "after");
}

#[test]
fn snapshot_of_empty_store() {
    let snapshot = Store::new().snapshot();

    assert!(snapshot.is_empty());
    assert_eq!(snapshot.count_total(), 0);
    assert_eq!(snapshot.iter().count(), 0);
    assert!(snapshot.get_all(&OtherEntity::default()).unwrap().is_empty());
}

#[test]
fn snapshot_clones_share_contents() {
    let snapshot = populated().snapshot();
    let copy = snapshot.clone();

    let a = snapshot.get_by_id("c1").unwrap();
    let b = copy.get_by_id("c1").unwrap();
    assert!(same_entity(&a, &b));
}

#[test]
fn snapshot_typed_reads() {
    let snapshot = populated().snapshot();

    let complex: Vec<Arc<ComplexEntity>> = snapshot.get_all_of::<ComplexEntity>();
    assert_eq!(complex.len(), 1);
    assert_eq!(complex[0].health, 100);
    assert!(snapshot.get_by_id_as::<SimpleEntity>("s1").is_some());
    assert!(snapshot.get_by_id_as::<ComplexEntity>("s1").is_none());
    assert_eq!(snapshot.iter().count(), 3);
}
