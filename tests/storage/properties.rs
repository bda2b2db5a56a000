//! Property tests for store invariants through the public API

use std::sync::Arc;

use ecstore_foundation::{SharedEntity, same_entity};
use ecstore_storage::Store;
use proptest::prelude::*;

use crate::common::{ComplexEntity, SimpleEntity};

#[derive(Clone, Debug)]
enum Op {
    AddSimple(usize),
    AddComplex(usize),
    Remove(usize),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (1usize..4).prop_map(Op::AddSimple),
        3 => (1usize..4).prop_map(Op::AddComplex),
        3 => any::<usize>().prop_map(Op::Remove),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    #[test]
    fn counts_track_a_model(ops in prop::collection::vec(op(), 1..48)) {
        let store = Store::new();
        let mut live: Vec<SharedEntity> = Vec::new();
        let mut next = 0usize;

        for op in ops {
            match op {
                Op::AddSimple(n) | Op::AddComplex(n) => {
                    let batch: Vec<SharedEntity> = (0..n)
                        .map(|_| {
                            next += 1;
                            let id = format!("p{next}");
                            if matches!(op, Op::AddSimple(_)) {
                                SimpleEntity::new(&id) as SharedEntity
                            } else {
                                ComplexEntity::new(&id) as SharedEntity
                            }
                        })
                        .collect();
                    store.add(&batch).unwrap();
                    live.extend(batch);
                }
                Op::Remove(pick) => {
                    if !live.is_empty() {
                        let gone = live.swap_remove(pick % live.len());
                        store.remove([&gone]).unwrap();
                        prop_assert!(store.get_by_id(&gone.id()).is_none());
                    }
                }
                Op::Clear => {
                    store.clear().unwrap();
                    live.clear();
                }
            }

            let simple = store.count_of::<SimpleEntity>();
            let complex = store.count_of::<ComplexEntity>();
            prop_assert_eq!(store.count_total(), live.len());
            prop_assert_eq!(simple + complex, live.len());
            prop_assert_eq!(store.is_empty(), live.is_empty());
        }

        for entity in &live {
            let found = store.get_by_id(&entity.id()).unwrap();
            prop_assert!(same_entity(&found, entity));
            prop_assert!(store.contains(entity));
        }
    }

    #[test]
    fn get_first_is_first_added_without_removal(count in 1usize..20) {
        let store = Store::new();
        let entities: Vec<Arc<SimpleEntity>> = (0..count)
            .map(|i| SimpleEntity::new(&format!("f{i}")))
            .collect();
        store.add(&entities).unwrap();

        let first = store.get_first_of::<SimpleEntity>().unwrap();
        prop_assert!(Arc::ptr_eq(&first, &entities[0]));
        prop_assert_eq!(store.get_all_of::<SimpleEntity>().len(), count);
    }
}
