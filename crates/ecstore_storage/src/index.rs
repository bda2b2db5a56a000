//! The two indices behind a store.
//!
//! `Indices` is plain data with no locking. The store wraps it in a lock;
//! snapshots clone it, which is O(1) because both maps are persistent.

use ecstore_foundation::{EntityList, SharedEntity, TypeKey, same_entity};
use tracing::trace;

use crate::bucket::Bucket;

/// Type index and id index over the same entities.
#[derive(Clone, Default)]
pub(crate) struct Indices {
    /// Type key to bucket. A key is present only while its bucket is non-empty.
    by_type: im::HashMap<TypeKey, Bucket>,
    /// Id to the entity currently holding that id.
    by_id: im::HashMap<String, SharedEntity>,
}

impl Indices {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends `entity` to its bucket and points `id` at it.
    pub(crate) fn insert(&mut self, key: TypeKey, id: String, entity: SharedEntity) {
        if let Some(bucket) = self.by_type.get_mut(&key) {
            bucket.push(SharedEntity::clone(&entity));
        } else {
            trace!(type_key = %key, "bucket created");
            let mut bucket = Bucket::new();
            bucket.push(SharedEntity::clone(&entity));
            self.by_type.insert(key, bucket);
        }
        self.by_id.insert(id, entity);
    }

    /// Removes `entity` by reference identity.
    ///
    /// The id entry is dropped only if it still points at `entity`. Returns
    /// false if the entity was not stored.
    pub(crate) fn remove(&mut self, key: TypeKey, id: &str, entity: &SharedEntity) -> bool {
        let Some(bucket) = self.by_type.get_mut(&key) else {
            return false;
        };
        if !bucket.remove(entity) {
            return false;
        }
        if bucket.is_empty() {
            self.by_type.remove(&key);
            trace!(type_key = %key, "bucket dropped");
        }
        if self
            .by_id
            .get(id)
            .is_some_and(|current| same_entity(current, entity))
        {
            self.by_id.remove(id);
        }
        true
    }

    /// Empties both indices, returning how many ids were released.
    pub(crate) fn clear(&mut self) -> usize {
        let released = self.by_id.len();
        *self = Self::new();
        released
    }

    pub(crate) fn list(&self, key: TypeKey) -> EntityList {
        self.by_type
            .get(&key)
            .map(Bucket::snapshot)
            .unwrap_or_default()
    }

    pub(crate) fn first(&self, key: TypeKey) -> Option<SharedEntity> {
        self.by_type
            .get(&key)
            .and_then(Bucket::first)
            .map(SharedEntity::clone)
    }

    pub(crate) fn get_by_id(&self, id: &str) -> Option<SharedEntity> {
        self.by_id.get(id).map(SharedEntity::clone)
    }

    pub(crate) fn contains_id(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Returns true if `entity` (by identity) is in its type's bucket.
    pub(crate) fn contains(&self, entity: &SharedEntity) -> bool {
        self.by_type
            .get(&entity.type_key())
            .is_some_and(|bucket| bucket.position(entity).is_some())
    }

    pub(crate) fn count_type(&self, key: TypeKey) -> usize {
        self.by_type.get(&key).map_or(0, Bucket::len)
    }

    pub(crate) fn count_total(&self) -> usize {
        self.by_id.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }

    pub(crate) fn type_keys(&self) -> Vec<TypeKey> {
        self.by_type.keys().copied().collect()
    }

    /// Iterates over every bucketed entity, bucket by bucket.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &SharedEntity> {
        self.by_type.values().flat_map(Bucket::iter)
    }

    /// Checks the structural invariants, returning a description of the
    /// first violation.
    ///
    /// Holds for any sequence of operations with unique ids.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) -> std::result::Result<(), String> {
        let bucketed: usize = self.by_type.values().map(Bucket::len).sum();
        if bucketed != self.by_id.len() {
            return Err(format!(
                "{bucketed} bucketed entities but {} ids",
                self.by_id.len()
            ));
        }
        for (key, bucket) in &self.by_type {
            if bucket.is_empty() {
                return Err(format!("empty bucket kept for {key}"));
            }
            for entity in bucket.iter() {
                if entity.type_key() != *key {
                    return Err(format!("{} stored under {key}", entity.type_key()));
                }
            }
        }
        for (id, entity) in &self.by_id {
            let holders = self
                .by_type
                .values()
                .filter(|bucket| bucket.position(entity).is_some())
                .count();
            if holders != 1 {
                return Err(format!("id {id} is held by {holders} buckets"));
            }
        }
        Ok(())
    }
}
