//! Per-type entity buckets.
//!
//! A bucket holds every live entity of one concrete type, in insertion
//! order until a removal reorders it. Removal swaps the last entity into the
//! vacated slot, so it is O(1) after the identity scan but does not keep
//! relative order.

use ecstore_foundation::{EntityList, SharedEntity, same_entity};

/// Ordered entities sharing one type key.
#[derive(Clone, Default)]
pub(crate) struct Bucket {
    entities: im::Vector<SharedEntity>,
}

impl Bucket {
    /// Creates an empty bucket.
    pub(crate) fn new() -> Self {
        Self {
            entities: im::Vector::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entities.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Appends an entity at the end.
    pub(crate) fn push(&mut self, entity: SharedEntity) {
        self.entities.push_back(entity);
    }

    /// Returns the entity at position 0.
    pub(crate) fn first(&self) -> Option<&SharedEntity> {
        self.entities.front()
    }

    /// Finds `entity` by reference identity.
    pub(crate) fn position(&self, entity: &SharedEntity) -> Option<usize> {
        self.entities.iter().position(|e| same_entity(e, entity))
    }

    /// Removes the entity at `index`, moving the last entity into its place.
    ///
    /// Returns `None` if `index` is out of bounds.
    pub(crate) fn swap_remove(&mut self, index: usize) -> Option<SharedEntity> {
        if index >= self.entities.len() {
            return None;
        }
        let last = self.entities.pop_back()?;
        if index == self.entities.len() {
            Some(last)
        } else {
            Some(self.entities.set(index, last))
        }
    }

    /// Removes `entity` by reference identity. Returns true if it was present.
    pub(crate) fn remove(&mut self, entity: &SharedEntity) -> bool {
        match self.position(entity) {
            Some(index) => self.swap_remove(index).is_some(),
            None => false,
        }
    }

    /// Returns the current membership as an immutable list.
    pub(crate) fn snapshot(&self) -> EntityList {
        EntityList::from(self.entities.clone())
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &SharedEntity> {
        self.entities.iter()
    }
}
