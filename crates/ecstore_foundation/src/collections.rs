//! Snapshot sequences of shared entities.
//!
//! [`EntityList`] is a thin wrapper around `im::Vector`. Cloning is O(1) and
//! the store can hand out a bucket without copying it; later changes to the
//! bucket never show up in a list that was already returned.

use std::fmt;
use std::iter::FromIterator;
use std::sync::Arc;

use crate::entity::{Entity, SharedEntity, downcast, same_entity};

/// An immutable sequence of shared entities.
///
/// Membership is frozen when the list is created. The entities themselves
/// are shared, so changes made through their interior mutability are
/// visible here.
#[derive(Clone, Default)]
pub struct EntityList(im::Vector<SharedEntity>);

impl EntityList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self(im::Vector::new())
    }

    /// Returns the number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets an entity by position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SharedEntity> {
        self.0.get(index)
    }

    /// Returns the first entity.
    #[must_use]
    pub fn first(&self) -> Option<&SharedEntity> {
        self.0.front()
    }

    /// Returns the last entity.
    #[must_use]
    pub fn last(&self) -> Option<&SharedEntity> {
        self.0.back()
    }

    /// Returns an iterator over the entities.
    pub fn iter(&self) -> impl Iterator<Item = &SharedEntity> {
        self.0.iter()
    }

    /// Returns true if `entity` (by identity) is in the list.
    #[must_use]
    pub fn contains(&self, entity: &SharedEntity) -> bool {
        self.0.iter().any(|e| same_entity(e, entity))
    }

    /// Returns the ids of the entities, in list order.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.0.iter().map(|e| e.id().into_owned()).collect()
    }

    /// Returns the entities that are of type `T`, as concrete handles.
    #[must_use]
    pub fn downcast<T: Entity>(&self) -> Vec<Arc<T>> {
        self.0
            .iter()
            .filter_map(|e| downcast::<T>(Arc::clone(e)))
            .collect()
    }

    /// Copies the handles into a `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<SharedEntity> {
        self.0.iter().cloned().collect()
    }
}

impl From<im::Vector<SharedEntity>> for EntityList {
    fn from(entities: im::Vector<SharedEntity>) -> Self {
        Self(entities)
    }
}

impl FromIterator<SharedEntity> for EntityList {
    fn from_iter<I: IntoIterator<Item = SharedEntity>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for EntityList {
    type Item = SharedEntity;
    type IntoIter = im::vector::ConsumingIter<SharedEntity>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a EntityList {
    type Item = &'a SharedEntity;
    type IntoIter = im::vector::Iter<'a, SharedEntity>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Debug for EntityList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}
