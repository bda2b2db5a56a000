//! Immutable point-in-time views of a store.
//!
//! A snapshot is taken under one read lock, so both indices agree with each
//! other. It shares structure with the store and never sees later changes.

use std::fmt;
use std::sync::Arc;

use ecstore_foundation::{
    Entity, EntityList, Result, SharedEntity, TypeKey, TypeKeyResolver, TypeWitness, downcast,
};

use crate::index::Indices;

/// A frozen copy of a store's contents.
///
/// Clone is O(1).
#[derive(Clone)]
pub struct StoreSnapshot {
    indices: Indices,
}

impl StoreSnapshot {
    pub(crate) fn new(indices: Indices) -> Self {
        Self { indices }
    }

    /// Returns every entity of the sample's type.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEntity` if the sample is `None` or a dangling `Weak`.
    pub fn get_all<W: TypeWitness + ?Sized>(&self, sample: &W) -> Result<EntityList> {
        let key = TypeKeyResolver::resolve(sample)?;
        Ok(self.indices.list(key))
    }

    /// Returns every entity of type `T`.
    #[must_use]
    pub fn get_all_of<T: Entity>(&self) -> Vec<Arc<T>> {
        self.indices.list(TypeKey::of::<T>()).downcast::<T>()
    }

    /// Returns the entity at the front of the sample type's bucket.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEntity` if the sample is `None` or a dangling `Weak`.
    pub fn get_first<W: TypeWitness + ?Sized>(&self, sample: &W) -> Result<Option<SharedEntity>> {
        let key = TypeKeyResolver::resolve(sample)?;
        Ok(self.indices.first(key))
    }

    /// Looks up an entity by id.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<SharedEntity> {
        self.indices.get_by_id(id)
    }

    /// Looks up an entity by id and returns it as a `T`.
    #[must_use]
    pub fn get_by_id_as<T: Entity>(&self, id: &str) -> Option<Arc<T>> {
        self.indices.get_by_id(id).and_then(downcast::<T>)
    }

    /// Returns the number of entities of the sample's type, or 0 for an
    /// invalid sample.
    #[must_use]
    pub fn count_type<W: TypeWitness + ?Sized>(&self, sample: &W) -> usize {
        TypeKeyResolver::resolve(sample).map_or(0, |key| self.indices.count_type(key))
    }

    /// Returns the number of entities of type `T`.
    #[must_use]
    pub fn count_of<T: Entity>(&self) -> usize {
        self.indices.count_type(TypeKey::of::<T>())
    }

    /// Returns the number of ids.
    #[must_use]
    pub fn count_total(&self) -> usize {
        self.indices.count_total()
    }

    /// Returns true if the snapshot holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns the keys of every type with entities.
    #[must_use]
    pub fn type_keys(&self) -> Vec<TypeKey> {
        self.indices.type_keys()
    }

    /// Iterates over every entity, grouped by type.
    ///
    /// Order within a type follows its bucket; the order of types is
    /// unspecified.
    pub fn iter(&self) -> impl Iterator<Item = &SharedEntity> {
        self.indices.iter()
    }
}

impl fmt::Debug for StoreSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreSnapshot")
            .field("types", &self.indices.type_keys().len())
            .field("entities", &self.indices.count_total())
            .finish()
    }
}
