//! The concurrent entity store.
//!
//! One reader/writer lock guards both indices. `add`, `remove` and `clear`
//! hold the write lock for the whole call, so no other caller ever sees half
//! of a batch. Reads share the lock.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use ecstore_foundation::{
    Entity, EntityList, Error, ErrorContext, IntoEntity, Result, SharedEntity, TypeKey,
    TypeKeyResolver, TypeWitness, downcast,
};
use tracing::debug;

use crate::config::{StoreConfig, Validation};
use crate::index::Indices;
use crate::snapshot::StoreSnapshot;

/// An argument that passed validation, with everything the indices need.
struct Prepared {
    position: usize,
    key: TypeKey,
    id: String,
    entity: SharedEntity,
}

impl Prepared {
    fn new(item: impl IntoEntity, position: usize, operation: &'static str) -> Result<Self> {
        let context = || ErrorContext::operation(operation).at(position);
        let entity = item
            .into_entity()
            .map_err(|reason| Error::invalid_entity(reason).with_context(context()))?;
        let key = TypeKeyResolver::resolve(&entity).map_err(|err| err.with_context(context()))?;
        let id = entity.id().into_owned();
        Ok(Self {
            position,
            key,
            id,
            entity,
        })
    }
}

/// Validates a whole batch before anything is applied.
fn prepare_all<I>(entities: I, operation: &'static str) -> Result<Vec<Prepared>>
where
    I: IntoIterator,
    I::Item: IntoEntity,
{
    let batch = entities
        .into_iter()
        .enumerate()
        .map(|(position, item)| Prepared::new(item, position, operation))
        .collect::<Result<Vec<_>>>()?;
    if batch.is_empty() {
        return Err(no_entities(operation));
    }
    Ok(batch)
}

fn no_entities(operation: &'static str) -> Error {
    Error::no_entities_provided().with_context(ErrorContext::operation(operation))
}

fn duplicate(prepared: &Prepared, operation: &'static str) -> Error {
    Error::duplicate_id(prepared.id.clone())
        .with_context(ErrorContext::operation(operation).at(prepared.position))
}

/// A thread-safe store of entities indexed by concrete type and by id.
///
/// Entities of any type implementing [`Entity`] can be added without
/// registering the type first. The store keeps shared handles, so entities
/// returned from lookups are the caller's own objects.
///
/// ```
/// use std::borrow::Cow;
/// use std::sync::Arc;
/// use ecstore_foundation::Entity;
/// use ecstore_storage::Store;
///
/// struct Player {
///     id: String,
/// }
///
/// impl Entity for Player {
///     fn id(&self) -> Cow<'_, str> {
///         Cow::Borrowed(&self.id)
///     }
/// }
///
/// let store = Store::new();
/// store.add([Arc::new(Player { id: "p1".into() })]).unwrap();
///
/// assert_eq!(store.count_of::<Player>(), 1);
/// assert!(store.get_by_id("p1").is_some());
/// ```
pub struct Store {
    config: StoreConfig,
    state: RwLock<Indices>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Creates an empty store with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates an empty store with the given configuration.
    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            state: RwLock::new(Indices::new()),
        }
    }

    /// Returns the store's configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // Poisoned guards are recovered: each index update completes before the
    // next one starts, so the indices are never left half-written.
    fn read(&self) -> RwLockReadGuard<'_, Indices> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Indices> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds entities, appending each to its type's bucket and indexing it by id.
    ///
    /// # Errors
    ///
    /// - `NoEntitiesProvided` if `entities` is empty.
    /// - `InvalidEntity` if an argument is `None` or a dangling `Weak`.
    /// - `DuplicateId` if duplicate ids are rejected and one is found.
    ///
    /// With [`Validation::Upfront`] a failed call changes nothing. With
    /// [`Validation::Lazy`] the entities before the failing one stay added.
    pub fn add<I>(&self, entities: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: IntoEntity,
    {
        const OP: &str = "add";

        match self.config.validation {
            Validation::Upfront => {
                let batch = prepare_all(entities, OP)?;
                let mut state = self.write();
                if self.config.rejects_duplicates() {
                    let mut seen = HashSet::with_capacity(batch.len());
                    for prepared in &batch {
                        if state.contains_id(&prepared.id) || !seen.insert(prepared.id.as_str()) {
                            return Err(duplicate(prepared, OP));
                        }
                    }
                }
                for prepared in batch {
                    state.insert(prepared.key, prepared.id, prepared.entity);
                }
            }
            Validation::Lazy => {
                let mut items = entities.into_iter().peekable();
                if items.peek().is_none() {
                    return Err(no_entities(OP));
                }
                let mut state = self.write();
                for (position, item) in items.enumerate() {
                    let prepared = Prepared::new(item, position, OP)?;
                    if self.config.rejects_duplicates() && state.contains_id(&prepared.id) {
                        return Err(duplicate(&prepared, OP));
                    }
                    state.insert(prepared.key, prepared.id, prepared.entity);
                }
            }
        }
        Ok(())
    }

    /// Removes entities by reference identity.
    ///
    /// Entities that are not stored are skipped. Removal swaps the last
    /// entity of the bucket into the vacated slot, so the order of the
    /// remaining entities may change.
    ///
    /// # Errors
    ///
    /// - `NoEntitiesProvided` if `entities` is empty.
    /// - `InvalidEntity` if an argument is `None` or a dangling `Weak`.
    pub fn remove<I>(&self, entities: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: IntoEntity,
    {
        const OP: &str = "remove";

        match self.config.validation {
            Validation::Upfront => {
                let batch = prepare_all(entities, OP)?;
                let mut state = self.write();
                for prepared in &batch {
                    state.remove(prepared.key, &prepared.id, &prepared.entity);
                }
            }
            Validation::Lazy => {
                let mut items = entities.into_iter().peekable();
                if items.peek().is_none() {
                    return Err(no_entities(OP));
                }
                let mut state = self.write();
                for (position, item) in items.enumerate() {
                    let prepared = Prepared::new(item, position, OP)?;
                    state.remove(prepared.key, &prepared.id, &prepared.entity);
                }
            }
        }
        Ok(())
    }

    /// Returns every entity of the sample's type.
    ///
    /// The sample only selects the type. The returned list is a snapshot of
    /// the bucket: later adds and removes do not change it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEntity` if the sample is `None` or a dangling `Weak`.
    pub fn get_all<W: TypeWitness + ?Sized>(&self, sample: &W) -> Result<EntityList> {
        let key = resolve(sample, "get_all")?;
        Ok(self.read().list(key))
    }

    /// Returns the entity at the front of the sample type's bucket.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEntity` if the sample is `None` or a dangling `Weak`.
    pub fn get_first<W: TypeWitness + ?Sized>(&self, sample: &W) -> Result<Option<SharedEntity>> {
        let key = resolve(sample, "get_first")?;
        Ok(self.read().first(key))
    }

    /// Looks up an entity by id.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<SharedEntity> {
        self.read().get_by_id(id)
    }

    /// Looks up an entity by id and returns it as a `T`.
    ///
    /// Returns `None` if the id is absent or held by another type.
    #[must_use]
    pub fn get_by_id_as<T: Entity>(&self, id: &str) -> Option<Arc<T>> {
        self.get_by_id(id).and_then(downcast::<T>)
    }

    /// Returns every entity of type `T`.
    #[must_use]
    pub fn get_all_of<T: Entity>(&self) -> Vec<Arc<T>> {
        self.read().list(TypeKey::of::<T>()).downcast::<T>()
    }

    /// Returns the entity at the front of `T`'s bucket.
    #[must_use]
    pub fn get_first_of<T: Entity>(&self) -> Option<Arc<T>> {
        self.read()
            .first(TypeKey::of::<T>())
            .and_then(downcast::<T>)
    }

    /// Removes every entity.
    ///
    /// # Errors
    ///
    /// Never fails; the `Result` matches the other mutating operations.
    pub fn clear(&self) -> Result<()> {
        let released = self.write().clear();
        debug!(released, "store cleared");
        Ok(())
    }

    /// Returns the number of entities of the sample's type.
    ///
    /// An invalid sample counts as zero.
    #[must_use]
    pub fn count_type<W: TypeWitness + ?Sized>(&self, sample: &W) -> usize {
        TypeKeyResolver::resolve(sample).map_or(0, |key| self.read().count_type(key))
    }

    /// Returns the number of entities of type `T`.
    #[must_use]
    pub fn count_of<T: Entity>(&self) -> usize {
        self.read().count_type(TypeKey::of::<T>())
    }

    /// Returns the number of ids in the store.
    #[must_use]
    pub fn count_total(&self) -> usize {
        self.read().count_total()
    }

    /// Returns true if the store holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Returns true if this exact entity is stored.
    #[must_use]
    pub fn contains(&self, entity: &SharedEntity) -> bool {
        self.read().contains(entity)
    }

    /// Returns the keys of every type that currently has entities.
    #[must_use]
    pub fn type_keys(&self) -> Vec<TypeKey> {
        self.read().type_keys()
    }

    /// Takes an immutable snapshot of the whole store.
    ///
    /// O(1): the snapshot shares structure with the live indices.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot::new(self.read().clone())
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        f.debug_struct("Store")
            .field("config", &self.config)
            .field("types", &state.type_keys().len())
            .field("entities", &state.count_total())
            .finish()
    }
}

fn resolve<W: TypeWitness + ?Sized>(sample: &W, operation: &'static str) -> Result<TypeKey> {
    TypeKeyResolver::resolve(sample)
        .map_err(|err| err.with_context(ErrorContext::operation(operation)))
}
