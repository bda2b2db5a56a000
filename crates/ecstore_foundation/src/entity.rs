//! The entity capability and shared entity handles.
//!
//! Entities are caller-defined records. The store holds them by `Arc`, so
//! every lookup aliases the caller's value instead of copying it.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, Weak};

use crate::error::InvalidEntity;
use crate::type_key::TypeKey;

/// A shared handle to a stored entity.
pub type SharedEntity = Arc<dyn Entity>;

/// Conversion of an `Arc` into a type-erased `Any` handle.
///
/// Implemented for every sized `Send + Sync` type, so entity types get it
/// for free. It exists to let [`downcast`] recover `Arc<T>` from a
/// [`SharedEntity`].
pub trait AsAnyArc: Any + Send + Sync {
    /// Erases the handle to `Arc<dyn Any + Send + Sync>`.
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAnyArc for T {
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// A record that can be stored in the entity store.
///
/// The only requirement is a stable string identifier. Ids are expected to
/// be unique across the store; see the store configuration for what happens
/// when they are not.
///
/// Entities are shared, so fields that change after insertion need interior
/// mutability (`Mutex`, `RwLock`, atomics). Such changes are visible through
/// every handle the store returns.
///
/// ```
/// use std::borrow::Cow;
/// use ecstore_foundation::Entity;
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
/// ```
pub trait Entity: AsAnyArc {
    /// Returns this entity's identifier.
    fn id(&self) -> Cow<'_, str>;

    /// Returns the key of this entity's concrete type.
    ///
    /// Called through `dyn Entity` this still reports the concrete type.
    /// Implementors should not override it.
    fn type_key(&self) -> TypeKey {
        TypeKey::of::<Self>()
    }
}

impl fmt::Debug for dyn Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.type_key(), self.id())
    }
}

/// Returns true if `a` and `b` are the same stored object.
///
/// This is pointer identity, not id equality: two distinct entities that
/// happen to share an id are not the same entity.
#[must_use]
pub fn same_entity(a: &SharedEntity, b: &SharedEntity) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Recovers the concrete handle of a shared entity.
///
/// Returns `None` if the entity is not a `T`.
#[must_use]
pub fn downcast<T: Entity>(entity: SharedEntity) -> Option<Arc<T>> {
    entity.into_any_arc().downcast::<T>().ok()
}

/// A value that can be turned into a stored entity.
///
/// Strong handles always convert. `Weak` handles convert while their entity
/// is alive, and `Option` converts when it holds a value.
pub trait IntoEntity {
    /// Converts into a shared entity handle.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidEntity::Missing`] for `None` and
    /// [`InvalidEntity::Dangling`] for a `Weak` with no referent.
    fn into_entity(self) -> Result<SharedEntity, InvalidEntity>;
}

impl<T: Entity> IntoEntity for Arc<T> {
    fn into_entity(self) -> Result<SharedEntity, InvalidEntity> {
        Ok(self)
    }
}

impl<T: Entity> IntoEntity for &Arc<T> {
    fn into_entity(self) -> Result<SharedEntity, InvalidEntity> {
        Ok(Arc::clone(self) as SharedEntity)
    }
}

impl IntoEntity for SharedEntity {
    fn into_entity(self) -> Result<SharedEntity, InvalidEntity> {
        Ok(self)
    }
}

impl IntoEntity for &SharedEntity {
    fn into_entity(self) -> Result<SharedEntity, InvalidEntity> {
        Ok(Arc::clone(self))
    }
}

impl<T: Entity> IntoEntity for Weak<T> {
    fn into_entity(self) -> Result<SharedEntity, InvalidEntity> {
        self.upgrade()
            .map(|entity| entity as SharedEntity)
            .ok_or(InvalidEntity::Dangling)
    }
}

impl<T: Entity> IntoEntity for &Weak<T> {
    fn into_entity(self) -> Result<SharedEntity, InvalidEntity> {
        self.upgrade()
            .map(|entity| entity as SharedEntity)
            .ok_or(InvalidEntity::Dangling)
    }
}

impl IntoEntity for Weak<dyn Entity> {
    fn into_entity(self) -> Result<SharedEntity, InvalidEntity> {
        self.upgrade().ok_or(InvalidEntity::Dangling)
    }
}

impl<E: IntoEntity> IntoEntity for Option<E> {
    fn into_entity(self) -> Result<SharedEntity, InvalidEntity> {
        self.ok_or(InvalidEntity::Missing)?.into_entity()
    }
}
