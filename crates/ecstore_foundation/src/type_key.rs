//! Type keys derived from runtime type identity.
//!
//! A [`TypeKey`] names the concrete type of an entity. Keys are derived on
//! demand from `TypeId`, so any type implementing [`Entity`] can be stored
//! without being registered first.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

use crate::entity::Entity;
use crate::error::{Error, InvalidEntity, Result};

/// Identifies the concrete type of an entity.
///
/// Equality and hashing use only the `TypeId`, so two types that share a
/// short name but live in different modules get different keys. The type
/// name is carried for display.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Returns the key for `T`.
    #[must_use]
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Returns the underlying `TypeId`.
    #[must_use]
    pub fn type_id(self) -> TypeId {
        self.id
    }

    /// Returns the fully-qualified type name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.name
    }

    /// Returns the declared type name without its module path.
    ///
    /// Generic arguments are kept as written: `a::b::Crate<c::Item>` becomes
    /// `Crate<c::Item>`.
    #[must_use]
    pub fn short_name(self) -> &'static str {
        let base_end = self.name.find('<').unwrap_or(self.name.len());
        match self.name[..base_end].rfind("::") {
            Some(sep) => &self.name[sep + 2..],
            None => self.name,
        }
    }

    /// Returns true if this is the key of `T`.
    #[must_use]
    pub fn is<T: Any + ?Sized>(self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// A value that can name an entity type.
///
/// Witnesses are used only to select a [`TypeKey`]; their own id and
/// contents are ignored. Any entity value works, as do the handle types a
/// caller is likely to be holding (`Arc`, `Weak`, `Option`).
pub trait TypeWitness {
    /// Returns the key of the witnessed type.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidEntity::Missing`] for an empty `Option` and
    /// [`InvalidEntity::Dangling`] for a `Weak` whose entity was dropped.
    fn witness_key(&self) -> std::result::Result<TypeKey, InvalidEntity>;
}

impl<T: Entity + ?Sized> TypeWitness for T {
    fn witness_key(&self) -> std::result::Result<TypeKey, InvalidEntity> {
        Ok(self.type_key())
    }
}

impl<T: Entity + ?Sized> TypeWitness for Arc<T> {
    fn witness_key(&self) -> std::result::Result<TypeKey, InvalidEntity> {
        Ok((**self).type_key())
    }
}

impl<T: Entity + ?Sized> TypeWitness for Weak<T> {
    fn witness_key(&self) -> std::result::Result<TypeKey, InvalidEntity> {
        self.upgrade()
            .map(|entity| (*entity).type_key())
            .ok_or(InvalidEntity::Dangling)
    }
}

impl<W: TypeWitness> TypeWitness for Option<W> {
    fn witness_key(&self) -> std::result::Result<TypeKey, InvalidEntity> {
        match self {
            Some(witness) => witness.witness_key(),
            None => Err(InvalidEntity::Missing),
        }
    }
}

/// Derives type keys and rejects values that cannot be entities.
///
/// Bare primitives and plain values are ruled out statically: only types
/// implementing [`Entity`] reach the resolver, and stored entities are
/// always passed through shared handles. What remains to check at runtime
/// is whether a handle actually refers to something.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeKeyResolver;

impl TypeKeyResolver {
    /// Resolves the type key of `value`.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidEntity` error if `value` is missing or dangling.
    pub fn resolve<W: TypeWitness + ?Sized>(value: &W) -> Result<TypeKey> {
        value.witness_key().map_err(Error::invalid_entity)
    }

    /// Resolves the type key of a concrete entity type.
    #[must_use]
    pub fn key_of<T: Entity>() -> TypeKey {
        TypeKey::of::<T>()
    }
}
