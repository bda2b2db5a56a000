//! Entity capability, type keys, and error types for ecstore.
//!
//! This crate provides:
//! - [`Entity`] - The capability every stored record implements
//! - [`TypeKey`] - Runtime type identity used to bucket entities
//! - [`TypeKeyResolver`] - Type key derivation and entity validation
//! - [`EntityList`] - Immutable snapshot sequences of shared entities
//! - [`Error`] - Error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod entity;
pub mod error;
pub mod type_key;

pub use collections::EntityList;
pub use entity::{AsAnyArc, Entity, IntoEntity, SharedEntity, downcast, same_entity};
pub use error::{Error, ErrorContext, ErrorKind, InvalidEntity, Result};
pub use type_key::{TypeKey, TypeKeyResolver, TypeWitness};
