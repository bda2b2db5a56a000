//! ecstore - Concurrent in-memory entity store
//!
//! This crate re-exports all layers of the ecstore system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: ecstore_storage    — Store, buckets, indices, snapshots
//! Layer 0: ecstore_foundation — Entity trait, TypeKey, Error
//! ```

pub use ecstore_foundation as foundation;
pub use ecstore_storage as storage;

pub use ecstore_foundation::{
    Entity, EntityList, Error, ErrorKind, InvalidEntity, IntoEntity, Result, SharedEntity,
    TypeKey, TypeKeyResolver, TypeWitness,
};
pub use ecstore_storage::{DuplicateIds, Store, StoreConfig, StoreSnapshot, Validation};
