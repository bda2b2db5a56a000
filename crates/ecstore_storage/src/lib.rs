//! Dual-indexed concurrent entity store for ecstore.
//!
//! This crate provides:
//! - [`Store`] - Entities indexed by concrete type and by id, behind one lock
//! - [`StoreConfig`] - Validation and duplicate-id policies
//! - [`StoreSnapshot`] - Immutable views with structural sharing

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod bucket;
pub mod config;
mod index;
pub mod snapshot;
pub mod store;

pub use config::{DuplicateIds, StoreConfig, Validation};
pub use snapshot::StoreSnapshot;
pub use store::Store;
