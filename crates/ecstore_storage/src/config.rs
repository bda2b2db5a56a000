//! Configuration for entity stores.

/// When `add` and `remove` validate their arguments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Validation {
    /// Validate the whole batch before touching any index.
    ///
    /// A batch with an invalid entity leaves the store unchanged.
    #[default]
    Upfront,
    /// Validate each entity as it is reached.
    ///
    /// Entities before the first invalid one stay applied.
    Lazy,
}

/// What `add` does with an id that is already in use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicateIds {
    /// Point the id index at the newest entity.
    ///
    /// The older entity stays in its type bucket but is no longer reachable
    /// by id, and the total count no longer matches the bucket sizes.
    #[default]
    Overwrite,
    /// Fail with a `DuplicateId` error.
    ///
    /// An id is a duplicate if it is already stored or appears earlier in
    /// the same batch.
    Reject,
}

/// Configuration for a [`Store`](crate::Store).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoreConfig {
    /// When arguments are validated.
    pub validation: Validation,
    /// How duplicate ids are handled on insert.
    pub duplicate_ids: DuplicateIds,
}

impl StoreConfig {
    /// Upfront validation with duplicate ids rejected.
    ///
    /// Every `add` either applies completely or not at all, and the id index
    /// always agrees with the type buckets.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            validation: Validation::Upfront,
            duplicate_ids: DuplicateIds::Reject,
        }
    }

    /// Per-entity validation with duplicate ids overwritten.
    ///
    /// Matches stores that apply a batch entity by entity and stop at the
    /// first invalid one. Only the partial application is matched: removing
    /// a stale duplicate still leaves the id pointing at the newer entity,
    /// as under every other configuration.
    #[must_use]
    pub fn compatible() -> Self {
        Self {
            validation: Validation::Lazy,
            duplicate_ids: DuplicateIds::Overwrite,
        }
    }

    /// Builder method to set the validation mode.
    #[must_use]
    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }

    /// Builder method to set duplicate id handling.
    #[must_use]
    pub fn with_duplicate_ids(mut self, duplicate_ids: DuplicateIds) -> Self {
        self.duplicate_ids = duplicate_ids;
        self
    }

    /// Returns true if duplicate ids are rejected.
    #[must_use]
    pub fn rejects_duplicates(&self) -> bool {
        self.duplicate_ids == DuplicateIds::Reject
    }
}
