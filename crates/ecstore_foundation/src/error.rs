//! Error types for the ecstore system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// The main error type for store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}{}", .context.as_ref().map(|ctx| format!(" ({ctx})")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a no-entities-provided error.
    #[must_use]
    pub fn no_entities_provided() -> Self {
        Self::new(ErrorKind::NoEntitiesProvided)
    }

    /// Creates an invalid entity error.
    #[must_use]
    pub fn invalid_entity(reason: InvalidEntity) -> Self {
        Self::new(ErrorKind::InvalidEntity(reason))
    }

    /// Creates a duplicate id error.
    #[must_use]
    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateId(id.into()))
    }

    /// Returns true if this is an invalid entity error.
    #[must_use]
    pub fn is_invalid_entity(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidEntity(_))
    }
}

impl From<InvalidEntity> for Error {
    fn from(reason: InvalidEntity) -> Self {
        Self::invalid_entity(reason)
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// `add` or `remove` was called with no entities.
    #[error("store: no entities provided")]
    NoEntitiesProvided,

    /// An argument could not be used as an entity.
    #[error("store: invalid entity: {0}")]
    InvalidEntity(InvalidEntity),

    /// An id was already taken, with duplicate rejection enabled.
    #[error("store: duplicate entity id: {0}")]
    DuplicateId(String),
}

/// Why a value was rejected as an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum InvalidEntity {
    /// No value was passed.
    #[error("no entity was provided")]
    Missing,

    /// The reference no longer points at a live entity.
    #[error("entity reference has no referent")]
    Dangling,
}

/// Context about where an error occurred.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorContext {
    /// The store operation that failed.
    pub operation: Option<&'static str>,
    /// Zero-based position of the offending argument.
    pub position: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context naming the failing operation.
    #[must_use]
    pub fn operation(operation: &'static str) -> Self {
        Self {
            operation: Some(operation),
            position: None,
        }
    }

    /// Sets the argument position.
    #[must_use]
    pub fn at(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.operation, self.position) {
            (Some(op), Some(pos)) => write!(f, "in {op}, argument {pos}"),
            (Some(op), None) => write!(f, "in {op}"),
            (None, Some(pos)) => write!(f, "argument {pos}"),
            (None, None) => Ok(()),
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, Error>;
