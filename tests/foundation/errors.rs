//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use ecstore_foundation::{Error, ErrorContext, ErrorKind, InvalidEntity};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_no_entities_provided() {
    let err = Error::no_entities_provided();
    assert_eq!(err.kind, ErrorKind::NoEntitiesProvided);
    assert!(err.context.is_none());
}

#[test]
fn error_invalid_entity_missing() {
    let err = Error::invalid_entity(InvalidEntity::Missing);
    assert!(err.is_invalid_entity());
    assert!(format!("{err}").contains("no entity was provided"));
}

#[test]
fn error_invalid_entity_dangling() {
    let err = Error::invalid_entity(InvalidEntity::Dangling);
    assert!(matches!(
        err.kind,
        ErrorKind::InvalidEntity(InvalidEntity::Dangling)
    ));
}

#[test]
fn error_duplicate_id() {
    let err = Error::duplicate_id("player-1");
    assert!(!err.is_invalid_entity());
    assert!(format!("{err}").contains("player-1"));
}

// =============================================================================
// Error Display
// =============================================================================

#[test]
fn display_without_context() {
    let err = Error::no_entities_provided();
    assert_eq!(format!("{err}"), "store: no entities provided");
}

#[test]
fn display_with_operation() {
    let err = Error::no_entities_provided().with_context(ErrorContext::operation("remove"));
    assert_eq!(format!("{err}"), "store: no entities provided (in remove)");
}

#[test]
fn display_with_operation_and_position() {
    let err = Error::invalid_entity(InvalidEntity::Missing)
        .with_context(ErrorContext::operation("add").at(2));
    assert_eq!(
        format!("{err}"),
        "store: invalid entity: no entity was provided (in add, argument 2)"
    );
}

#[test]
fn empty_context_displays_nothing() {
    assert_eq!(format!("{}", ErrorContext::new()), "");
}

// =============================================================================
// Error Traits
// =============================================================================

#[test]
fn error_is_std_error() {
    fn takes_error(_: &dyn std::error::Error) {}
    takes_error(&Error::no_entities_provided());
}

#[test]
fn errors_compare_by_kind_and_context() {
    let a = Error::duplicate_id("x").with_context(ErrorContext::operation("add").at(0));
    let b = Error::duplicate_id("x").with_context(ErrorContext::operation("add").at(0));
    let c = Error::duplicate_id("x");
    assert_eq!(a, b);
    assert_ne!(a, c);
}
