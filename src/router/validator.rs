//! Dispatch validation
//!
//! Checks that every argument an operation requires is present and non-empty
//! before dispatch is allowed. Not an error path: a false here is a signal
//! that the caller should take the fallback route.

use super::operation::{ArgumentSet, Operation};

/// Whether the argument set is complete enough to dispatch
///
/// Missing or empty (empty string, empty list) required arguments fail.
/// Integers and booleans always pass once set; a zero limit is a value,
/// not an absence. Pure and deterministic.
pub fn is_dispatchable(operation: Operation, args: &ArgumentSet) -> bool {
    operation
        .required_args()
        .iter()
        .all(|name| args.get(name).is_some_and(|value| !value.is_empty()))
}

/// Names of required arguments that are missing or empty
///
/// Used for logging and CLI diagnostics when a request falls back.
pub fn missing_args(operation: Operation, args: &ArgumentSet) -> Vec<&'static str> {
    operation
        .required_args()
        .iter()
        .filter(|name| !args.get(name).is_some_and(|value| !value.is_empty()))
        .copied()
        .collect()
}
