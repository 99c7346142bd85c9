//! Fatal contract enforcement.
//!
//! Every failure in blockgrid is a precondition the caller failed to
//! satisfy. The fallible APIs (`try_new`, `get`, `traversal`) surface a
//! [`GridError`]; the contract APIs (`new`, `at`, `map`) route the same
//! error through [`violated`] and unwind.

use crate::error::GridError;

/// Abort the current operation with a contract violation.
///
/// The panic message is `"contract violation: {err}"`, and the reported
/// location is the caller's.
#[track_caller]
#[cold]
pub fn violated(err: GridError) -> ! {
    panic!("contract violation: {err}")
}

/// Unwrap a contract-checked result, panicking with [`violated`] on error.
#[track_caller]
pub fn require<T>(result: Result<T, GridError>) -> T {
    match result {
        Ok(v) => v,
        Err(err) => violated(err),
    }
}
