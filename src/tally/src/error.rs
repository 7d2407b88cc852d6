//! Input validation errors

use thiserror::Error;

/// Error produced when a selection is rejected before touching any state.
///
/// Reported back to the caller so the person can correct their input;
/// the [`Directory`](crate::Directory) is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The user name was empty or only whitespace.
    #[error("user name cannot be empty")]
    EmptyUserName,

    /// The date was not a canonical `YYYY-MM-DD` calendar date.
    #[error("`{input}` is not a date of the form YYYY-MM-DD")]
    MalformedDate {
        /// The rejected text.
        input: String,
    },

    /// The selection type was neither `available` nor `unavailable`.
    #[error("`{input}` is not a selection type (expected `available` or `unavailable`)")]
    UnknownSelectionType {
        /// The rejected text.
        input: String,
    },
}
