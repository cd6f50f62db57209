//! Runtime verification errors.

use thiserror::Error;

/// Errors from consuming expectations out of a [`Ledger`](crate::Ledger).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Every recorded expectation has already been consumed.
    #[error(
        "no more calls expected, expected number of calls: {recorded}, unexpected call of \"{called}\" occurred"
    )]
    Exhausted { recorded: usize, called: String },

    /// The next expectation is for a different method.
    #[error("method mismatch on call #{index}: expected \"{recorded}\", got \"{called}\"")]
    MethodMismatch {
        index: usize,
        recorded: String,
        called: String,
    },
}

/// Errors from turning a stored value back into a concrete type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CastError {
    /// The stored value is not of any accepted type.
    #[error("recorded value is not a `{expected}`")]
    TypeMismatch { expected: &'static str },

    /// The payload has no value at the requested position.
    #[error("call #{index} has no value at position {position}")]
    MissingSlot { index: usize, position: usize },
}
