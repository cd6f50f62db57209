//! Runtime support for mocks generated by `mockgen`.
//!
//! A generated mock owns a [`Ledger`] and a [`TestHandle`]. Its expectation
//! helpers append calls to the ledger; its trait methods consume them in
//! order, assert their arguments with the [`assert`] helpers, and rebuild
//! their results with the reconstruction helpers ([`cast`], [`to_pointer`],
//! [`to_option`], [`to_result`]).
//!
//! # Modules
//!
//! - [`ledger`] -- the ordered, mutex-guarded expectation queue
//! - [`handle`] -- failure sink standing in for the test context
//! - [`assert`] -- argument equality and identity assertions
//! - [`cast`] -- result reconstruction from recorded values
//! - [`error`] -- ledger and cast errors

pub mod assert;
pub mod cast;
pub mod error;
pub mod handle;
pub mod ledger;

pub use cast::{
    cast, to_option, to_pointer, to_result, try_cast, try_to_option, try_to_pointer, try_to_result,
};
pub use error::{CastError, LedgerError};
pub use handle::TestHandle;
pub use ledger::{Call, Ledger, Value};
