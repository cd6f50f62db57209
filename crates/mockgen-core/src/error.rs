//! Core error types for mockgen-core.
//!
//! Uses `thiserror` for structured, matchable variants covering loading a
//! contract description and resolving the target contract in it.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading or querying a type provider.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The description file could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The description is not valid JSON or does not match the schema.
    #[error("invalid contract description: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two declarations share a name.
    #[error("duplicate declaration: '{name}'")]
    DuplicateDeclaration { name: String },

    /// Nothing is declared under the requested name.
    #[error("contract '{name}' not found")]
    DeclarationNotFound { name: String },

    /// The requested name is declared, but is not a contract.
    #[error("'{name}' is a {kind}, not a contract")]
    NotAContract { name: String, kind: String },
}
