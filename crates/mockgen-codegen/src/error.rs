//! Synthesis error types covering all generation failure modes.

use mockgen_core::CoreError;

/// Errors that abort mock generation. No partial output is produced.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    /// A parameter's type has a shape that cannot be recorded and replayed.
    #[error("unknown type: `{ty}` of `{param}` in method `{method}` cannot be mocked")]
    UnsupportedType {
        method: String,
        param: String,
        ty: String,
    },

    /// The helper name format has no `%s` placeholder for the method name.
    #[error("invalid helper name format '{format}': expected a '%s' placeholder")]
    InvalidHelperFormat { format: String },

    /// Text emission failed.
    #[error("render error: {0}")]
    Render(#[from] std::fmt::Error),

    /// Loading the contract from the type provider failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}
