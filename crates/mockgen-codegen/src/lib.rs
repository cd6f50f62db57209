//! Mock source generation for mockgen contracts.
//!
//! This crate turns a [`ContractDef`] from a type provider into the Rust
//! source of a replaying mock that drives `mockgen_ledger` at test time.
//!
//! # Modules
//!
//! - [`error`] -- Error types for all generation failure modes
//! - [`walker`] -- Type walker reducing parameter types to variables
//! - [`deps`] -- Namespace dependency table and name qualification
//! - [`signature`] -- Per-method implementation and assertion signatures
//! - [`reconstruct`] -- Output reconstruction strategies
//! - [`render`] -- Source text emission

pub mod deps;
pub mod error;
pub mod generator;
pub mod reconstruct;
pub mod render;
pub mod signature;
pub mod walker;

pub use error::SynthError;
pub use generator::{generate, synthesize};

use mockgen_core::{ContractDef, Namespace};
use serde::{Deserialize, Serialize};

use crate::deps::{DependencyTable, Qualifier};
use crate::signature::SignatureSet;

/// Default expectation helper name format.
pub const DEFAULT_ASSERT_NAME: &str = "assert_%s_call";

/// Default path of the runtime crate generated code calls into.
pub const DEFAULT_RUNTIME_PATH: &str = "mockgen_ledger";

/// Types that never participate in recording unless overridden.
pub const DEFAULT_EXCLUDED_TYPES: &[&str] = &["tokio_util::sync::CancellationToken"];

/// Options controlling mock generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Namespace the generated file lives in. Types declared there are
    /// rendered without a qualifier.
    /// `None` means every namespace is qualified.
    pub home: Option<Namespace>,

    /// Expectation helper name format; `%s` is replaced by the method name.
    pub assert_name: String,

    /// Do not import the contract's own namespace and spell its names bare.
    pub no_self_import: bool,

    /// Qualified names of types that are passed through but never recorded.
    pub excluded_types: Vec<String>,

    /// Path of the runtime crate.
    pub runtime_path: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            home: None,
            assert_name: DEFAULT_ASSERT_NAME.to_string(),
            no_self_import: false,
            excluded_types: DEFAULT_EXCLUDED_TYPES
                .iter()
                .map(|t| t.to_string())
                .collect(),
            runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
        }
    }
}

/// Everything the renderer needs for one contract.
#[derive(Debug, Clone)]
pub struct MockModel {
    pub contract: ContractDef,
    /// Name of the generated struct, `<Contract>Mock`.
    pub mock_name: String,
    /// One entry per exported method, in declaration order.
    pub signatures: Vec<SignatureSet>,
    pub dependencies: DependencyTable,
    pub qualifier: Qualifier,
    /// Runtime crate namespace.
    pub runtime: Namespace,
    /// Assertion helper module inside the runtime crate.
    pub assert_module: Namespace,
}

/// Result of a successful generation.
#[derive(Debug, Clone)]
pub struct GeneratedMock {
    /// Rendered Rust source.
    pub source: String,
    pub model: MockModel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_generate_options() {
        let opts = GenerateOptions::default();
        assert!(opts.home.is_none());
        assert_eq!(opts.assert_name, "assert_%s_call");
        assert!(!opts.no_self_import);
        assert_eq!(
            opts.excluded_types,
            vec!["tokio_util::sync::CancellationToken".to_string()]
        );
        assert_eq!(opts.runtime_path, "mockgen_ledger");
    }

    #[test]
    fn generate_options_serde_roundtrip() {
        let opts = GenerateOptions {
            home: Some(Namespace::new("crate::mocks")),
            assert_name: "expect_%s".to_string(),
            no_self_import: true,
            excluded_types: vec![],
            runtime_path: "crate::ledger".to_string(),
        };
        let json = serde_json::to_string(&opts).unwrap();
        let back: GenerateOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, opts);
    }

    #[test]
    fn missing_option_fields_take_defaults() {
        let opts: GenerateOptions = serde_json::from_str(r#"{ "no_self_import": true }"#).unwrap();
        assert!(opts.no_self_import);
        assert_eq!(opts.assert_name, DEFAULT_ASSERT_NAME);
        assert_eq!(opts.runtime_path, DEFAULT_RUNTIME_PATH);
    }
}
