//! Top-level generation pipeline:
//! contract lookup -> per-method synthesis -> dependency finalization
//! -> rendering.
//!
//! [`generate`] is the main entry point. [`synthesize`] stops before
//! rendering and returns the [`MockModel`], which is what most tests
//! inspect.

use std::collections::HashSet;

use mockgen_core::{ContractDef, Namespace, TypeProvider};

use crate::deps::DependencyTable;
use crate::error::SynthError;
use crate::signature::{helper_name, synthesize_method, SynthContext};
use crate::{render, GenerateOptions, GeneratedMock, MockModel};

/// Generates the mock source for the contract named `type_name`.
///
/// Nothing is produced unless every step succeeds.
pub fn generate(
    provider: &dyn TypeProvider,
    type_name: &str,
    options: &GenerateOptions,
) -> Result<GeneratedMock, SynthError> {
    let contract = provider.contract(type_name)?;
    let model = synthesize(contract, provider, options)?;
    let source = render::render(&model)?;
    Ok(GeneratedMock { source, model })
}

/// Builds the mock model for `contract` without rendering it.
///
/// 1. Validate the helper name format
/// 2. Synthesize every exported method, in declaration order
/// 3. Register the runtime crate, its assertion module, and the contract's
///    own namespace
/// 4. Suppress the contract namespace if `no_self_import` is set
/// 5. Freeze the dependency table into a qualifier relative to `home`
pub fn synthesize(
    contract: &ContractDef,
    provider: &dyn TypeProvider,
    options: &GenerateOptions,
) -> Result<MockModel, SynthError> {
    // Rejects a bad format even when the contract has no methods.
    helper_name(&options.assert_name, &contract.name)?;

    let excluded: HashSet<String> = options.excluded_types.iter().cloned().collect();
    let mut deps = DependencyTable::new();

    let mut signatures = Vec::with_capacity(contract.methods.len());
    {
        let mut ctx = SynthContext {
            deps: &mut deps,
            excluded: &excluded,
            helper_format: &options.assert_name,
        };
        for method in &contract.methods {
            let exported = provider.is_exported(method);
            if let Some(set) = synthesize_method(method, exported, &mut ctx)? {
                signatures.push(set);
            }
        }
    }

    let runtime = Namespace::new(&options.runtime_path);
    let assert_module = runtime.child("assert");
    deps.resolve(Some(&runtime));
    deps.resolve(Some(&assert_module));
    deps.resolve(Some(&contract.namespace));
    if options.no_self_import {
        deps.suppress(&contract.namespace);
    }

    let qualifier = deps.qualifier(options.home.as_ref());

    tracing::info!(
        contract = %contract.qualified_name(),
        methods = signatures.len(),
        dependencies = deps.len(),
        "mock synthesized"
    );

    Ok(MockModel {
        mock_name: format!("{}Mock", contract.name),
        contract: contract.clone(),
        signatures,
        dependencies: deps,
        qualifier,
        runtime,
        assert_module,
    })
}
