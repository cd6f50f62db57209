//! Signature synthesis: one [`SignatureSet`] per mockable method.
//!
//! Every method yields two parallel signatures. The implementation
//! signature keeps every parameter so the generated override matches the
//! contract exactly; the assertion signature keeps only the participating
//! ones, in the order the expectation helper records them. Both share a
//! single order numbering, inputs first, then outputs.

use std::collections::HashSet;

use mockgen_core::{ContractMethod, Param};

use crate::deps::DependencyTable;
use crate::error::SynthError;
use crate::reconstruct::{strategy_for, Reconstruction};
use crate::walker::{walk, Comparison, Variable, WalkContext};

/// Placeholder replaced by the method name in helper name formats.
pub const METHOD_PLACEHOLDER: &str = "%s";

/// Ordered inputs and outputs of one rendered method.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signature {
    pub inputs: Vec<Variable>,
    pub outputs: Vec<Variable>,
}

impl Signature {
    /// Participating variables in payload order.
    pub fn participating(&self) -> impl Iterator<Item = &Variable> {
        self.inputs
            .iter()
            .chain(self.outputs.iter())
            .filter(|v| v.participating)
    }

    pub fn has_participating_inputs(&self) -> bool {
        self.inputs.iter().any(|v| v.participating)
    }

    pub fn has_participating_outputs(&self) -> bool {
        self.outputs.iter().any(|v| v.participating)
    }
}

/// Everything the renderer needs for one method.
#[derive(Debug, Clone)]
pub struct SignatureSet {
    pub method: ContractMethod,
    /// Name of the override.
    pub impl_name: String,
    /// Name of the expectation helper.
    pub assert_name: String,
    pub implementation: Signature,
    pub assertion: Signature,
    /// One strategy per implementation output, in order.
    pub reconstructions: Vec<Reconstruction>,
}

/// Shared state for synthesizing the methods of one contract.
pub struct SynthContext<'a> {
    pub deps: &'a mut DependencyTable,
    pub excluded: &'a HashSet<String>,
    /// Helper name format containing [`METHOD_PLACEHOLDER`].
    pub helper_format: &'a str,
}

/// Expands a helper name format for `method`.
pub fn helper_name(format: &str, method: &str) -> Result<String, SynthError> {
    if !format.contains(METHOD_PLACEHOLDER) {
        return Err(SynthError::InvalidHelperFormat {
            format: format.to_string(),
        });
    }
    Ok(format.replacen(METHOD_PLACEHOLDER, method, 1))
}

/// Builds the signature set for `method`, or `None` if it is not exported.
pub fn synthesize_method(
    method: &ContractMethod,
    exported: bool,
    ctx: &mut SynthContext<'_>,
) -> Result<Option<SignatureSet>, SynthError> {
    if !exported {
        tracing::debug!(method = %method.name, "skipping unexported method");
        return Ok(None);
    }

    let mut walk_ctx = WalkContext {
        deps: &mut *ctx.deps,
        excluded: ctx.excluded,
        method: &method.name,
    };
    let mut numbering = Numbering::default();

    let inputs = walk_params(&method.inputs, Role::Input, &mut numbering, &mut walk_ctx)?;
    let outputs = walk_params(&method.outputs, Role::Output, &mut numbering, &mut walk_ctx)?;

    let implementation = Signature { inputs, outputs };
    let assertion = Signature {
        inputs: participating_only(&implementation.inputs),
        outputs: participating_only(&implementation.outputs),
    };
    let reconstructions = implementation.outputs.iter().map(strategy_for).collect();

    tracing::debug!(
        method = %method.name,
        inputs = implementation.inputs.len(),
        outputs = implementation.outputs.len(),
        recorded = numbering.order,
        "method synthesized"
    );

    Ok(Some(SignatureSet {
        method: method.clone(),
        impl_name: method.name.clone(),
        assert_name: helper_name(ctx.helper_format, &method.name)?,
        implementation,
        assertion,
        reconstructions,
    }))
}

/// Counters shared across one method's inputs and outputs.
#[derive(Debug, Default)]
struct Numbering {
    /// Next payload position.
    order: usize,
    /// Unnamed parameters seen so far.
    unnamed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Input,
    Output,
}

impl Role {
    fn unnamed_prefix(self) -> &'static str {
        match self {
            Role::Input => "_",
            Role::Output => "out",
        }
    }
}

fn walk_params(
    params: &[Param],
    role: Role,
    numbering: &mut Numbering,
    ctx: &mut WalkContext<'_>,
) -> Result<Vec<Variable>, SynthError> {
    params
        .iter()
        .map(|param| {
            let name = match param.declared_name() {
                Some(name) => name.to_string(),
                None => {
                    numbering.unnamed += 1;
                    format!("{}{:03}", role.unnamed_prefix(), numbering.unnamed)
                }
            };
            let mut var = walk(&param.ty, &name, ctx)?;
            // Inputs are asserted; outputs are only rebuilt.
            if role == Role::Input && var.participating && var.comparison == Comparison::Opaque {
                return Err(SynthError::UnsupportedType {
                    method: ctx.method.to_string(),
                    param: name,
                    ty: param.ty.to_string(),
                });
            }
            if var.participating {
                var.order = Some(numbering.order);
                numbering.order += 1;
            }
            Ok(var)
        })
        .collect()
}

fn participating_only(vars: &[Variable]) -> Vec<Variable> {
    vars.iter().filter(|v| v.participating).cloned().collect()
}
