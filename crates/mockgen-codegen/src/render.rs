//! Code renderer: emits the mock's Rust source from a [`MockModel`].
//!
//! Rendering is plain text substitution. It trusts the synthesizer's
//! signatures and order indices and performs no type checking of its own.
//!
//! Layout of the emitted file:
//! 1. header and one `use` line per dependency,
//! 2. the `<Contract>Mock` struct owning a ledger and a test handle,
//! 3. an inherent impl with the constructor and one expectation helper per
//!    method,
//! 4. a `Drop` impl that reports unconsumed expectations,
//! 5. the contract impl with one replaying override per method.

use std::fmt::{self, Write};

use crate::deps::Qualifier;
use crate::reconstruct::Reconstruction;
use crate::signature::SignatureSet;
use crate::walker::{Comparison, Variable};
use crate::MockModel;

/// Local holding the consumed call inside every override.
const CALL_LOCAL: &str = "__call";

/// Renders the full source file for `model`.
pub fn render(model: &MockModel) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let names = RuntimeNames::new(model);

    write_header(&mut out, model)?;
    write_struct(&mut out, model, &names)?;
    write_inherent_impl(&mut out, model, &names)?;
    write_drop_impl(&mut out, model)?;
    write_contract_impl(&mut out, model, &names)?;

    tracing::debug!(
        contract = %model.contract.name,
        bytes = out.len(),
        "mock rendered"
    );
    Ok(out)
}

/// Qualified spellings of the runtime items generated code refers to.
struct RuntimeNames {
    handle: String,
    ledger: String,
    value: String,
    runtime_prefix: String,
    assert_prefix: String,
}

impl RuntimeNames {
    fn new(model: &MockModel) -> Self {
        let q = &model.qualifier;
        RuntimeNames {
            handle: q.path_to(&model.runtime, "TestHandle"),
            ledger: q.path_to(&model.runtime, "Ledger"),
            value: q.path_to(&model.runtime, "Value"),
            runtime_prefix: prefix(q.qualify(&model.runtime)),
            assert_prefix: prefix(q.qualify(&model.assert_module)),
        }
    }
}

fn prefix(qualifier: String) -> String {
    if qualifier.is_empty() {
        qualifier
    } else {
        format!("{}::", qualifier)
    }
}

// ---------------------------------------------------------------------------
// File sections
// ---------------------------------------------------------------------------

fn write_header(out: &mut String, model: &MockModel) -> fmt::Result {
    writeln!(out, "// Code generated by mockgen. DO NOT EDIT.")?;
    writeln!(out, "// Contract: {}", model.contract.qualified_name())?;
    writeln!(out)?;
    for dep in model.dependencies.iter() {
        writeln!(out, "#[allow(unused_imports)]")?;
        writeln!(out, "{}", dep.use_line())?;
    }
    writeln!(out)
}

fn write_struct(out: &mut String, model: &MockModel, names: &RuntimeNames) -> fmt::Result {
    writeln!(out, "/// Replaying mock for `{}`.", model.contract.name)?;
    writeln!(out, "pub struct {} {{", model.mock_name)?;
    writeln!(out, "    handle: {},", names.handle)?;
    writeln!(out, "    ledger: {},", names.ledger)?;
    writeln!(out, "}}")?;
    writeln!(out)
}

fn write_inherent_impl(out: &mut String, model: &MockModel, names: &RuntimeNames) -> fmt::Result {
    writeln!(out, "impl {} {{", model.mock_name)?;
    writeln!(
        out,
        "    /// Creates a mock reporting to `handle`. Unconsumed expectations fail"
    )?;
    writeln!(out, "    /// the test when the mock is dropped.")?;
    writeln!(out, "    pub fn new(handle: &{}) -> Self {{", names.handle)?;
    writeln!(out, "        {} {{", model.mock_name)?;
    writeln!(out, "            handle: handle.clone(),")?;
    writeln!(out, "            ledger: {}::new(),", names.ledger)?;
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(out, "    pub fn ledger(&self) -> &{} {{", names.ledger)?;
    writeln!(out, "        &self.ledger")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(out, "    pub fn assert_no_calls_left(&self) -> bool {{")?;
    writeln!(out, "        self.ledger.assert_no_calls_left(&self.handle)")?;
    writeln!(out, "    }}")?;

    for set in &model.signatures {
        writeln!(out)?;
        write_helper(out, set, &model.qualifier, names)?;
    }
    writeln!(out, "}}")?;
    writeln!(out)
}

fn write_drop_impl(out: &mut String, model: &MockModel) -> fmt::Result {
    writeln!(out, "impl Drop for {} {{", model.mock_name)?;
    writeln!(out, "    fn drop(&mut self) {{")?;
    writeln!(out, "        if !std::thread::panicking() {{")?;
    writeln!(out, "            self.ledger.assert_no_calls_left(&self.handle);")?;
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;
    writeln!(out)
}

fn write_contract_impl(out: &mut String, model: &MockModel, names: &RuntimeNames) -> fmt::Result {
    let contract_path = model
        .qualifier
        .path_to(&model.contract.namespace, &model.contract.name);

    writeln!(out, "#[allow(unused_variables, unused_mut)]")?;
    writeln!(out, "impl {} for {} {{", contract_path, model.mock_name)?;
    for (i, set) in model.signatures.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        write_override(out, set, &model.qualifier, names)?;
    }
    writeln!(out, "}}")
}

// ---------------------------------------------------------------------------
// Per-method emitters
// ---------------------------------------------------------------------------

/// `pub fn assert_m_call(&self, inputs.., outputs..)` appending one
/// expectation.
fn write_helper(
    out: &mut String,
    set: &SignatureSet,
    q: &Qualifier,
    names: &RuntimeNames,
) -> fmt::Result {
    let params: Vec<String> = set
        .assertion
        .inputs
        .iter()
        .chain(&set.assertion.outputs)
        .map(|v| param_decl(v, q))
        .collect();

    let payload: Vec<String> = set
        .assertion
        .participating()
        .map(|v| format!("Box::new({}) as {}", v.name, names.value))
        .collect();
    let payload = if payload.is_empty() {
        "Vec::new()".to_string()
    } else {
        format!("vec![{}]", payload.join(", "))
    };

    writeln!(out, "    /// Expects a call to `{}`.", set.impl_name)?;
    writeln!(
        out,
        "    pub fn {}({}) {{",
        set.assert_name,
        receiver_and_params("&self", &params)
    )?;
    writeln!(
        out,
        "        self.ledger.append_call(\"{}\", {});",
        set.impl_name, payload
    )?;
    writeln!(out, "    }}")
}

/// The contract method: consume, assert inputs, rebuild outputs.
fn write_override(
    out: &mut String,
    set: &SignatureSet,
    q: &Qualifier,
    names: &RuntimeNames,
) -> fmt::Result {
    let sig = &set.implementation;
    let params: Vec<String> = sig.inputs.iter().map(|v| param_decl(v, q)).collect();

    write!(
        out,
        "    fn {}({})",
        set.impl_name,
        receiver_and_params(set.method.receiver.as_str(), &params)
    )?;
    match sig.outputs.len() {
        0 => writeln!(out, " {{")?,
        1 => writeln!(out, " -> {} {{", q.render(&sig.outputs[0].ty))?,
        _ => {
            let tys: Vec<String> = sig.outputs.iter().map(|v| q.render(&v.ty)).collect();
            writeln!(out, " -> ({}) {{", tys.join(", "))?
        }
    }

    let binding = if sig.has_participating_outputs() {
        format!("let mut {}", CALL_LOCAL)
    } else {
        format!("let {}", CALL_LOCAL)
    };
    writeln!(
        out,
        "        {} = self.ledger.next(&self.handle, \"{}\");",
        binding, set.impl_name
    )?;

    for var in sig.inputs.iter().filter(|v| v.participating) {
        if let Some(order) = var.order {
            writeln!(
                out,
                "        {}{}(&self.handle, {}.get({}), &{}, \"{}\", {}.index());",
                names.assert_prefix,
                assertion_helper(var),
                CALL_LOCAL,
                order,
                var.name,
                var.name,
                CALL_LOCAL
            )?;
        }
    }

    let returns: Vec<String> = sig
        .outputs
        .iter()
        .zip(&set.reconstructions)
        .map(|(var, strategy)| reconstruct_expr(var, strategy, q, names))
        .collect();
    match returns.len() {
        0 => {}
        1 => writeln!(out, "        {}", returns[0])?,
        _ => writeln!(out, "        ({})", returns.join(", "))?,
    }
    writeln!(out, "    }}")
}

/// Opaque inputs never reach the renderer; synthesis rejects them.
fn assertion_helper(var: &Variable) -> &'static str {
    match var.comparison {
        Comparison::Value | Comparison::Opaque => "equal_values",
        Comparison::Identity => "same_object",
        Comparison::Identities => "same_objects",
    }
}

fn reconstruct_expr(
    var: &Variable,
    strategy: &Reconstruction,
    q: &Qualifier,
    names: &RuntimeNames,
) -> String {
    let slot = match var.order {
        Some(order) => format!("{}.take({})", CALL_LOCAL, order),
        None => return "Default::default()".to_string(),
    };
    match strategy {
        Reconstruction::Known { helper } => {
            format!("{}{}({})", names.runtime_prefix, helper, slot)
        }
        Reconstruction::Pointer { pointee } => format!(
            "{}to_pointer::<{}>({})",
            names.runtime_prefix,
            q.render(pointee),
            slot
        ),
        Reconstruction::Direct => format!(
            "{}cast::<{}>({})",
            names.runtime_prefix,
            q.render(&var.ty),
            slot
        ),
        Reconstruction::Default => "Default::default()".to_string(),
    }
}

fn param_decl(var: &Variable, q: &Qualifier) -> String {
    format!("{}: {}", var.name, q.render(&var.ty))
}

fn receiver_and_params(receiver: &str, params: &[String]) -> String {
    if params.is_empty() {
        receiver.to_string()
    } else {
        format!("{}, {}", receiver, params.join(", "))
    }
}
