//! Type walker: reduces a parameter's type description to a [`Variable`].
//!
//! Composite shapes (`Box<T>`, `[T; N]`, `Vec<T>`) are unwrapped
//! recursively. The variable's kind, participation, and namespace come from
//! the innermost non-composite type, while [`Variable::ty`] keeps the
//! original shape for rendering. Every namespace encountered, including
//! those of generic arguments, is registered in the [`DependencyTable`].
//! Shapes that cannot be recorded (references, function pointers, maps)
//! abort the walk.
//!
//! The [`Comparison`] is derived from the whole shape: contract objects
//! compare by identity, directly or through boxes, sequences, arrays and
//! options.

use std::collections::HashSet;

use mockgen_core::{NamedType, Namespace, TypeDesc};

use crate::deps::DependencyTable;
use crate::error::SynthError;

/// How an override checks a recorded argument against the observed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `PartialEq` on the value.
    Value,
    /// `Arc::ptr_eq`, for a contract object.
    Identity,
    /// Object-by-object identity, for boxes, sequences, arrays and options
    /// of contract objects.
    Identities,
    /// Contract objects inside a shape that has neither value equality nor
    /// an identity comparison, such as `Result<Arc<dyn X>, E>`. Such a
    /// value can be returned but never asserted.
    Opaque,
}

/// Type identities of `Option`, the one generic wrapper whose contract
/// arguments keep an identity comparison.
const OPTION_IDENTITIES: &[&str] = &["Option", "core::option::Option", "std::option::Option"];

/// Derives the comparison for `ty` from every contract it contains.
pub fn comparison_for(ty: &TypeDesc) -> Comparison {
    match ty {
        TypeDesc::Contract(_) => Comparison::Identity,
        TypeDesc::Pointer(inner)
        | TypeDesc::Sequence(inner)
        | TypeDesc::Array { element: inner, .. } => match comparison_for(inner) {
            Comparison::Value => Comparison::Value,
            Comparison::Identity | Comparison::Identities => Comparison::Identities,
            Comparison::Opaque => Comparison::Opaque,
        },
        TypeDesc::Named(named) => {
            let args: Vec<Comparison> = named.args.iter().map(comparison_for).collect();
            if args.iter().all(|c| *c == Comparison::Value) {
                Comparison::Value
            } else if OPTION_IDENTITIES.contains(&named.qualified_name().as_str())
                && args.len() == 1
                && args[0] != Comparison::Opaque
            {
                Comparison::Identities
            } else {
                Comparison::Opaque
            }
        }
        _ => Comparison::Value,
    }
}

/// A walked parameter or result.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    /// Original type, composite shape included.
    pub ty: TypeDesc,
    /// Innermost non-composite type.
    pub kind: TypeDesc,
    /// Whether the value is recorded and asserted.
    pub participating: bool,
    /// Position in the recorded payload; `None` for non-participating
    /// variables.
    pub order: Option<usize>,
    /// Namespace declaring the innermost type.
    pub namespace: Option<Namespace>,
    pub comparison: Comparison,
}

/// State shared by every walk within one synthesis run.
pub struct WalkContext<'a> {
    pub deps: &'a mut DependencyTable,
    /// Qualified names of non-participating types.
    pub excluded: &'a HashSet<String>,
    /// Method being walked, for error reporting.
    pub method: &'a str,
}

impl WalkContext<'_> {
    fn is_excluded(&self, named: &NamedType) -> bool {
        self.excluded.contains(&named.qualified_name())
    }
}

/// Walks `ty` for the parameter `name`.
pub fn walk(
    ty: &TypeDesc,
    name: &str,
    ctx: &mut WalkContext<'_>,
) -> Result<Variable, SynthError> {
    let innermost = walk_kind(ty, name, ctx)?;
    Ok(Variable {
        ty: ty.clone(),
        comparison: comparison_for(ty),
        ..innermost
    })
}

fn walk_kind(
    ty: &TypeDesc,
    name: &str,
    ctx: &mut WalkContext<'_>,
) -> Result<Variable, SynthError> {
    match ty {
        TypeDesc::Basic(_) => Ok(Variable {
            name: name.to_string(),
            ty: ty.clone(),
            kind: ty.clone(),
            participating: true,
            order: None,
            namespace: None,
            comparison: Comparison::Value,
        }),

        TypeDesc::Named(named) | TypeDesc::Contract(named) => {
            for arg in &named.args {
                walk_kind(arg, name, ctx)?;
            }
            ctx.deps.resolve(named.namespace.as_ref());
            Ok(Variable {
                name: name.to_string(),
                ty: ty.clone(),
                kind: ty.clone(),
                participating: !ctx.is_excluded(named),
                order: None,
                namespace: named.namespace.clone(),
                comparison: Comparison::Value,
            })
        }

        TypeDesc::Pointer(inner) | TypeDesc::Sequence(inner) => walk_kind(inner, name, ctx),
        TypeDesc::Array { element, .. } => walk_kind(element, name, ctx),

        TypeDesc::Reference { .. } | TypeDesc::Function { .. } | TypeDesc::Map { .. } => {
            Err(SynthError::UnsupportedType {
                method: ctx.method.to_string(),
                param: name.to_string(),
                ty: ty.to_string(),
            })
        }
    }
}
