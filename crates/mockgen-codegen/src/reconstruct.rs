//! Reconstruction strategies: how an override turns a recorded value back
//! into its concrete result type.
//!
//! Strategies are picked from an ordered rule table. Exact type identities
//! are checked first, then structural kinds; the first matching rule wins
//! and [`Reconstruction::Direct`] is the fallback.

use mockgen_core::TypeDesc;

use crate::walker::Variable;

/// Strategy for one result.
#[derive(Debug, Clone, PartialEq)]
pub enum Reconstruction {
    /// A runtime helper dedicated to a well-known type, such as
    /// `to_result`.
    Known { helper: &'static str },
    /// `to_pointer::<T>`, rebuilding a `Box<T>`.
    Pointer { pointee: TypeDesc },
    /// `cast::<T>`, a plain downcast to the rendered type.
    Direct,
    /// The result is not recorded; the override returns
    /// `Default::default()`.
    Default,
}

/// Well-known type identities and their runtime helpers.
const KNOWN_HELPERS: &[(&str, &str)] = &[
    ("Result", "to_result"),
    ("core::result::Result", "to_result"),
    ("std::result::Result", "to_result"),
    ("Option", "to_option"),
    ("core::option::Option", "to_option"),
    ("std::option::Option", "to_option"),
];

struct Rule {
    matches: fn(&TypeDesc) -> bool,
    build: fn(&TypeDesc) -> Reconstruction,
}

const RULES: &[Rule] = &[
    Rule {
        matches: has_known_identity,
        build: known_helper,
    },
    Rule {
        matches: is_pointer,
        build: pointer_helper,
    },
];

fn known_lookup(ty: &TypeDesc) -> Option<&'static str> {
    match ty {
        TypeDesc::Named(_) => {
            let identity = ty.identity()?;
            KNOWN_HELPERS
                .iter()
                .find(|(name, _)| *name == identity)
                .map(|(_, helper)| *helper)
        }
        _ => None,
    }
}

fn has_known_identity(ty: &TypeDesc) -> bool {
    known_lookup(ty).is_some()
}

fn known_helper(ty: &TypeDesc) -> Reconstruction {
    match known_lookup(ty) {
        Some(helper) => Reconstruction::Known { helper },
        None => Reconstruction::Direct,
    }
}

fn is_pointer(ty: &TypeDesc) -> bool {
    matches!(ty, TypeDesc::Pointer(_))
}

fn pointer_helper(ty: &TypeDesc) -> Reconstruction {
    match ty {
        TypeDesc::Pointer(pointee) => Reconstruction::Pointer {
            pointee: (**pointee).clone(),
        },
        _ => Reconstruction::Direct,
    }
}

/// Picks the strategy for an output variable.
pub fn strategy_for(output: &Variable) -> Reconstruction {
    if !output.participating {
        return Reconstruction::Default;
    }
    RULES
        .iter()
        .find(|rule| (rule.matches)(&output.ty))
        .map(|rule| (rule.build)(&output.ty))
        .unwrap_or(Reconstruction::Direct)
}
