//! Type descriptions for contract parameters and results.
//!
//! A [`TypeDesc`] is what the type provider hands to the code generator for
//! each parameter: basic kinds, named (nominal) types, nested contracts,
//! and the composite shapes built from them (boxes, fixed arrays, vectors).
//! Some shapes ([`TypeDesc::Reference`], [`TypeDesc::Function`],
//! [`TypeDesc::Map`]) can be described but cannot be mocked; the code
//! generator rejects them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::namespace::Namespace;

/// A structural description of a type, as resolved by the type provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDesc {
    /// Primitive kinds with no owning namespace.
    Basic(BasicKind),

    /// Nominal type (struct, enum, alias), possibly with concrete generic
    /// arguments.
    Named(NamedType),

    /// A nested contract, passed around as a shared trait object.
    Contract(NamedType),

    /// Owned indirection: `Box<T>`.
    Pointer(Box<TypeDesc>),

    /// Fixed-size array: `[T; N]`.
    Array { element: Box<TypeDesc>, length: usize },

    /// Dynamic sequence: `Vec<T>`.
    Sequence(Box<TypeDesc>),

    /// Borrowed reference: `&T` / `&mut T`.
    Reference { pointee: Box<TypeDesc>, mutable: bool },

    /// Function pointer: `fn(A, B) -> R`.
    Function {
        params: Vec<TypeDesc>,
        output: Box<TypeDesc>,
    },

    /// Associative container: `HashMap<K, V>`.
    Map { key: Box<TypeDesc>, value: Box<TypeDesc> },
}

/// Primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasicKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    Char,
    String,
    Unit,
}

/// A nominal type reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedType {
    /// Type name without its namespace.
    pub name: String,
    /// Declaring namespace. `None` for prelude types (`Option`, `Result`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<Namespace>,
    /// Concrete generic arguments, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<TypeDesc>,
}

impl BasicKind {
    /// Rust spelling of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            BasicKind::Bool => "bool",
            BasicKind::I8 => "i8",
            BasicKind::I16 => "i16",
            BasicKind::I32 => "i32",
            BasicKind::I64 => "i64",
            BasicKind::I128 => "i128",
            BasicKind::Isize => "isize",
            BasicKind::U8 => "u8",
            BasicKind::U16 => "u16",
            BasicKind::U32 => "u32",
            BasicKind::U64 => "u64",
            BasicKind::U128 => "u128",
            BasicKind::Usize => "usize",
            BasicKind::F32 => "f32",
            BasicKind::F64 => "f64",
            BasicKind::Char => "char",
            BasicKind::String => "String",
            BasicKind::Unit => "()",
        }
    }
}

impl NamedType {
    pub fn new(name: impl Into<String>, namespace: Option<Namespace>) -> Self {
        NamedType {
            name: name.into(),
            namespace,
            args: Vec::new(),
        }
    }

    /// Adds concrete generic arguments.
    pub fn with_args(mut self, args: Vec<TypeDesc>) -> Self {
        self.args = args;
        self
    }

    /// `namespace::name`, or the bare name for prelude types.
    ///
    /// Generic arguments are not part of the qualified name; exclusion
    /// lists and the reconstruction table match on this.
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}::{}", ns.path(), self.name),
            None => self.name.clone(),
        }
    }
}

impl TypeDesc {
    pub fn basic(kind: BasicKind) -> Self {
        TypeDesc::Basic(kind)
    }

    pub fn named(name: impl Into<String>, namespace: Option<Namespace>) -> Self {
        TypeDesc::Named(NamedType::new(name, namespace))
    }

    pub fn contract(name: impl Into<String>, namespace: Option<Namespace>) -> Self {
        TypeDesc::Contract(NamedType::new(name, namespace))
    }

    pub fn pointer(pointee: TypeDesc) -> Self {
        TypeDesc::Pointer(Box::new(pointee))
    }

    pub fn sequence(element: TypeDesc) -> Self {
        TypeDesc::Sequence(Box::new(element))
    }

    pub fn array(element: TypeDesc, length: usize) -> Self {
        TypeDesc::Array {
            element: Box::new(element),
            length,
        }
    }

    /// Identity used for table lookups: the qualified name of nominal
    /// types, the spelling of basic kinds, and `None` for structural shapes.
    pub fn identity(&self) -> Option<String> {
        match self {
            TypeDesc::Basic(kind) => Some(kind.as_str().to_string()),
            TypeDesc::Named(named) | TypeDesc::Contract(named) => Some(named.qualified_name()),
            _ => None,
        }
    }

    /// Renders the type as Rust source, asking `qualify` for the prefix of
    /// every namespace encountered. An empty prefix leaves the name bare.
    pub fn render(&self, qualify: &dyn Fn(&Namespace) -> String) -> String {
        match self {
            TypeDesc::Basic(kind) => kind.as_str().to_string(),
            TypeDesc::Named(named) => render_named(named, qualify),
            TypeDesc::Contract(named) => format!(
                "std::sync::Arc<dyn {} + Send + Sync>",
                render_named(named, qualify)
            ),
            TypeDesc::Pointer(pointee) => format!("Box<{}>", pointee.render(qualify)),
            TypeDesc::Array { element, length } => {
                format!("[{}; {}]", element.render(qualify), length)
            }
            TypeDesc::Sequence(element) => format!("Vec<{}>", element.render(qualify)),
            TypeDesc::Reference { pointee, mutable } => {
                let prefix = if *mutable { "&mut " } else { "&" };
                format!("{}{}", prefix, pointee.render(qualify))
            }
            TypeDesc::Function { params, output } => {
                let params: Vec<String> = params.iter().map(|p| p.render(qualify)).collect();
                format!("fn({}) -> {}", params.join(", "), output.render(qualify))
            }
            TypeDesc::Map { key, value } => format!(
                "std::collections::HashMap<{}, {}>",
                key.render(qualify),
                value.render(qualify)
            ),
        }
    }
}

fn render_named(named: &NamedType, qualify: &dyn Fn(&Namespace) -> String) -> String {
    let mut out = String::new();
    if let Some(ns) = &named.namespace {
        let prefix = qualify(ns);
        if !prefix.is_empty() {
            out.push_str(&prefix);
            out.push_str("::");
        }
    }
    out.push_str(&named.name);
    if !named.args.is_empty() {
        let args: Vec<String> = named.args.iter().map(|a| a.render(qualify)).collect();
        out.push('<');
        out.push_str(&args.join(", "));
        out.push('>');
    }
    out
}

/// Renders with fully qualified paths.
impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&|ns| ns.path().to_string()))
    }
}
