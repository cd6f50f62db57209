//! Contract definitions: the traits the code generator mocks.
//!
//! A [`ContractDef`] is a named, ordered list of [`ContractMethod`]s. Each
//! method carries its receiver, its input parameters, and its ordered
//! results. Parameters may be unnamed; the code generator synthesizes
//! positional names for those.

use serde::{Deserialize, Serialize};

use crate::namespace::Namespace;
use crate::types::TypeDesc;

/// How a method borrows its receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Receiver {
    /// `&self`
    #[default]
    Shared,
    /// `&mut self`
    Exclusive,
}

impl Receiver {
    pub fn as_str(self) -> &'static str {
        match self {
            Receiver::Shared => "&self",
            Receiver::Exclusive => "&mut self",
        }
    }
}

/// A single parameter or result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Declared name. Results are usually unnamed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub ty: TypeDesc,
}

impl Param {
    pub fn named(name: impl Into<String>, ty: TypeDesc) -> Self {
        Param {
            name: Some(name.into()),
            ty,
        }
    }

    pub fn unnamed(ty: TypeDesc) -> Self {
        Param { name: None, ty }
    }

    /// The declared name, treating an empty string as absent.
    pub fn declared_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}

/// One method of a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractMethod {
    pub name: String,
    #[serde(default)]
    pub receiver: Receiver,
    /// Input parameters in declaration order, excluding the receiver.
    #[serde(default)]
    pub inputs: Vec<Param>,
    /// Results in order. Several results form a tuple.
    #[serde(default)]
    pub outputs: Vec<Param>,
    /// Whether the provider considers the method mockable. Methods with a
    /// provided default body are typically not exported.
    #[serde(default = "default_exported")]
    pub exported: bool,
}

fn default_exported() -> bool {
    true
}

impl ContractMethod {
    /// Creates an exported `&self` method with no parameters or results.
    pub fn new(name: impl Into<String>) -> Self {
        ContractMethod {
            name: name.into(),
            receiver: Receiver::Shared,
            inputs: Vec::new(),
            outputs: Vec::new(),
            exported: true,
        }
    }

    pub fn input(mut self, param: Param) -> Self {
        self.inputs.push(param);
        self
    }

    pub fn output(mut self, param: Param) -> Self {
        self.outputs.push(param);
        self
    }

    pub fn receiver(mut self, receiver: Receiver) -> Self {
        self.receiver = receiver;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.exported = false;
        self
    }
}

/// A contract: a trait with an ordered set of methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractDef {
    pub name: String,
    /// Declaring namespace of the trait itself.
    pub namespace: Namespace,
    pub methods: Vec<ContractMethod>,
}

impl ContractDef {
    pub fn new(name: impl Into<String>, namespace: Namespace) -> Self {
        ContractDef {
            name: name.into(),
            namespace,
            methods: Vec::new(),
        }
    }

    pub fn method(mut self, method: ContractMethod) -> Self {
        self.methods.push(method);
        self
    }

    /// `namespace::Name`.
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.namespace.path(), self.name)
    }
}
