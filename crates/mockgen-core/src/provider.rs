//! Type providers: where contract definitions come from.
//!
//! The code generator only consumes [`TypeProvider`]. [`DescriptionFile`]
//! is the provider shipped with the CLI: a JSON document listing the
//! declarations of one namespace, loaded from a file or from the
//! `mockgen.json` inside a directory.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::contract::{ContractDef, ContractMethod};
use crate::error::CoreError;
use crate::namespace::Namespace;

/// File name looked up when a provider is loaded from a directory.
pub const DESCRIPTION_FILE_NAME: &str = "mockgen.json";

/// A top-level declaration known to a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// A trait that can be mocked.
    Contract(ContractDef),
    /// Any other declaration (struct, enum, alias).
    Type { name: String, kind: String },
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Contract(def) => &def.name,
            Declaration::Type { name, .. } => name,
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            Declaration::Contract(_) => "contract",
            Declaration::Type { kind, .. } => kind,
        }
    }
}

/// Source of contract definitions and their visibility rules.
pub trait TypeProvider {
    /// Looks up a declaration by its unqualified name.
    fn lookup(&self, name: &str) -> Option<&Declaration>;

    /// Whether a method may be mocked. Unexported methods are skipped.
    fn is_exported(&self, method: &ContractMethod) -> bool {
        method.exported
    }

    /// Resolves `name` to a contract.
    ///
    /// Returns [`CoreError::DeclarationNotFound`] if nothing is declared
    /// under that name and [`CoreError::NotAContract`] if the declaration
    /// is some other kind of type.
    fn contract(&self, name: &str) -> Result<&ContractDef, CoreError> {
        match self.lookup(name) {
            Some(Declaration::Contract(def)) => Ok(def),
            Some(other) => Err(CoreError::NotAContract {
                name: name.to_string(),
                kind: other.kind().to_string(),
            }),
            None => Err(CoreError::DeclarationNotFound {
                name: name.to_string(),
            }),
        }
    }
}

/// JSON-backed provider for a single namespace.
#[derive(Debug, Clone)]
pub struct DescriptionFile {
    namespace: Namespace,
    declarations: IndexMap<String, Declaration>,
}

#[derive(Debug, Deserialize)]
struct RawDescription {
    namespace: Namespace,
    #[serde(default)]
    declarations: Vec<RawDeclaration>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum RawDeclaration {
    Contract {
        name: String,
        #[serde(default)]
        namespace: Option<Namespace>,
        #[serde(default)]
        methods: Vec<ContractMethod>,
    },
    Type {
        name: String,
        #[serde(default = "default_type_kind")]
        type_kind: String,
    },
}

fn default_type_kind() -> String {
    "type".to_string()
}

impl DescriptionFile {
    /// Creates an empty description for `namespace`.
    pub fn new(namespace: Namespace) -> Self {
        DescriptionFile {
            namespace,
            declarations: IndexMap::new(),
        }
    }

    /// Parses a JSON description.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let raw: RawDescription = serde_json::from_str(json)?;
        let mut file = DescriptionFile::new(raw.namespace);
        for decl in raw.declarations {
            let decl = match decl {
                RawDeclaration::Contract {
                    name,
                    namespace,
                    methods,
                } => Declaration::Contract(ContractDef {
                    name,
                    namespace: namespace.unwrap_or_else(|| file.namespace.clone()),
                    methods,
                }),
                RawDeclaration::Type { name, type_kind } => Declaration::Type {
                    name,
                    kind: type_kind,
                },
            };
            file.insert(decl)?;
        }
        Ok(file)
    }

    /// Loads a description from a file, or from [`DESCRIPTION_FILE_NAME`]
    /// inside a directory.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let file_path = if path.is_dir() {
            path.join(DESCRIPTION_FILE_NAME)
        } else {
            path.to_path_buf()
        };
        let json = fs::read_to_string(&file_path).map_err(|source| CoreError::Io {
            path: file_path.clone(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Adds a declaration.
    ///
    /// Returns [`CoreError::DuplicateDeclaration`] if the name is taken.
    pub fn insert(&mut self, decl: Declaration) -> Result<(), CoreError> {
        let name = decl.name().to_string();
        if self.declarations.contains_key(&name) {
            return Err(CoreError::DuplicateDeclaration { name });
        }
        self.declarations.insert(name, decl);
        Ok(())
    }

    /// The namespace the description was written for.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Declarations in file order.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.values()
    }
}

impl TypeProvider for DescriptionFile {
    fn lookup(&self, name: &str) -> Option<&Declaration> {
        self.declarations.get(name)
    }
}
