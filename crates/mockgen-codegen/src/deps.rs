//! Namespace dependencies of the generated source.
//!
//! [`DependencyTable`] interns every namespace the walked types refer to,
//! keyed by canonical path, and assigns each one an alias for its `use`
//! line. [`Qualifier`] is the frozen view the renderer uses to spell type
//! names relative to the destination namespace.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use mockgen_core::{Namespace, TypeDesc};

/// One imported namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Canonical path.
    pub path: String,
    /// Name the generated code refers to it by.
    pub alias: String,
}

impl Dependency {
    /// `use` line for this dependency, without the trailing newline.
    pub fn use_line(&self) -> String {
        let last = self.path.rsplit("::").next().unwrap_or(&self.path);
        if last == self.alias {
            format!("use {};", self.path)
        } else {
            format!("use {} as {};", self.path, self.alias)
        }
    }
}

/// Resolve-or-reuse table of namespace dependencies, in first-reference
/// order.
#[derive(Debug, Clone, Default)]
pub struct DependencyTable {
    entries: IndexMap<String, Dependency>,
    aliases: HashSet<String>,
    suppressed: HashSet<String>,
}

/// Names an alias must not take: path keywords, the standard crates, and
/// the prelude items generated code spells unqualified.
const RESERVED_SEGMENTS: &[&str] = &[
    "crate", "self", "super", "Self", "std", "core", "alloc", "Box", "Vec", "String", "Option",
    "Result", "Default", "Drop", "Send", "Sync",
];

impl DependencyTable {
    pub fn new() -> Self {
        DependencyTable::default()
    }

    /// Returns the dependency for `namespace`, creating it on first use.
    ///
    /// `None` in, `None` out. Suppressed namespaces are never registered.
    pub fn resolve(&mut self, namespace: Option<&Namespace>) -> Option<&Dependency> {
        let namespace = namespace?;
        let path = namespace.path();
        if self.suppressed.contains(path) {
            return None;
        }
        if !self.entries.contains_key(path) {
            let alias = self.unique_alias(namespace.short_name());
            tracing::debug!(path, alias = %alias, "dependency registered");
            self.aliases.insert(alias.clone());
            self.entries.insert(
                path.to_string(),
                Dependency {
                    path: path.to_string(),
                    alias,
                },
            );
        }
        self.entries.get(path)
    }

    fn unique_alias(&self, short_name: &str) -> String {
        let base = if RESERVED_SEGMENTS.contains(&short_name) {
            format!("{}_ns", short_name)
        } else {
            short_name.to_string()
        };
        if !self.aliases.contains(&base) {
            return base;
        }
        (2..)
            .map(|n| format!("{}{}", base, n))
            .find(|candidate| !self.aliases.contains(candidate))
            .unwrap_or(base)
    }

    /// Removes `namespace` and keeps it out of the table from now on.
    ///
    /// Returns the removed entry, if there was one.
    pub fn suppress(&mut self, namespace: &Namespace) -> Option<Dependency> {
        self.suppressed.insert(namespace.path().to_string());
        let removed = self.entries.shift_remove(namespace.path());
        if let Some(dep) = &removed {
            self.aliases.remove(&dep.alias);
            tracing::debug!(path = %dep.path, "dependency suppressed");
        }
        removed
    }

    pub fn is_suppressed(&self, namespace: &Namespace) -> bool {
        self.suppressed.contains(namespace.path())
    }

    pub fn get(&self, path: &str) -> Option<&Dependency> {
        self.entries.get(path)
    }

    /// Alias for `namespace`, if it has been registered.
    pub fn alias(&self, namespace: &Namespace) -> Option<&str> {
        self.entries.get(namespace.path()).map(|d| d.alias.as_str())
    }

    /// Dependencies in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Dependency> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freezes the table into a qualifier relative to `home`.
    pub fn qualifier(&self, home: Option<&Namespace>) -> Qualifier {
        Qualifier {
            home: home.map(|ns| ns.path().to_string()),
            aliases: self
                .entries
                .values()
                .map(|d| (d.path.clone(), d.alias.clone()))
                .collect(),
            suppressed: self.suppressed.clone(),
        }
    }
}

/// Spells namespaces for generated code.
///
/// The home namespace and suppressed namespaces get an empty prefix (the
/// name stays bare). Registered namespaces get their alias. Anything else
/// falls back to its full canonical path.
#[derive(Debug, Clone, Default)]
pub struct Qualifier {
    home: Option<String>,
    aliases: HashMap<String, String>,
    suppressed: HashSet<String>,
}

impl Qualifier {
    pub fn qualify(&self, namespace: &Namespace) -> String {
        let path = namespace.path();
        if self.home.as_deref() == Some(path) || self.suppressed.contains(path) {
            return String::new();
        }
        match self.aliases.get(path) {
            Some(alias) => alias.clone(),
            None => path.to_string(),
        }
    }

    /// Renders `ty` with every namespace qualified.
    pub fn render(&self, ty: &TypeDesc) -> String {
        ty.render(&|ns| self.qualify(ns))
    }

    /// Prefixes `item` (a name declared in `namespace`) with its qualifier.
    pub fn path_to(&self, namespace: &Namespace, item: &str) -> String {
        let prefix = self.qualify(namespace);
        if prefix.is_empty() {
            item.to_string()
        } else {
            format!("{}::{}", prefix, item)
        }
    }
}
