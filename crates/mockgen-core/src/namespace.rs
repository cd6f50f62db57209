//! Namespaces: the declaring module of a type.
//!
//! A [`Namespace`] is identified by its canonical `::`-separated path
//! (`crate::examples`, `std::sync`, `tokio_util::sync`). The last path
//! segment is the short name, which the code generator uses as the default
//! alias when importing the namespace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical path of a module that declares types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(String);

impl Namespace {
    /// Creates a namespace from its canonical path.
    ///
    /// Surrounding whitespace and leading or trailing `::` separators are
    /// stripped, so `"::crate::examples"` and `"crate::examples"` name the
    /// same namespace.
    pub fn new(path: impl AsRef<str>) -> Self {
        let trimmed = path.as_ref().trim().trim_matches(':');
        Namespace(trimmed.to_string())
    }

    /// The canonical path.
    pub fn path(&self) -> &str {
        &self.0
    }

    /// The last path segment.
    pub fn short_name(&self) -> &str {
        self.0.rsplit("::").next().unwrap_or(&self.0)
    }

    /// Appends a child segment, yielding `self::segment`.
    pub fn child(&self, segment: &str) -> Namespace {
        Namespace(format!("{}::{}", self.0, segment))
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Namespace {
    fn from(path: &str) -> Self {
        Namespace::new(path)
    }
}
