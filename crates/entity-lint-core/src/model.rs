//! Model documents: the JSON hand-over format between a host and the rules.
//!
//! A host that parses and resolves source code writes one or more model
//! documents:
//!
//! ```json
//! { "classes": [
//!     { "file": "src/Entity/User.php",
//!       "declaration": { "name": "App\\Entity\\User", "kind": "class", "line": 9 },
//!       "reflection": { "name": "App\\Entity\\User", "ancestors": [] } }
//! ] }
//! ```
//!
//! Entries without a `declaration` are reference-only: they can be resolved
//! through the [`Scope`] but are not checked themselves.

use crate::ast::ClassDecl;
use crate::reflection::{ClassReflection, Scope};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a model document.
#[derive(Debug, Error)]
pub enum ModelError {
    /// IO error reading the document.
    #[error("Failed to read model {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The document is not valid JSON or does not match the model shape.
    #[error("Failed to parse model {path}: {source}")]
    Parse {
        /// Path of the offending document (`<inline>` for strings).
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

/// One class in a model document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassEntry {
    /// Source file; takes precedence over `reflection.file`.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Syntax-level declaration. Absent for reference-only entries.
    #[serde(default)]
    pub declaration: Option<ClassDecl>,
    /// Resolved metadata.
    pub reflection: ClassReflection,
}

impl ClassEntry {
    /// Source file of the class, if known.
    #[must_use]
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref().or(self.reflection.file.as_deref())
    }
}

/// A parsed model document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelDocument {
    /// All classes, checked and reference-only.
    #[serde(default)]
    pub classes: Vec<ClassEntry>,
}

impl ModelDocument {
    /// Loads a model document from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path).map_err(|e| ModelError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse_at(&content, path)
    }

    /// Parses a model document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid.
    pub fn parse(content: &str) -> Result<Self, ModelError> {
        Self::parse_at(content, Path::new("<inline>"))
    }

    fn parse_at(content: &str, path: &Path) -> Result<Self, ModelError> {
        let mut doc: Self = serde_json::from_str(content).map_err(|e| ModelError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        for entry in &mut doc.classes {
            if let Some(file) = entry.file.clone() {
                entry.reflection.file = Some(file);
            }
        }
        Ok(doc)
    }

    /// Number of entries that carry a declaration.
    #[must_use]
    pub fn declared_count(&self) -> usize {
        self.classes
            .iter()
            .filter(|c| c.declaration.is_some())
            .count()
    }
}

fn key(name: &str) -> String {
    name.trim_start_matches('\\').to_string()
}

/// Every known class by fully-qualified name.
#[derive(Debug, Default)]
pub struct ClassIndex {
    classes: HashMap<String, ClassReflection>,
}

impl ClassIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index over all entries of the given documents.
    ///
    /// When a class appears twice, the first entry with a declaration wins;
    /// without any declaration the first reference-only entry is kept.
    #[must_use]
    pub fn from_documents<'a>(docs: impl IntoIterator<Item = &'a ModelDocument>) -> Self {
        let mut index = Self::new();
        let mut declared: HashMap<String, bool> = HashMap::new();
        for doc in docs {
            for entry in &doc.classes {
                let name = key(&entry.reflection.name);
                let has_decl = entry.declaration.is_some();
                match declared.get(&name) {
                    Some(true) => continue,
                    Some(false) if !has_decl => continue,
                    _ => {}
                }
                declared.insert(name.clone(), has_decl);
                index.classes.insert(name, entry.reflection.clone());
            }
        }
        index
    }

    /// Registers a reflection, replacing any previous one with the same name.
    pub fn insert(&mut self, reflection: ClassReflection) {
        self.classes.insert(key(&reflection.name), reflection);
    }

    /// Looks a class up by fully-qualified name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ClassReflection> {
        self.classes.get(name.trim_start_matches('\\'))
    }

    /// Number of known classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if no class is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Creates the analysis scope for one class.
    #[must_use]
    pub fn scope_for<'a>(&'a self, current: &'a ClassReflection) -> ClassScope<'a> {
        ClassScope {
            index: self,
            current: Some(current),
        }
    }
}

/// [`Scope`] backed by a [`ClassIndex`].
#[derive(Debug, Clone, Copy)]
pub struct ClassScope<'a> {
    index: &'a ClassIndex,
    current: Option<&'a ClassReflection>,
}

impl<'a> ClassScope<'a> {
    /// A scope with no current class, as for code outside any class.
    #[must_use]
    pub fn detached(index: &'a ClassIndex) -> Self {
        Self {
            index,
            current: None,
        }
    }
}

impl Scope for ClassScope<'_> {
    fn class_reflection(&self) -> Option<&ClassReflection> {
        self.current
    }

    fn get_class(&self, name: &str) -> Option<&ClassReflection> {
        self.index.get(name)
    }
}
