//! Context types for rule execution.

use crate::ast::ClassDecl;
use crate::reflection::{ClassClassifier, ClassReflection, Scope};
use crate::types::Location;
use crate::utils::paths::is_test_path;

use std::path::{Path, PathBuf};

/// A fully parsed class: its syntax tree plus resolved reflection.
#[derive(Debug, Clone, Copy)]
pub struct ClassNode<'a> {
    /// Declaration as written.
    pub declaration: &'a ClassDecl,
    /// Resolved metadata.
    pub reflection: &'a ClassReflection,
}

impl<'a> ClassNode<'a> {
    /// Pairs a declaration with its reflection.
    #[must_use]
    pub fn new(declaration: &'a ClassDecl, reflection: &'a ClassReflection) -> Self {
        Self {
            declaration,
            reflection,
        }
    }
}

/// Context provided to rules for one class declaration.
///
/// Bundles the class node, the analysis scope and the classification
/// oracles. Rules read from it and never mutate anything.
#[derive(Clone, Copy)]
pub struct ClassContext<'a> {
    /// The class being analyzed.
    pub node: ClassNode<'a>,
    /// Resolution scope.
    pub scope: &'a dyn Scope,
    /// Entity / test / covers oracles.
    pub classifier: &'a dyn ClassClassifier,
    /// Path reported in findings.
    pub relative_path: &'a Path,
}

impl<'a> ClassContext<'a> {
    /// Creates a new class context.
    #[must_use]
    pub fn new(
        node: ClassNode<'a>,
        scope: &'a dyn Scope,
        classifier: &'a dyn ClassClassifier,
        relative_path: &'a Path,
    ) -> Self {
        Self {
            node,
            scope,
            classifier,
            relative_path,
        }
    }

    /// Computes the path reported for a class file relative to `root`.
    #[must_use]
    pub fn report_path(file: Option<&Path>, root: &Path) -> PathBuf {
        match file {
            Some(path) => path
                .strip_prefix(root)
                .map_or_else(|_| path.to_path_buf(), Path::to_path_buf),
            None => PathBuf::from("<unknown>"),
        }
    }

    /// Declaration as written.
    #[must_use]
    pub fn declaration(&self) -> &'a ClassDecl {
        self.node.declaration
    }

    /// Resolved metadata of the class.
    #[must_use]
    pub fn reflection(&self) -> &'a ClassReflection {
        self.node.reflection
    }

    /// Fully-qualified name of the class.
    #[must_use]
    pub fn class_name(&self) -> &'a str {
        &self.node.reflection.name
    }

    /// Asks the entity oracle about this class.
    #[must_use]
    pub fn is_entity(&self) -> bool {
        self.classifier.is_entity_class(self.node.reflection)
    }

    /// Whether the class file sits under a test directory.
    #[must_use]
    pub fn in_test_path(&self) -> bool {
        self.node
            .reflection
            .file_name()
            .is_some_and(is_test_path)
    }

    /// Builds a location in this class's file.
    #[must_use]
    pub fn location(&self, line: usize) -> Location {
        Location::new(self.relative_path.to_path_buf(), line)
    }
}

impl std::fmt::Debug for ClassContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassContext")
            .field("class", &self.node.reflection.name)
            .field("relative_path", &self.relative_path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_path() {
        assert_eq!(
            ClassContext::report_path(Some(Path::new("/app/src/Entity/User.php")), Path::new("/app")),
            PathBuf::from("src/Entity/User.php")
        );
        assert_eq!(
            ClassContext::report_path(Some(Path::new("/elsewhere/User.php")), Path::new("/app")),
            PathBuf::from("/elsewhere/User.php")
        );
        assert_eq!(
            ClassContext::report_path(None, Path::new("/app")),
            PathBuf::from("<unknown>")
        );
    }
}
