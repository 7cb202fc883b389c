//! Resolved class metadata and the host-side seams rules consume.
//!
//! [`ClassReflection`] is what the host knows about a class after symbol
//! resolution. [`Scope`] resolves classes by name, and [`ClassClassifier`]
//! wraps the external oracles (entity / test / covers). None of these is
//! implemented by the rules themselves.

use crate::ast::{Attribute, Expr};
use crate::utils::names::{self, Concept, COVERS_CLASS, ORM_ENTITY};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Reflected constructor metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorReflection {
    /// Number of declared parameters.
    pub parameters: usize,
    /// Start line, when the host could determine it.
    #[serde(default)]
    pub line: Option<usize>,
}

/// Resolved metadata about a class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassReflection {
    /// Fully-qualified class name.
    pub name: String,
    /// Source file, if the class was loaded from one.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Start line of the class declaration.
    #[serde(default)]
    pub line: usize,
    /// Whether the class is abstract.
    #[serde(default)]
    pub is_abstract: bool,
    /// Fully-qualified names of all ancestors (parents and interfaces, transitively).
    #[serde(default)]
    pub ancestors: Vec<String>,
    /// Reflected constructor, if the class has one.
    #[serde(default)]
    pub constructor: Option<ConstructorReflection>,
    /// Class attributes with fully resolved names.
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl ClassReflection {
    /// Creates a reflection with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the source file.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Adds an ancestor.
    #[must_use]
    pub fn with_ancestor(mut self, ancestor: impl Into<String>) -> Self {
        self.ancestors.push(ancestor.into());
        self
    }

    /// Sets the reflected constructor.
    #[must_use]
    pub fn with_constructor(mut self, parameters: usize, line: Option<usize>) -> Self {
        self.constructor = Some(ConstructorReflection { parameters, line });
        self
    }

    /// Adds a resolved attribute.
    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Returns the source file path, if any.
    #[must_use]
    pub fn file_name(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Checks whether this class transitively extends or implements `ancestor`.
    #[must_use]
    pub fn is_subclass_of(&self, ancestor: &ClassReflection) -> bool {
        let target = ancestor.name.trim_start_matches('\\');
        self.ancestors
            .iter()
            .any(|a| a.trim_start_matches('\\') == target)
    }

    /// Checks whether any resolved attribute denotes `concept`.
    #[must_use]
    pub fn has_attribute(&self, concept: &Concept<'_>) -> bool {
        self.attributes
            .iter()
            .any(|a| names::matches(&a.name, concept))
    }
}

/// Analysis scope: the class under analysis plus on-demand resolution of others.
pub trait Scope: Send + Sync {
    /// Reflection of the class currently being analyzed, if resolved.
    fn class_reflection(&self) -> Option<&ClassReflection>;

    /// Resolves a class by fully-qualified name.
    fn get_class(&self, name: &str) -> Option<&ClassReflection>;

    /// Checks whether a class can be resolved.
    fn has_class(&self, name: &str) -> bool {
        self.get_class(name).is_some()
    }
}

/// External classification oracles.
///
/// Hosts with their own notion of "entity" or "test class" implement this
/// trait; [`ConventionClassifier`] is the default.
pub trait ClassClassifier: Send + Sync {
    /// Is this class mapped to a persistent storage record?
    fn is_entity_class(&self, class: &ClassReflection) -> bool;

    /// Is the class with this fully-qualified name a test case?
    fn is_test_class(&self, name: &str) -> bool;

    /// Fully-qualified name of the class a test declares coverage for.
    fn extract_covers_class(&self, class: &ClassReflection) -> Option<String>;
}

/// Default classifier based on naming and attribute conventions.
///
/// - entity: the class carries the ORM entity attribute;
/// - test: the short class name ends in `Test`;
/// - covers: first argument of a `CoversClass` attribute, given as
///   `Foo::class` or as a string.
#[derive(Debug, Clone, Default)]
pub struct ConventionClassifier;

impl ClassClassifier for ConventionClassifier {
    fn is_entity_class(&self, class: &ClassReflection) -> bool {
        class.has_attribute(&ORM_ENTITY)
    }

    fn is_test_class(&self, name: &str) -> bool {
        names::short_name(name).ends_with("Test")
    }

    fn extract_covers_class(&self, class: &ClassReflection) -> Option<String> {
        let attr = class
            .attributes
            .iter()
            .find(|a| names::matches(&a.name, &COVERS_CLASS))?;
        let arg = attr
            .named_arg("className")
            .or_else(|| attr.args.iter().find(|a| !a.is_named()))?;

        match &arg.value {
            Expr::ClassConst {
                class: Some(class),
                constant: Some(constant),
                ..
            } if constant == "class" => Some(class.trim_start_matches('\\').to_string()),
            Expr::String { value, .. } => Some(value.trim_start_matches('\\').to_string()),
            _ => None,
        }
    }
}
