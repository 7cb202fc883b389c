//! Syntax-level model of class declarations handed over by the host.
//!
//! The host parses source files; this module only describes the shape the
//! rules read. Everything here is plain data with `serde` support so a host
//! can hand declarations over as JSON.

use serde::{Deserialize, Serialize};

/// Kind of a class-like declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    /// A regular class.
    #[default]
    Class,
    /// An enumerated type.
    Enum,
    /// An interface.
    Interface,
    /// A trait.
    Trait,
}

/// A class-like declaration as written in source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassDecl {
    /// Fully-qualified class name.
    pub name: String,
    /// Declaration kind.
    #[serde(default)]
    pub kind: ClassKind,
    /// Start line of the declaration.
    #[serde(default)]
    pub line: usize,
    /// Class-level attributes.
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    /// Property declarations.
    #[serde(default)]
    pub properties: Vec<Property>,
    /// Constructor signature as written, if declared.
    #[serde(default)]
    pub constructor: Option<ConstructorDecl>,
}

impl ClassDecl {
    /// Creates an empty class declaration.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ClassKind, line: usize) -> Self {
        Self {
            name: name.into(),
            kind,
            line,
            ..Self::default()
        }
    }

    /// Adds a class-level attribute.
    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Adds a property.
    #[must_use]
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// Sets the declared constructor.
    #[must_use]
    pub fn with_constructor(mut self, constructor: ConstructorDecl) -> Self {
        self.constructor = Some(constructor);
        self
    }
}

/// A property declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Property name without the `$` sigil.
    pub name: String,
    /// Start line of the property statement (attributes included).
    #[serde(default)]
    pub line: usize,
    /// Attributes attached to the property, flattened across groups.
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Property {
    /// Creates a property without attributes.
    #[must_use]
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            line,
            attributes: Vec::new(),
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }
}

/// A constructor signature as written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstructorDecl {
    /// Start line of the constructor.
    #[serde(default)]
    pub line: usize,
    /// Declared parameter names.
    #[serde(default)]
    pub parameters: Vec<String>,
}

/// An attribute (annotation) attached to a class or property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Referenced name as written (`Doctrine\ORM\Mapping\Column`, `ORM\Column`, `Column`).
    pub name: String,
    /// Start line.
    #[serde(default)]
    pub line: usize,
    /// Ordered arguments.
    #[serde(default)]
    pub args: Vec<Arg>,
}

impl Attribute {
    /// Creates an attribute without arguments.
    #[must_use]
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            line,
            args: Vec::new(),
        }
    }

    /// Adds an argument.
    #[must_use]
    pub fn with_arg(mut self, arg: Arg) -> Self {
        self.args.push(arg);
        self
    }

    /// Finds the first named argument called `name`.
    #[must_use]
    pub fn named_arg(&self, name: &str) -> Option<&Arg> {
        self.args.iter().find(|a| a.name.as_deref() == Some(name))
    }

    /// Iterates over all named arguments called `name`.
    pub fn named_args<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Arg> + 'a {
        self.args
            .iter()
            .filter(move |a| a.name.as_deref() == Some(name))
    }

    /// Returns the value of the named argument `name` if it is a string literal.
    #[must_use]
    pub fn named_string(&self, name: &str) -> Option<&str> {
        self.named_arg(name).and_then(|a| a.value.as_str())
    }
}

/// An attribute argument, positional or named.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arg {
    /// Argument name for named arguments.
    #[serde(default)]
    pub name: Option<String>,
    /// Argument value.
    pub value: Expr,
    /// Start line of the argument.
    #[serde(default)]
    pub line: usize,
}

impl Arg {
    /// Creates a named argument; its line is the value's line.
    #[must_use]
    pub fn named(name: impl Into<String>, value: Expr) -> Self {
        let line = value.line();
        Self {
            name: Some(name.into()),
            value,
            line,
        }
    }

    /// Creates a positional argument; its line is the value's line.
    #[must_use]
    pub fn positional(value: Expr) -> Self {
        let line = value.line();
        Self {
            name: None,
            value,
            line,
        }
    }

    /// Returns true for named arguments.
    #[must_use]
    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }
}

/// An argument value expression.
///
/// Only the forms the rules interpret are modeled; everything else is
/// [`Expr::Other`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    /// A string literal.
    String {
        /// Literal value.
        value: String,
        /// Start line.
        #[serde(default)]
        line: usize,
    },
    /// An integer literal.
    Int {
        /// Literal value.
        value: i64,
        /// Start line.
        #[serde(default)]
        line: usize,
    },
    /// A class-constant reference such as `Types::DATETIME_MUTABLE` or `Foo::class`.
    ClassConst {
        /// Class name as written; `None` for a dynamic class expression.
        #[serde(default)]
        class: Option<String>,
        /// Constant name; `None` for a dynamic constant expression.
        #[serde(default)]
        constant: Option<String>,
        /// Start line.
        #[serde(default)]
        line: usize,
    },
    /// A literal array.
    Array {
        /// Items in declaration order.
        #[serde(default)]
        items: Vec<ArrayItem>,
        /// Start line.
        #[serde(default)]
        line: usize,
    },
    /// Any other expression form.
    Other {
        /// Source text when the host provides it.
        #[serde(default)]
        text: Option<String>,
        /// Start line.
        #[serde(default)]
        line: usize,
    },
}

impl Expr {
    /// Creates a string literal.
    #[must_use]
    pub fn string(value: impl Into<String>, line: usize) -> Self {
        Self::String {
            value: value.into(),
            line,
        }
    }

    /// Creates an integer literal.
    #[must_use]
    pub fn int(value: i64, line: usize) -> Self {
        Self::Int { value, line }
    }

    /// Creates a class-constant reference with static class and constant names.
    #[must_use]
    pub fn class_const(class: impl Into<String>, constant: impl Into<String>, line: usize) -> Self {
        Self::ClassConst {
            class: Some(class.into()),
            constant: Some(constant.into()),
            line,
        }
    }

    /// Creates a literal array.
    #[must_use]
    pub fn array(items: Vec<ArrayItem>, line: usize) -> Self {
        Self::Array { items, line }
    }

    /// Creates an opaque expression.
    #[must_use]
    pub fn other(text: impl Into<String>, line: usize) -> Self {
        Self::Other {
            text: Some(text.into()),
            line,
        }
    }

    /// Start line of the expression.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::String { line, .. }
            | Self::Int { line, .. }
            | Self::ClassConst { line, .. }
            | Self::Array { line, .. }
            | Self::Other { line, .. } => *line,
        }
    }

    /// Returns the literal value of a string expression.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Returns the items of a literal array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[ArrayItem]> {
        match self {
            Self::Array { items, .. } => Some(items),
            _ => None,
        }
    }
}

/// One item of a literal array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayItem {
    /// Key expression, `None` for list-style items.
    #[serde(default)]
    pub key: Option<Expr>,
    /// Value expression.
    pub value: Expr,
    /// Start line of the item.
    #[serde(default)]
    pub line: usize,
}

impl ArrayItem {
    /// Creates a `'key' => value` item keyed by a string literal on the value's line.
    #[must_use]
    pub fn keyed(key: impl Into<String>, value: Expr) -> Self {
        let line = value.line();
        Self {
            key: Some(Expr::string(key, line)),
            value,
            line,
        }
    }

    /// Returns the key when it is a string literal.
    #[must_use]
    pub fn string_key(&self) -> Option<&str> {
        self.key.as_ref().and_then(Expr::as_str)
    }
}
