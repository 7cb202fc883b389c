//! # entity-lint-core
//!
//! Core framework for linting ORM entity classes against project conventions.
//!
//! The host parses and resolves source code; this crate describes what it
//! hands over and runs rules against it:
//!
//! - [`ClassDecl`] and friends model class declarations as written
//! - [`ClassReflection`], [`Scope`] and [`ClassClassifier`] carry resolved metadata
//! - [`Rule`] is implemented by every per-class rule
//! - [`Analyzer`] loads [`ModelDocument`]s and orchestrates rule execution
//! - [`Finding`] and [`LintResult`] represent the results
//!
//! ## Example
//!
//! ```ignore
//! use entity_lint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./build/entity-model")
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! for finding in &result.findings {
//!     println!("{finding}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod model;
mod reflection;
mod rule;
mod types;

pub mod ast;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use ast::{Arg, ArrayItem, Attribute, ClassDecl, ClassKind, ConstructorDecl, Expr, Property};
pub use config::{AnalyzerConfig, Config, ConfigError, IgnoreEntry, RuleConfig};
pub use context::{ClassContext, ClassNode};
pub use model::{ClassEntry, ClassIndex, ClassScope, ModelDocument, ModelError};
pub use reflection::{
    ClassClassifier, ClassReflection, ConstructorReflection, ConventionClassifier, Scope,
};
pub use rule::{Rule, RuleBox};
pub use types::{Finding, FindingDiagnostic, LintResult, Location, Severity};
