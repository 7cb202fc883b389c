//! Rule trait for defining lint rules.

use crate::config::RuleConfig;
use crate::context::ClassContext;
use crate::types::{Finding, Severity};

/// A per-class lint rule.
///
/// Rules are stateless visitors: the analyzer calls [`Rule::check`] once per
/// class-like declaration and collects whatever findings come back. A rule
/// must never fail; shapes it does not understand mean "no finding".
///
/// # Example
///
/// ```ignore
/// use entity_lint_core::{ClassContext, Finding, Rule};
///
/// pub struct NoAbstractEntities;
///
/// impl Rule for NoAbstractEntities {
///     fn name(&self) -> &'static str { "no-abstract-entities" }
///     fn code(&self) -> &'static str { "EL100" }
///
///     fn check(&self, ctx: &ClassContext<'_>) -> Vec<Finding> {
///         if ctx.is_entity() && ctx.reflection().is_abstract {
///             return vec![Finding::new(
///                 self.code(),
///                 self.name(),
///                 "doctrine.entity.abstract",
///                 self.default_severity(),
///                 ctx.location(ctx.declaration().line),
///                 "Entities must be concrete",
///             )];
///         }
///         Vec::new()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "entity-column-comment").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "EL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for findings from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Applies rule-specific options from `[rules.<name>]`.
    ///
    /// Unknown keys and mistyped values are ignored.
    fn configure(&mut self, _config: &RuleConfig) {}

    /// Checks a single class declaration and returns any findings.
    fn check(&self, ctx: &ClassContext<'_>) -> Vec<Finding>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
