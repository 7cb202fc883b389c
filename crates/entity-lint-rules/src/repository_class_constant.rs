//! Rule requiring `repositoryClass: Foo::class` on entity attributes.
//!
//! A string class name survives renames silently; a class constant is
//! checked by the language and by refactoring tools.

use entity_lint_core::utils::names::ORM_ENTITY;
use entity_lint_core::utils::{best_line, is_spelling_of};
use entity_lint_core::{Arg, Attribute, ClassContext, Expr, Finding, Rule, Severity};

/// Rule code for entity-repository-class-constant.
pub const CODE: &str = "EL004";

/// Rule name for entity-repository-class-constant.
pub const NAME: &str = "entity-repository-class-constant";

/// Identifier for every repository-class violation.
pub const IDENTIFIER: &str = "doctrine.entity.repository.classConst";

/// Requires `ClassName::class` syntax for `repositoryClass`.
#[derive(Debug, Clone)]
pub struct EntityRepositoryClassConstant {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for EntityRepositoryClassConstant {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRepositoryClassConstant {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn check_arg(&self, ctx: &ClassContext<'_>, attr: &Attribute, arg: &Arg) -> Option<Finding> {
        let class = ctx.class_name();
        let message = match &arg.value {
            Expr::String { value, .. } => format!(
                "Entity {class} should reference repositoryClass with ClassName::class syntax \
                 instead of the string \"{value}\"."
            ),
            Expr::ClassConst { constant, .. } => {
                if constant.as_deref() == Some("class") {
                    return None;
                }
                format!("Entity {class} must use the ::class constant in the repositoryClass argument.")
            }
            _ => format!("Entity {class} must use ClassName::class syntax in the repositoryClass argument."),
        };

        Some(Finding::new(
            CODE,
            NAME,
            IDENTIFIER,
            self.severity,
            ctx.location(best_line([Some(arg.value.line()), Some(arg.line), Some(attr.line)])),
            message,
        ))
    }
}

impl Rule for EntityRepositoryClassConstant {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires ClassName::class syntax for repositoryClass"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ClassContext<'_>) -> Vec<Finding> {
        if !ctx.is_entity() {
            return Vec::new();
        }

        ctx.declaration()
            .attributes
            .iter()
            .filter(|attr| is_spelling_of(&attr.name, &ORM_ENTITY))
            .filter_map(|attr| {
                attr.named_args("repositoryClass")
                    .find_map(|arg| self.check_arg(ctx, attr, arg))
            })
            .collect()
    }
}
