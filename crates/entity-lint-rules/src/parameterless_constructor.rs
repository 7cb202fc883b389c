//! Rule forbidding constructor parameters on entities.
//!
//! The ORM instantiates entities without calling the constructor with
//! arguments, and fixtures/factories rely on `new Entity()`. Data is set
//! through setters instead.
//!
//! Test classes and classes under a tests directory are skipped, except
//! for fixtures (`tests/Fixtures`, `tests/fixtures`).

use entity_lint_core::utils::{best_line, is_fixture_path, is_test_path};
use entity_lint_core::{ClassContext, ClassKind, Finding, Rule, Severity};

/// Rule code for entity-parameterless-constructor.
pub const CODE: &str = "EL003";

/// Rule name for entity-parameterless-constructor.
pub const NAME: &str = "entity-parameterless-constructor";

/// Identifier for entity constructors declaring parameters.
pub const IDENTIFIER: &str = "doctrine.entity.ctor.noParams";

/// Requires entity constructors to take no parameters.
#[derive(Debug, Clone)]
pub struct EntityParameterlessConstructor {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for EntityParameterlessConstructor {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityParameterlessConstructor {
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

    fn is_skipped_test(ctx: &ClassContext<'_>) -> bool {
        let file = ctx.reflection().file_name();
        if file.is_some_and(is_fixture_path) {
            return false;
        }
        ctx.classifier.is_test_class(ctx.class_name()) || file.is_some_and(is_test_path)
    }
}

impl Rule for EntityParameterlessConstructor {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids constructor parameters on entities"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ClassContext<'_>) -> Vec<Finding> {
        if Self::is_skipped_test(ctx) {
            return Vec::new();
        }

        let decl = ctx.declaration();
        if !matches!(decl.kind, ClassKind::Class | ClassKind::Enum) {
            return Vec::new();
        }
        if !ctx.is_entity() {
            return Vec::new();
        }

        let reflected = ctx.reflection().constructor.as_ref();
        let parameters = reflected
            .map(|c| c.parameters)
            .or_else(|| decl.constructor.as_ref().map(|c| c.parameters.len()))
            .unwrap_or(0);
        if parameters == 0 {
            return Vec::new();
        }

        let line = best_line([
            reflected.and_then(|c| c.line),
            decl.constructor.as_ref().map(|c| c.line),
            Some(decl.line),
            Some(ctx.reflection().line),
        ]);

        vec![Finding::new(
            CODE,
            NAME,
            IDENTIFIER,
            self.severity,
            ctx.location(line),
            format!(
                "Constructor of entity {} must not take parameters. Remove them and set entity \
                 data through setter methods.",
                ctx.class_name()
            ),
        )]
    }
}
