//! Rule requiring tests of entities to extend the abstract entity test case.
//!
//! A test class covering an entity (via its covers declaration) must be a
//! subclass of the base class, which sets up the database schema and
//! provides the getter/setter helpers. Anything that cannot be resolved
//! (covered class, base class) means no finding.
//!
//! # Configuration
//!
//! - `base_class`: Required base class
//!   (default: `Tourze\PHPUnitDoctrineEntity\AbstractEntityTestCase`)

use entity_lint_core::utils::best_line;
use entity_lint_core::utils::names;
use entity_lint_core::{ClassContext, ClassKind, Finding, Rule, RuleConfig, Severity};

/// Rule code for entity-test-must-extend.
pub const CODE: &str = "EL008";

/// Rule name for entity-test-must-extend.
pub const NAME: &str = "entity-test-must-extend";

/// Identifier for an entity test with the wrong base class.
pub const IDENTIFIER: &str = "entityTest.mustExtendAbstractEntityTest";

/// Default base class for entity tests.
pub const DEFAULT_BASE_CLASS: &str = "Tourze\\PHPUnitDoctrineEntity\\AbstractEntityTestCase";

/// Requires entity tests to extend the abstract entity test case.
#[derive(Debug, Clone)]
pub struct EntityTestMustExtend {
    /// Fully-qualified name of the required base class.
    pub base_class: String,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for EntityTestMustExtend {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityTestMustExtend {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_class: DEFAULT_BASE_CLASS.to_string(),
            severity: Severity::Error,
        }
    }

    /// Sets the required base class.
    #[must_use]
    pub fn base_class(mut self, class: impl Into<String>) -> Self {
        self.base_class = class.into();
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for EntityTestMustExtend {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires entity tests to extend the abstract entity test case"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn configure(&mut self, config: &RuleConfig) {
        let class = config.get_str("base_class", &self.base_class);
        self.base_class = names::trim_leading(class).to_string();
    }

    fn check(&self, ctx: &ClassContext<'_>) -> Vec<Finding> {
        let Some(test) = ctx.scope.class_reflection() else {
            return Vec::new();
        };
        if !ctx.classifier.is_test_class(&test.name) {
            return Vec::new();
        }
        if ctx.declaration().kind != ClassKind::Class {
            return Vec::new();
        }

        let Some(covered_name) = ctx.classifier.extract_covers_class(test) else {
            return Vec::new();
        };
        let Some(covered) = ctx.scope.get_class(&covered_name) else {
            tracing::debug!("{}: covered class {} not resolvable", NAME, covered_name);
            return Vec::new();
        };
        if !ctx.classifier.is_entity_class(covered) {
            return Vec::new();
        }
        let Some(base) = ctx.scope.get_class(&self.base_class) else {
            tracing::debug!("{}: base class {} not resolvable", NAME, self.base_class);
            return Vec::new();
        };
        if test.is_subclass_of(base) {
            return Vec::new();
        }

        vec![Finding::new(
            CODE,
            NAME,
            IDENTIFIER,
            self.severity,
            ctx.location(best_line([Some(ctx.declaration().line), Some(test.line)])),
            format!(
                "Test class {} tests entity {} but does not extend {}.",
                test.name, covered_name, self.base_class
            ),
        )
        .with_tip(format!(
            "Entity tests must extend {} to use the prepared test environment and helper methods.",
            self.base_class
        ))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{entity, plain, run, run_detached};
    use entity_lint_core::{Arg, Attribute, ClassDecl, ClassReflection, Expr};

    const TEST_CLASS: &str = "App\\Tests\\Entity\\UserTest";

    fn covering(reflection: ClassReflection, covered: &str) -> ClassReflection {
        reflection.with_attribute(
            Attribute::new("PHPUnit\\Framework\\Attributes\\CoversClass", 9)
                .with_arg(Arg::positional(Expr::class_const(covered, "class", 9))),
        )
    }

    fn test_decl() -> ClassDecl {
        ClassDecl::new(TEST_CLASS, ClassKind::Class, 10)
    }

    fn known() -> Vec<ClassReflection> {
        vec![
            entity("App\\Entity\\User"),
            plain("App\\Service\\Mailer"),
            ClassReflection::new(DEFAULT_BASE_CLASS),
        ]
    }

    #[test]
    fn test_entity_test_with_wrong_base() {
        let test = covering(
            ClassReflection::new(TEST_CLASS).with_ancestor("PHPUnit\\Framework\\TestCase"),
            "App\\Entity\\User",
        );
        let findings = run(&EntityTestMustExtend::new(), &test_decl(), &test, &known());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].identifier, IDENTIFIER);
        assert_eq!(findings[0].location.line, 10);
        assert!(findings[0].message.contains(TEST_CLASS));
        assert!(findings[0].message.contains("App\\Entity\\User"));
        assert!(findings[0].message.contains(DEFAULT_BASE_CLASS));
        assert!(findings[0].tip.is_some());
    }

    #[test]
    fn test_transitive_subclass_passes() {
        let test = covering(
            ClassReflection::new(TEST_CLASS)
                .with_ancestor("App\\Tests\\BaseEntityTest")
                .with_ancestor(DEFAULT_BASE_CLASS),
            "App\\Entity\\User",
        );
        assert!(run(&EntityTestMustExtend::new(), &test_decl(), &test, &known()).is_empty());
    }

    #[test]
    fn test_skips_when_anything_is_unresolved() {
        let rule = EntityTestMustExtend::new();
        let base = ClassReflection::new(TEST_CLASS);

        // no covers declaration
        assert!(run(&rule, &test_decl(), &base, &known()).is_empty());
        // covered class unknown
        let unknown = covering(base.clone(), "App\\Entity\\Ghost");
        assert!(run(&rule, &test_decl(), &unknown, &known()).is_empty());
        // covered class not an entity
        let service = covering(base.clone(), "App\\Service\\Mailer");
        assert!(run(&rule, &test_decl(), &service, &known()).is_empty());
        // base class not resolvable
        let user = covering(base, "App\\Entity\\User");
        assert!(run(&rule, &test_decl(), &user, &[entity("App\\Entity\\User")]).is_empty());
        // no current class in scope
        assert!(run_detached(&rule, &test_decl(), &user, &known()).is_empty());
    }

    #[test]
    fn test_non_test_class_ignored() {
        let helper = covering(ClassReflection::new("App\\Tests\\Entity\\UserHelper"), "App\\Entity\\User");
        let decl = ClassDecl::new("App\\Tests\\Entity\\UserHelper", ClassKind::Class, 10);
        assert!(run(&EntityTestMustExtend::new(), &decl, &helper, &known()).is_empty());
    }

    #[test]
    fn test_configured_base_class() {
        let mut rule = EntityTestMustExtend::new();
        let config: entity_lint_core::Config =
            entity_lint_core::Config::parse("[rules.entity-test-must-extend]\nbase_class = \"\\\\App\\\\Tests\\\\EntityTestCase\"\n")
                .unwrap();
        rule.configure(&config.rules[NAME]);
        assert_eq!(rule.base_class, "App\\Tests\\EntityTestCase");

        let test = covering(
            ClassReflection::new(TEST_CLASS).with_ancestor(DEFAULT_BASE_CLASS),
            "App\\Entity\\User",
        );
        let mut classes = known();
        classes.push(ClassReflection::new("App\\Tests\\EntityTestCase"));
        let findings = run(&rule, &test_decl(), &test, &classes);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("App\\Tests\\EntityTestCase"));
    }
}
