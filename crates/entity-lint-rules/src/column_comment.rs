//! Rule requiring a non-empty `comment` in the `options` of every ORM column.
//!
//! # Rationale
//!
//! Column comments are written into the database schema and are often the
//! only description of a column that reaches people reading the database.
//!
//! # Configuration
//!
//! - `skip_tests`: Skip classes whose file lies under a `tests` directory (default: true)

use entity_lint_core::utils::names::ORM_COLUMN;
use entity_lint_core::utils::{best_line, find_key, is_spelling_of};
use entity_lint_core::{Attribute, ClassContext, Expr, Finding, Property, Rule, RuleConfig, Severity};

/// Rule code for entity-column-comment.
pub const CODE: &str = "EL001";

/// Rule name for entity-column-comment.
pub const NAME: &str = "entity-column-comment";

/// Identifier for a column without an `options` argument.
pub const MISSING_OPTIONS: &str = "doctrine.column.comment.missingOptions";

/// Identifier for `options` without a usable `comment` key.
pub const MISSING_KEY: &str = "doctrine.column.comment.missingKey";

/// Requires `options: ['comment' => '...']` on every entity column.
#[derive(Debug, Clone)]
pub struct EntityColumnComment {
    /// Skip classes located under a tests directory.
    pub skip_tests: bool,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for EntityColumnComment {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityColumnComment {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            skip_tests: true,
            severity: Severity::Warning,
        }
    }

    /// Sets whether classes under a tests directory are skipped.
    #[must_use]
    pub fn skip_tests(mut self, skip: bool) -> Self {
        self.skip_tests = skip;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn check_column(
        &self,
        ctx: &ClassContext<'_>,
        property: &Property,
        attr: &Attribute,
    ) -> Option<Finding> {
        let Some(options) = attr.named_arg("options") else {
            return Some(
                self.finding(
                    ctx,
                    MISSING_OPTIONS,
                    attr.line,
                    format!(
                        "Property ${} of entity {} should declare options with a comment on #[ORM\\Column] \
                         (e.g. options: ['comment' => 'column description']).",
                        property.name,
                        ctx.class_name()
                    ),
                ),
            );
        };

        if has_comment(&options.value) {
            return None;
        }

        Some(self.finding(
            ctx,
            MISSING_KEY,
            best_line([Some(options.line), Some(attr.line)]),
            format!(
                "Property ${} of entity {} has options but no 'comment' key. Describe the column \
                 (e.g. options: ['comment' => 'column description']).",
                property.name,
                ctx.class_name()
            ),
        ))
    }

    fn finding(
        &self,
        ctx: &ClassContext<'_>,
        identifier: &str,
        line: usize,
        message: String,
    ) -> Finding {
        Finding::new(
            CODE,
            NAME,
            identifier,
            self.severity,
            ctx.location(line),
            message,
        )
    }
}

/// A literal `options` array carries a comment unless the key is missing or
/// its string value is blank. Non-literal values count as present.
fn has_comment(options: &Expr) -> bool {
    options
        .as_array()
        .and_then(|items| find_key(items, "comment"))
        .is_some_and(|item| match &item.value {
            Expr::String { value, .. } => !value.trim().is_empty(),
            _ => true,
        })
}

impl Rule for EntityColumnComment {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires a comment in the options of every entity column"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn configure(&mut self, config: &RuleConfig) {
        self.skip_tests = config.get_bool("skip_tests", self.skip_tests);
    }

    fn check(&self, ctx: &ClassContext<'_>) -> Vec<Finding> {
        if self.skip_tests && ctx.in_test_path() {
            return Vec::new();
        }
        if !ctx.is_entity() {
            return Vec::new();
        }

        ctx.declaration()
            .properties
            .iter()
            .flat_map(|property| {
                property
                    .attributes
                    .iter()
                    .filter(|attr| is_spelling_of(&attr.name, &ORM_COLUMN))
                    .filter_map(move |attr| self.check_column(ctx, property, attr))
            })
            .collect()
    }
}
