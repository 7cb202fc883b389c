//! Rule requiring index names to start with the table name.

use entity_lint_core::utils::is_spelling_of;
use entity_lint_core::utils::names::{ORM_INDEX, ORM_TABLE};
use entity_lint_core::{ClassContext, ClassKind, Finding, Rule, Severity};

/// Rule code for index-name-prefix.
pub const CODE: &str = "EL006";

/// Rule name for index-name-prefix.
pub const NAME: &str = "index-name-prefix";

/// Identifier for an unprefixed index name.
pub const IDENTIFIER: &str = "doctrine.indexName.prefix";

/// Requires `#[ORM\Index(name: ...)]` to be prefixed with `<table>_`.
///
/// Entities without a literal `#[ORM\Table(name: ...)]` are skipped.
#[derive(Debug, Clone)]
pub struct IndexNamePrefix {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for IndexNamePrefix {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexNamePrefix {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for IndexNamePrefix {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires index names to be prefixed with the table name"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ClassContext<'_>) -> Vec<Finding> {
        let Some(reflection) = ctx.scope.class_reflection() else {
            return Vec::new();
        };
        if !ctx.classifier.is_entity_class(reflection) {
            return Vec::new();
        }

        let decl = ctx.declaration();
        if decl.kind != ClassKind::Class {
            return Vec::new();
        }

        let Some(table) = decl
            .attributes
            .iter()
            .find(|a| is_spelling_of(&a.name, &ORM_TABLE))
            .and_then(|a| a.named_string("name"))
        else {
            tracing::debug!("{}: no table name on {}", NAME, reflection.name);
            return Vec::new();
        };
        let prefix = format!("{table}_");

        decl.attributes
            .iter()
            .filter(|a| is_spelling_of(&a.name, &ORM_INDEX))
            .filter_map(|attr| {
                let index = attr.named_string("name")?;
                if index.starts_with(&prefix) {
                    return None;
                }
                Some(
                    Finding::new(
                        CODE,
                        NAME,
                        IDENTIFIER,
                        self.severity,
                        ctx.location(attr.line),
                        format!(
                            "Index \"{index}\" in entity \"{}\" must be prefixed with the table name \"{prefix}\".",
                            reflection.name
                        ),
                    )
                    .with_tip(format!("Rename the index to something like \"{table}_{index}\".")),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{entity, plain, run, run_detached};
    use entity_lint_core::{Arg, Attribute, ClassDecl, Expr};

    fn named(name: &str, line: usize, value: &str) -> Attribute {
        Attribute::new(name, line).with_arg(Arg::named("name", Expr::string(value, line)))
    }

    fn product(kind: ClassKind) -> ClassDecl {
        ClassDecl::new("App\\Entity\\Product", kind, 12)
            .with_attribute(Attribute::new("ORM\\Entity", 7))
            .with_attribute(named("ORM\\Table", 8, "shop_product"))
            .with_attribute(named("ORM\\Index", 9, "idx_sku"))
            .with_attribute(named("Index", 10, "shop_product_idx_name"))
    }

    #[test]
    fn test_unprefixed_index() {
        let findings = run(&IndexNamePrefix::new(), &product(ClassKind::Class), &entity("App\\Entity\\Product"), &[]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].identifier, IDENTIFIER);
        assert_eq!(findings[0].location.line, 9);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert!(findings[0].message.contains("\"shop_product_\""));
        assert_eq!(
            findings[0].tip.as_deref(),
            Some("Rename the index to something like \"shop_product_idx_sku\".")
        );
    }

    #[test]
    fn test_without_table_name_skipped() {
        let decl = ClassDecl::new("App\\Entity\\Product", ClassKind::Class, 12)
            .with_attribute(Attribute::new("ORM\\Table", 8))
            .with_attribute(named("ORM\\Table", 9, "shop_product"))
            .with_attribute(named("ORM\\Index", 10, "idx_sku"));
        assert!(run(&IndexNamePrefix::new(), &decl, &entity("App\\Entity\\Product"), &[]).is_empty());
    }

    #[test]
    fn test_index_without_literal_name_skipped() {
        let decl = ClassDecl::new("App\\Entity\\Product", ClassKind::Class, 12)
            .with_attribute(named("ORM\\Table", 8, "shop_product"))
            .with_attribute(
                Attribute::new("ORM\\Index", 9).with_arg(Arg::named("name", Expr::other("self::IDX", 9))),
            );
        assert!(run(&IndexNamePrefix::new(), &decl, &entity("App\\Entity\\Product"), &[]).is_empty());
    }

    #[test]
    fn test_requires_current_class_entity_and_class_kind() {
        let reflection = entity("App\\Entity\\Product");
        assert!(run_detached(&IndexNamePrefix::new(), &product(ClassKind::Class), &reflection, &[]).is_empty());
        assert!(run(&IndexNamePrefix::new(), &product(ClassKind::Trait), &reflection, &[]).is_empty());
        assert!(run(&IndexNamePrefix::new(), &product(ClassKind::Class), &plain("App\\Entity\\Product"), &[]).is_empty());
    }
}
