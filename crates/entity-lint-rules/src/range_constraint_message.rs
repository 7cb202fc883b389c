//! Rule flagging `#[Assert\Range]` constraints that combine both bounds with
//! a per-bound message.
//!
//! The validator rejects `minMessage`/`maxMessage` when both `min` and `max`
//! are set and raises a `ConstraintDefinitionException` at runtime; only
//! `notInRangeMessage` applies in that case.
//!
//! Applies to any class, entity or not.

use entity_lint_core::utils::names::VALIDATOR_RANGE;
use entity_lint_core::utils::{best_line, is_spelling_of, option_keys};
use entity_lint_core::{Attribute, ClassContext, ClassKind, Finding, Rule, Severity};

/// Rule code for range-constraint-message.
pub const CODE: &str = "EL007";

/// Rule name for range-constraint-message.
pub const NAME: &str = "range-constraint-message";

/// Identifier for a bound-message conflict.
pub const IDENTIFIER: &str = "validator.range.invalidMessages";

/// Options of one range constraint, from named arguments and positional arrays.
#[derive(Debug, Default, PartialEq, Eq)]
struct RangeOptions {
    min: bool,
    max: bool,
    min_message: bool,
    max_message: bool,
    message_line: Option<usize>,
}

impl RangeOptions {
    fn collect(attr: &Attribute) -> Self {
        let mut options = Self::default();
        for key in option_keys(attr) {
            match key.key {
                "min" => options.min = true,
                "max" => options.max = true,
                "minMessage" => {
                    options.min_message = true;
                    options.message_line = Some(key.line);
                }
                "maxMessage" => {
                    options.max_message = true;
                    options.message_line = Some(key.line);
                }
                _ => {}
            }
        }
        options
    }

    fn is_conflicting(&self) -> bool {
        self.min && self.max && (self.min_message || self.max_message)
    }
}

/// Flags range constraints that set `min`, `max` and a bound message.
#[derive(Debug, Clone)]
pub struct RangeConstraintMessage {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for RangeConstraintMessage {
    fn default() -> Self {
        Self::new()
    }
}

impl RangeConstraintMessage {
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
}

impl Rule for RangeConstraintMessage {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids minMessage/maxMessage on range constraints with both bounds"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ClassContext<'_>) -> Vec<Finding> {
        let decl = ctx.declaration();
        if decl.kind != ClassKind::Class {
            return Vec::new();
        }

        let mut findings = Vec::new();
        for property in &decl.properties {
            for attr in property
                .attributes
                .iter()
                .filter(|a| is_spelling_of(&a.name, &VALIDATOR_RANGE))
            {
                let options = RangeOptions::collect(attr);
                if !options.is_conflicting() {
                    continue;
                }
                findings.push(
                    Finding::new(
                        CODE,
                        NAME,
                        IDENTIFIER,
                        self.severity,
                        ctx.location(best_line([options.message_line, Some(attr.line)])),
                        format!(
                            "Property ${} of class {} sets min/max together with minMessage/maxMessage \
                             on #[Assert\\Range], which raises a ConstraintDefinitionException; use \
                             notInRangeMessage instead.",
                            property.name,
                            ctx.class_name()
                        ),
                    )
                    .with_tip(
                        "When both min and max are set only notInRangeMessage applies; put the \
                         custom bound message there.",
                    ),
                );
            }
        }
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{options, plain, run};
    use entity_lint_core::{Arg, ClassDecl, Expr, Property};

    fn check(kind: ClassKind, attr: Attribute) -> Vec<Finding> {
        let decl = ClassDecl::new("App\\Form\\Quantity", kind, 5)
            .with_property(Property::new("amount", 12).with_attribute(attr));
        run(&RangeConstraintMessage::new(), &decl, &plain("App\\Form\\Quantity"), &[])
    }

    fn range(name: &str, args: Vec<(&str, Expr)>) -> Attribute {
        args.into_iter()
            .fold(Attribute::new(name, 12), |attr, (key, value)| {
                attr.with_arg(Arg::named(key, value))
            })
    }

    #[test]
    fn test_both_bounds_with_message() {
        let findings = check(
            ClassKind::Class,
            range(
                "Assert\\Range",
                vec![
                    ("min", Expr::int(1, 13)),
                    ("max", Expr::int(10, 14)),
                    ("minMessage", Expr::string("too small", 15)),
                    ("maxMessage", Expr::string("too big", 16)),
                ],
            ),
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].identifier, IDENTIFIER);
        assert_eq!(findings[0].location.line, 16);
        assert!(findings[0].message.contains("notInRangeMessage"));
    }

    #[test]
    fn test_positional_array_options() {
        let attr = Attribute::new("Symfony\\Component\\Validator\\Constraints\\Range", 12).with_arg(
            Arg::positional(options(
                12,
                vec![
                    ("min", Expr::int(1, 13)),
                    ("max", Expr::int(10, 13)),
                    ("minMessage", Expr::string("too small", 14)),
                ],
            )),
        );
        let findings = check(ClassKind::Class, attr);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].location.line, 14);
    }

    #[test]
    fn test_single_bound_with_own_message_passes() {
        assert!(check(
            ClassKind::Class,
            range(
                "Range",
                vec![("min", Expr::int(1, 13)), ("minMessage", Expr::string("too small", 14))],
            ),
        )
        .is_empty());
        assert!(check(
            ClassKind::Class,
            range(
                "Assert\\Range",
                vec![
                    ("min", Expr::int(1, 13)),
                    ("max", Expr::int(10, 14)),
                    ("notInRangeMessage", Expr::string("out of range", 15)),
                ],
            ),
        )
        .is_empty());
    }

    #[test]
    fn test_only_literal_spellings_and_classes() {
        let conflicting = vec![
            ("min", Expr::int(1, 13)),
            ("max", Expr::int(10, 13)),
            ("maxMessage", Expr::string("too big", 13)),
        ];
        assert!(check(ClassKind::Class, range("Constraints\\Range", conflicting.clone())).is_empty());
        assert!(check(ClassKind::Trait, range("Assert\\Range", conflicting.clone())).is_empty());
        assert_eq!(check(ClassKind::Class, range("\\Assert\\Range", conflicting)).len(), 1);
    }

    #[test]
    fn test_collect_tracks_last_message_line() {
        let attr = range(
            "Range",
            vec![
                ("maxMessage", Expr::string("too big", 20)),
                ("minMessage", Expr::string("too small", 18)),
            ],
        );
        let options = RangeOptions::collect(&attr);
        assert_eq!(options.message_line, Some(18));
        assert!(!options.is_conflicting());
    }
}
