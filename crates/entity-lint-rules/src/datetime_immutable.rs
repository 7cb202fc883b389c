//! Rule requiring immutable date/time column types on entities.
//!
//! Mutable `DateTime` values shared between an entity and calling code can be
//! modified behind the ORM's back. `Types::*_IMMUTABLE` maps columns to
//! `DateTimeImmutable` instead.

use entity_lint_core::utils::names::{self, DBAL_TYPES, ORM_COLUMN};
use entity_lint_core::utils::{best_line, is_spelling_of};
use entity_lint_core::{Attribute, ClassContext, Expr, Finding, Property, Rule, Severity};

/// Rule code for entity-datetime-immutable.
pub const CODE: &str = "EL002";

/// Rule name for entity-datetime-immutable.
pub const NAME: &str = "entity-datetime-immutable";

/// Identifier for a mutable type given as a string.
pub const STRING_TYPE: &str = "doctrine.datetime.immutable.string";

/// Identifier for a mutable type given as a `Types::` constant.
pub const CONST_TYPE: &str = "doctrine.datetime.immutable.const";

/// Mutable type names and constants with their immutable replacement.
const MUTABLE_TO_IMMUTABLE: &[(&str, &str)] = &[
    ("datetime", "Types::DATETIME_IMMUTABLE"),
    ("DATETIME_MUTABLE", "Types::DATETIME_IMMUTABLE"),
    ("date", "Types::DATE_IMMUTABLE"),
    ("DATE_MUTABLE", "Types::DATE_IMMUTABLE"),
    ("time", "Types::TIME_IMMUTABLE"),
    ("TIME_MUTABLE", "Types::TIME_IMMUTABLE"),
    ("datetimetz", "Types::DATETIMETZ_IMMUTABLE"),
    ("DATETIMETZ_MUTABLE", "Types::DATETIMETZ_IMMUTABLE"),
];

fn immutable_for(mutable: &str) -> Option<&'static str> {
    MUTABLE_TO_IMMUTABLE
        .iter()
        .find(|(from, _)| *from == mutable)
        .map(|(_, to)| *to)
}

fn is_types_class(class: &str) -> bool {
    class.ends_with("Types") || names::trim_leading(class) == DBAL_TYPES
}

/// Flags `datetime`, `date`, `time` and `datetimetz` columns.
#[derive(Debug, Clone)]
pub struct EntityDateTimeImmutable {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for EntityDateTimeImmutable {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityDateTimeImmutable {
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

    fn check_column(
        &self,
        ctx: &ClassContext<'_>,
        property: &Property,
        attr: &Attribute,
    ) -> Option<Finding> {
        let type_arg = attr.named_arg("type")?;

        let (identifier, suggested, written, line) = match &type_arg.value {
            Expr::String { value, line } => {
                let suggested = immutable_for(value)?;
                (STRING_TYPE, suggested, format!("\"{value}\""), *line)
            }
            Expr::ClassConst {
                class: Some(class),
                constant: Some(constant),
                line,
            } if is_types_class(class) => {
                let suggested = immutable_for(constant)?;
                (CONST_TYPE, suggested, format!("Types::{constant}"), *line)
            }
            _ => return None,
        };

        Some(Finding::new(
            CODE,
            NAME,
            identifier,
            self.severity,
            ctx.location(best_line([Some(line), Some(type_arg.line), Some(attr.line)])),
            format!(
                "Property ${} of entity {} should use {} instead of the mutable type {} \
                 to prevent time-related bugs.",
                property.name,
                ctx.class_name(),
                suggested,
                written
            ),
        ))
    }
}

impl Rule for EntityDateTimeImmutable {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires immutable date/time column types on entities"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ClassContext<'_>) -> Vec<Finding> {
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
