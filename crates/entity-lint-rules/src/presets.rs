//! Rule presets for common configurations.

use crate::{
    EntityColumnComment, EntityDateTimeImmutable, EntityParameterlessConstructor,
    EntityRepositoryClassConstant, EntityTestMustExtend, IndexColumnMutuallyExclusive,
    IndexNamePrefix, RangeConstraintMessage,
};
use entity_lint_core::{RuleBox, Severity};

/// Preset configurations for entity-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Every rule with its default severity.
    Recommended,
    /// Every rule, warnings promoted to errors.
    Strict,
    /// Minimal rules for gradual adoption.
    Minimal,
}

impl Preset {
    /// Parses a preset name (`recommended`, `strict`, `minimal`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "recommended" => Some(Self::Recommended),
            "strict" => Some(Self::Strict),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }

    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Strict => strict_rules(),
            Self::Minimal => minimal_rules(),
        }
    }
}

/// Returns the recommended set of rules: all eight, default severities.
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    all_rules()
}

/// Returns the strict set of rules.
///
/// Same rules as [`recommended_rules`], with `entity-column-comment` and
/// `index-name-prefix` raised to errors and tests no longer skipped.
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    vec![
        Box::new(
            EntityColumnComment::new()
                .skip_tests(false)
                .severity(Severity::Error),
        ),
        Box::new(EntityDateTimeImmutable::new()),
        Box::new(EntityParameterlessConstructor::new()),
        Box::new(EntityRepositoryClassConstant::new()),
        Box::new(IndexColumnMutuallyExclusive::new()),
        Box::new(IndexNamePrefix::new().severity(Severity::Error)),
        Box::new(RangeConstraintMessage::new()),
        Box::new(EntityTestMustExtend::new()),
    ]
}

/// Returns the minimal set of rules.
///
/// For gradual adoption, only includes:
/// - `entity-column-comment` (EL001)
/// - `entity-datetime-immutable` (EL002)
/// - `entity-repository-class-constant` (EL004)
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    vec![
        Box::new(EntityColumnComment::new()),
        Box::new(EntityDateTimeImmutable::new()),
        Box::new(EntityRepositoryClassConstant::new()),
    ]
}

/// Returns all available rules with default settings, in code order.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(EntityColumnComment::new()),
        Box::new(EntityDateTimeImmutable::new()),
        Box::new(EntityParameterlessConstructor::new()),
        Box::new(EntityRepositoryClassConstant::new()),
        Box::new(IndexColumnMutuallyExclusive::new()),
        Box::new(IndexNamePrefix::new()),
        Box::new(RangeConstraintMessage::new()),
        Box::new(EntityTestMustExtend::new()),
    ]
}

/// Looks a rule up by name (`entity-column-comment`) or code (`EL001`).
#[must_use]
pub fn rule_by_name(name: &str) -> Option<RuleBox> {
    all_rules()
        .into_iter()
        .find(|r| r.name() == name || r.code().eq_ignore_ascii_case(name))
}
