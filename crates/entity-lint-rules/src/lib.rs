//! # entity-lint-rules
//!
//! Built-in rules for ORM entity classes.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | EL001 | `entity-column-comment` | Requires `options: ['comment' => ...]` on every column |
//! | EL002 | `entity-datetime-immutable` | Requires `Types::*_IMMUTABLE` for date/time columns |
//! | EL003 | `entity-parameterless-constructor` | Forbids constructor parameters on entities |
//! | EL004 | `entity-repository-class-constant` | Requires `repositoryClass: Foo::class` |
//! | EL005 | `index-column-mutually-exclusive` | Forbids `#[IndexColumn]` on association properties |
//! | EL006 | `index-name-prefix` | Requires index names prefixed with `<table>_` |
//! | EL007 | `range-constraint-message` | Forbids bound messages on two-sided range constraints |
//! | EL008 | `entity-test-must-extend` | Requires entity tests to extend the abstract entity test case |
//!
//! ## Usage
//!
//! ```ignore
//! use entity_lint_core::Analyzer;
//! use entity_lint_rules::{EntityColumnComment, IndexNamePrefix};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./build/entity-model")
//!     .rule(EntityColumnComment::new())
//!     .rule(IndexNamePrefix::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod column_comment;
mod datetime_immutable;
mod entity_test_must_extend;
mod index_column_exclusive;
mod index_name_prefix;
mod parameterless_constructor;
mod presets;
mod range_constraint_message;
mod repository_class_constant;

#[cfg(test)]
mod testing;

pub use column_comment::EntityColumnComment;
pub use datetime_immutable::EntityDateTimeImmutable;
pub use entity_test_must_extend::EntityTestMustExtend;
pub use index_column_exclusive::IndexColumnMutuallyExclusive;
pub use index_name_prefix::IndexNamePrefix;
pub use parameterless_constructor::EntityParameterlessConstructor;
pub use presets::{
    all_rules, minimal_rules, recommended_rules, rule_by_name, strict_rules, Preset,
};
pub use range_constraint_message::RangeConstraintMessage;
pub use repository_class_constant::EntityRepositoryClassConstant;

/// Finding identifiers, one constant per distinct finding kind.
pub mod identifiers {
    pub use crate::column_comment::{
        MISSING_KEY as COLUMN_COMMENT_MISSING_KEY, MISSING_OPTIONS as COLUMN_COMMENT_MISSING_OPTIONS,
    };
    pub use crate::datetime_immutable::{
        CONST_TYPE as DATETIME_CONST, STRING_TYPE as DATETIME_STRING,
    };
    pub use crate::entity_test_must_extend::IDENTIFIER as ENTITY_TEST_MUST_EXTEND;
    pub use crate::index_column_exclusive::IDENTIFIER as INDEX_COLUMN_EXCLUSIVE;
    pub use crate::index_name_prefix::IDENTIFIER as INDEX_NAME_PREFIX;
    pub use crate::parameterless_constructor::IDENTIFIER as CTOR_NO_PARAMS;
    pub use crate::range_constraint_message::IDENTIFIER as RANGE_INVALID_MESSAGES;
    pub use crate::repository_class_constant::IDENTIFIER as REPOSITORY_CLASS_CONST;
}

/// Re-export core types for convenience.
pub use entity_lint_core::{Finding, Rule, Severity};
