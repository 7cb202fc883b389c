//! # entity-lint
//!
//! Convention linter for ORM entity declarations.
//!
//! This is the facade crate: it re-exports the core types, the built-in
//! rules, and provides the [`check!`] macro for `cargo test` integration.
//!
//! ## Quick Start: `cargo test` Integration
//!
//! ```toml
//! [dev-dependencies]
//! entity-lint = "0.1"
//! ```
//!
//! ```rust,ignore
//! // tests/entities.rs
//! entity_lint::check!();
//! ```
//!
//! The generated test loads every model document under the workspace (or
//! `[analyzer] root` from `entity-lint.toml`) and fails with a report when
//! findings at or above `fail_on` exist.
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use entity_lint::Analyzer;
//! use entity_lint::rules::Preset;
//!
//! let mut builder = Analyzer::builder().root("./var/model");
//! for rule in Preset::Recommended.rules() {
//!     builder = builder.rule_box(rule);
//! }
//! let result = builder.build()?.analyze()?;
//! ```

#![forbid(unsafe_code)]

pub use entity_lint_core::*;

/// Built-in rules and presets.
pub mod rules {
    pub use entity_lint_rules::*;
}

mod runner;

#[doc(hidden)]
pub mod __internal {
    pub use crate::runner::{run_check, CheckOptions};
}

/// Generates a `#[test]` that lints the project's model documents.
///
/// Accepts optional `preset`, `config` (path relative to the workspace
/// root) and `fail_on` arguments:
///
/// ```rust,ignore
/// entity_lint::check!(preset = "strict", fail_on = "warning");
/// ```
#[macro_export]
macro_rules! check {
    ($($key:ident = $value:literal),* $(,)?) => {
        #[test]
        fn entity_lint_check() {
            #[allow(unused_mut)]
            let mut options = $crate::__internal::CheckOptions::default();
            $( options.set(stringify!($key), $value); )*
            $crate::__internal::run_check(&options);
        }
    };
}
