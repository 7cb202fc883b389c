//! Utility functions for rule implementations.

pub mod arguments;
pub mod names;
pub mod paths;

// Re-export commonly used utilities for rule implementations
#[doc(inline)]
pub use arguments::{best_line, find_key, option_keys, ArgShape, OptionKey};
#[doc(inline)]
pub use names::{is_spelling_of, matches, short_name, Concept};
#[doc(inline)]
pub use paths::{is_fixture_path, is_test_path};
