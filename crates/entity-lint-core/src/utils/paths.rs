//! Path conventions for test and fixture sources.

use std::path::{Component, Path};

fn normal_components(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

/// Checks whether a file lives under a `tests` directory.
#[must_use]
pub fn is_test_path(path: &Path) -> bool {
    normal_components(path)
        .iter()
        .any(|c| c == "tests")
}

/// Checks whether a file lives under `tests/Fixtures` or `tests/fixtures`.
///
/// Fixture classes are sample inputs for the analyzer's own tests and stay
/// checkable even though they sit below a test directory.
#[must_use]
pub fn is_fixture_path(path: &Path) -> bool {
    normal_components(path)
        .windows(2)
        .any(|w| w[0] == "tests" && (w[1] == "Fixtures" || w[1] == "fixtures"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_test_path() {
        assert!(is_test_path(Path::new("/app/tests/Entity/UserTest.php")));
        assert!(!is_test_path(Path::new("packages/foo/test/Bar.php")));
        assert!(!is_test_path(Path::new("/app/src/Entity/User.php")));
        assert!(!is_test_path(Path::new("/app/src/Testing/Helper.php")));
    }

    #[test]
    fn test_detect_fixture_path() {
        assert!(is_fixture_path(Path::new("/app/tests/Fixtures/Entities.php")));
        assert!(is_fixture_path(Path::new("/app/tests/fixtures/Entities.php")));
        assert!(!is_fixture_path(Path::new("/app/tests/Entity/UserTest.php")));
        assert!(!is_fixture_path(Path::new("/app/src/Fixtures/Loader.php")));
    }
}
