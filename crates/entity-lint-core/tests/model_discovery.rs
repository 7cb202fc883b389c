//! Integration tests for model discovery and cross-document resolution.

use entity_lint_core::{
    Analyzer, AnalyzerError, ClassContext, Config, Finding, Rule, Severity,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Reports every declared class whose ancestors cannot all be resolved.
struct UnresolvedAncestor;

impl Rule for UnresolvedAncestor {
    fn name(&self) -> &'static str {
        "unresolved-ancestor"
    }

    fn code(&self) -> &'static str {
        "TEST100"
    }

    fn check(&self, ctx: &ClassContext<'_>) -> Vec<Finding> {
        ctx.reflection()
            .ancestors
            .iter()
            .filter(|a| !ctx.scope.has_class(a))
            .map(|a| {
                Finding::new(
                    self.code(),
                    self.name(),
                    "test.unresolvedAncestor",
                    Severity::Error,
                    ctx.location(ctx.declaration().line),
                    format!("{} extends unknown {a}", ctx.class_name()),
                )
            })
            .collect()
    }
}

fn write(dir: &Path, relative: &str, content: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

const ENTITIES: &str = r#"{"classes": [
    {"file": "src/Entity/Invoice.php",
     "declaration": {"name": "App\\Entity\\Invoice", "line": 8},
     "reflection": {"name": "App\\Entity\\Invoice", "ancestors": ["App\\Entity\\AbstractDocument"]}},
    {"file": "src/Entity/Refund.php",
     "declaration": {"name": "App\\Entity\\Refund", "line": 6},
     "reflection": {"name": "App\\Entity\\Refund", "ancestors": ["App\\Entity\\Missing"]}}
]}"#;

const BASES: &str = r#"{"classes": [
    {"reflection": {"name": "App\\Entity\\AbstractDocument", "is_abstract": true}}
]}"#;

fn analyzer(root: &Path) -> Analyzer {
    Analyzer::builder()
        .root(root)
        .rule(UnresolvedAncestor)
        .build()
        .unwrap()
}

#[test]
fn classes_resolve_across_documents() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "model/entities.model.json", ENTITIES);
    write(tmp.path(), "model/bases.model.json", BASES);

    let result = analyzer(tmp.path()).analyze().unwrap();

    assert_eq!(result.files_checked, 2);
    assert_eq!(result.classes_checked, 2);
    assert_eq!(result.findings.len(), 1);
    assert!(result.findings[0].message.contains("App\\Entity\\Missing"));
    assert_eq!(
        result.findings[0].location.file,
        PathBuf::from("src/Entity/Refund.php")
    );
}

#[test]
fn vendor_models_and_other_json_are_skipped() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "model/entities.model.json", ENTITIES);
    write(tmp.path(), "vendor/acme/bases.model.json", BASES);
    write(tmp.path(), "composer.json", "{}");

    let result = analyzer(tmp.path()).analyze().unwrap();

    // The base class lives under vendor/, so Invoice's ancestor is unresolved too.
    assert_eq!(result.files_checked, 1);
    assert_eq!(result.findings.len(), 2);
}

#[test]
fn include_patterns_come_from_config() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "build/entities.json", ENTITIES);
    write(tmp.path(), "build/bases.json", BASES);

    let config = Config::parse("[analyzer]\ninclude = [\"build/*.json\"]\n").unwrap();
    let result = Analyzer::builder()
        .root(tmp.path())
        .rule(UnresolvedAncestor)
        .config(config)
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    assert_eq!(result.files_checked, 2);
    assert_eq!(result.findings.len(), 1);
}

#[test]
fn root_file_is_the_only_document() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "entities.model.json", ENTITIES);
    write(tmp.path(), "bases.model.json", BASES);

    let result = analyzer(&file).analyze().unwrap();

    assert_eq!(result.files_checked, 1);
    assert_eq!(result.findings.len(), 2);
}

#[test]
fn broken_documents_are_skipped_unless_strict() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "entities.model.json", ENTITIES);
    write(tmp.path(), "broken.model.json", "{\"classes\": [");

    let lenient = analyzer(tmp.path()).analyze().unwrap();
    assert_eq!(lenient.files_checked, 1);
    assert_eq!(lenient.classes_checked, 2);

    let strict = Analyzer::builder()
        .root(tmp.path())
        .rule(UnresolvedAncestor)
        .fail_on_parse_error(true)
        .build()
        .unwrap();
    assert!(matches!(strict.analyze(), Err(AnalyzerError::Model(_))));
}
