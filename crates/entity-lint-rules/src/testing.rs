//! Fixtures shared by the rule unit tests.

use entity_lint_core::{
    Arg, ArrayItem, Attribute, ClassContext, ClassDecl, ClassIndex, ClassNode, ClassReflection,
    ClassScope, ConventionClassifier, Expr, Finding, Rule,
};
use std::path::Path;

pub(crate) const ROOT: &str = "/app";

/// Reflection of an entity class living in `src/Entity`.
pub(crate) fn entity(name: &str) -> ClassReflection {
    ClassReflection::new(name)
        .with_file(format!("{ROOT}/src/Entity/{}.php", name.rsplit('\\').next().unwrap_or(name)))
        .with_attribute(Attribute::new("Doctrine\\ORM\\Mapping\\Entity", 8))
}

/// Reflection of a plain class living in `src`.
pub(crate) fn plain(name: &str) -> ClassReflection {
    ClassReflection::new(name).with_file(format!(
        "{ROOT}/src/{}.php",
        name.rsplit('\\').next().unwrap_or(name)
    ))
}

/// `#[ORM\Column(...)]` with the given named arguments, all on `line`.
pub(crate) fn column(line: usize, args: Vec<(&str, Expr)>) -> Attribute {
    args.into_iter()
        .fold(Attribute::new("ORM\\Column", line), |attr, (name, value)| {
            attr.with_arg(Arg::named(name, value))
        })
}

/// A literal array of string-keyed items.
pub(crate) fn options(line: usize, items: Vec<(&str, Expr)>) -> Expr {
    Expr::array(
        items
            .into_iter()
            .map(|(key, value)| ArrayItem::keyed(key, value))
            .collect(),
        line,
    )
}

/// Runs `rule` on one class; `known` are additional resolvable classes.
pub(crate) fn run(
    rule: &dyn Rule,
    decl: &ClassDecl,
    reflection: &ClassReflection,
    known: &[ClassReflection],
) -> Vec<Finding> {
    let index = index_of(reflection, known);
    let scope = index.scope_for(reflection);
    check_with(rule, decl, reflection, &scope)
}

/// Runs `rule` with a scope that has no current class.
pub(crate) fn run_detached(
    rule: &dyn Rule,
    decl: &ClassDecl,
    reflection: &ClassReflection,
    known: &[ClassReflection],
) -> Vec<Finding> {
    let index = index_of(reflection, known);
    let scope = ClassScope::detached(&index);
    check_with(rule, decl, reflection, &scope)
}

fn index_of(reflection: &ClassReflection, known: &[ClassReflection]) -> ClassIndex {
    let mut index = ClassIndex::new();
    index.insert(reflection.clone());
    for class in known {
        index.insert(class.clone());
    }
    index
}

fn check_with(
    rule: &dyn Rule,
    decl: &ClassDecl,
    reflection: &ClassReflection,
    scope: &ClassScope<'_>,
) -> Vec<Finding> {
    let path = ClassContext::report_path(reflection.file_name(), Path::new(ROOT));
    let ctx = ClassContext::new(
        ClassNode::new(decl, reflection),
        scope,
        &ConventionClassifier,
        &path,
    );
    rule.check(&ctx)
}
