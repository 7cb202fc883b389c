//! Core analyzer for orchestrating lint execution.

use crate::ast::ClassDecl;
use crate::config::{Config, ConfigError};
use crate::context::{ClassContext, ClassNode};
use crate::model::{ClassEntry, ClassIndex, ModelDocument, ModelError};
use crate::reflection::{ClassClassifier, ConventionClassifier};
use crate::rule::{Rule, RuleBox};
use crate::types::{Finding, LintResult};

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A model document could not be loaded.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The worker pool could not be created.
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    include_patterns: Vec<String>,
    config: Option<Config>,
    classifier: Option<Box<dyn ClassClassifier>>,
    parallelism: Option<usize>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory (or single model file) to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Adds a glob pattern selecting model documents.
    #[must_use]
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include_patterns.push(pattern.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Replaces the default [`ConventionClassifier`].
    #[must_use]
    pub fn classifier<C: ClassClassifier + 'static>(mut self, classifier: C) -> Self {
        self.classifier = Some(Box::new(classifier));
        self
    }

    /// Bounds the number of worker threads (default: rayon's global pool).
    #[must_use]
    pub fn parallelism(mut self, threads: usize) -> Self {
        self.parallelism = Some(threads);
        self
    }

    /// Sets whether to fail on unreadable model documents (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// Rule options from `[rules.<name>]` are applied here.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let root = self
            .root
            .unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());

        let mut include_patterns = self.include_patterns;
        if include_patterns.is_empty() {
            include_patterns.extend(config.analyzer.include.iter().cloned());
        }
        if include_patterns.is_empty() {
            include_patterns.push("**/*.model.json".to_string());
        }

        let mut rules = self.rules;
        for rule in &mut rules {
            if let Some(rule_config) = config.rules.get(rule.name()) {
                rule.configure(rule_config);
            }
        }

        Ok(Analyzer {
            root,
            rules,
            exclude_patterns,
            include_patterns,
            classifier: self
                .classifier
                .unwrap_or_else(|| Box::new(ConventionClassifier)),
            parallelism: self.parallelism.or(config.analyzer.parallelism),
            config,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    include_patterns: Vec<String>,
    classifier: Box<dyn ClassClassifier>,
    parallelism: Option<usize>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Loads every model document under the root and checks all declared classes.
    ///
    /// # Errors
    ///
    /// Returns an error if discovery fails, or if a document cannot be
    /// loaded and `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let files = self.discover_files()?;
        info!("Found {} model files to analyze", files.len());

        let mut docs = Vec::with_capacity(files.len());
        for path in &files {
            match ModelDocument::from_file(path) {
                Ok(doc) => docs.push(doc),
                Err(e) => {
                    warn!("Skipping model {}: {}", path.display(), e);
                    if self.fail_on_parse_error {
                        return Err(e.into());
                    }
                }
            }
        }

        let mut result = self.analyze_documents(&docs)?;
        result.files_checked = docs.len();

        info!(
            "Analysis complete: {} findings in {} classes",
            result.findings.len(),
            result.classes_checked
        );

        Ok(result)
    }

    /// Checks all declared classes of already loaded documents.
    ///
    /// Classes from every document resolve against each other.
    ///
    /// # Errors
    ///
    /// Returns an error if the bounded worker pool cannot be created.
    pub fn analyze_documents(&self, docs: &[ModelDocument]) -> Result<LintResult, AnalyzerError> {
        let index = ClassIndex::from_documents(docs);
        let targets: Vec<(&ClassEntry, &ClassDecl)> = docs
            .iter()
            .flat_map(|d| d.classes.iter())
            .filter_map(|e| e.declaration.as_ref().map(|decl| (e, decl)))
            .collect();

        debug!(
            "Checking {} classes against {} known",
            targets.len(),
            index.len()
        );

        let evaluate = || -> Vec<Finding> {
            targets
                .par_iter()
                .flat_map_iter(|(entry, decl)| self.check_class(&index, entry, decl))
                .collect()
        };

        let findings = match self.parallelism {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?
                .install(evaluate),
            None => evaluate(),
        };

        let mut result = LintResult::new();
        result.classes_checked = targets.len();
        result.files_checked = docs.len();
        result.findings = findings
            .into_iter()
            .filter(|f| match self.config.ignored_by(f) {
                Some(entry) => {
                    debug!(
                        "Ignoring {} at {}:{} ({})",
                        f.identifier,
                        f.location.file.display(),
                        f.location.line,
                        entry.reason.as_deref().unwrap_or("no reason given")
                    );
                    false
                }
                None => true,
            })
            .collect();
        result.sort();

        Ok(result)
    }

    /// Runs every enabled rule against one class.
    fn check_class(&self, index: &ClassIndex, entry: &ClassEntry, decl: &ClassDecl) -> Vec<Finding> {
        let relative = ClassContext::report_path(entry.file(), &self.root);
        let scope = index.scope_for(&entry.reflection);
        let ctx = ClassContext::new(
            ClassNode::new(decl, &entry.reflection),
            &scope,
            self.classifier.as_ref(),
            &relative,
        );

        let mut findings = Vec::new();
        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let rule_findings = rule.check(&ctx);
            findings.extend(self.apply_severity_override(rule.name(), rule_findings));
        }
        findings
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(&self, rule_name: &str, mut findings: Vec<Finding>) -> Vec<Finding> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for f in &mut findings {
                f.severity = severity;
            }
        }
        findings
    }

    /// Discovers model documents under the root.
    ///
    /// A root that is itself a file is analyzed as the only document.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }

        let mut files = Vec::new();
        for include in &self.include_patterns {
            let pattern = format!("{}/{}", self.root.display(), include);
            for entry in glob::glob(&pattern)? {
                let path = entry.map_err(|e| AnalyzerError::Io(e.into_error()))?;

                if self.should_exclude(&path) {
                    debug!("Excluding: {}", path.display());
                    continue;
                }

                files.push(path);
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);

        self.exclude_patterns.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .is_ok_and(|p| p.matches_path(path) || p.matches_path(relative))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Location, Severity};

    struct EveryClass;

    impl Rule for EveryClass {
        fn name(&self) -> &'static str {
            "every-class"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn default_severity(&self) -> Severity {
            Severity::Warning
        }
        fn check(&self, ctx: &ClassContext<'_>) -> Vec<Finding> {
            vec![Finding::new(
                self.code(),
                self.name(),
                "test.everyClass",
                self.default_severity(),
                ctx.location(ctx.declaration().line),
                format!("saw {}", ctx.class_name()),
            )]
        }
    }

    fn doc() -> ModelDocument {
        ModelDocument::parse(
            r#"{"classes": [
                {"file": "/app/src/B.php", "declaration": {"name": "B", "line": 3}, "reflection": {"name": "B"}},
                {"file": "/app/src/A.php", "declaration": {"name": "A", "line": 5}, "reflection": {"name": "A"}},
                {"reflection": {"name": "Base"}}
            ]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_builder() {
        let analyzer = Analyzer::builder()
            .root(".")
            .exclude("**/vendor/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.root().exists());
        assert_eq!(analyzer.rule_count(), 0);
    }

    #[test]
    fn test_exclude_patterns() {
        let analyzer = Analyzer::builder()
            .root("/app")
            .exclude("**/vendor/**")
            .exclude("build/**")
            .build()
            .unwrap();

        assert!(analyzer.should_exclude(Path::new("/app/vendor/acme/x.model.json")));
        assert!(analyzer.should_exclude(Path::new("/app/build/x.model.json")));
        assert!(!analyzer.should_exclude(Path::new("/app/model/x.model.json")));
    }

    #[test]
    fn declared_classes_are_checked_and_sorted() {
        let analyzer = Analyzer::builder()
            .root("/app")
            .rule(EveryClass)
            .parallelism(2)
            .build()
            .unwrap();

        let result = analyzer.analyze_documents(&[doc()]).unwrap();
        assert_eq!(result.classes_checked, 2);
        assert_eq!(result.files_checked, 1);
        let files: Vec<_> = result
            .findings
            .iter()
            .map(|f| f.location.file.clone())
            .collect();
        assert_eq!(files, vec![PathBuf::from("src/A.php"), PathBuf::from("src/B.php")]);
    }

    #[test]
    fn config_disables_overrides_and_ignores() {
        let config = Config::parse(
            r#"
[rules.every-class]
severity = "error"

[[ignore]]
identifier = "test.everyClass"
path = "src/B.php"
"#,
        )
        .unwrap();
        let analyzer = Analyzer::builder()
            .root("/app")
            .rule(EveryClass)
            .config(config)
            .build()
            .unwrap();

        let result = analyzer.analyze_documents(&[doc()]).unwrap();
        assert_eq!(result.findings.len(), 1);
        assert_eq!(
            result.findings[0].location,
            Location::new(PathBuf::from("src/A.php"), 5)
        );
        assert_eq!(result.findings[0].severity, Severity::Error);

        let disabled = Analyzer::builder()
            .root("/app")
            .rule(EveryClass)
            .config(Config::parse("[rules.every-class]\nenabled = false\n").unwrap())
            .build()
            .unwrap();
        assert!(disabled.analyze_documents(&[doc()]).unwrap().findings.is_empty());
    }
}
