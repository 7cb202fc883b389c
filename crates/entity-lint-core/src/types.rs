//! Core types for lint findings and results.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for lint findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail lint.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl Severity {
    /// Parses a severity name (`error`, `warning`, `info`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            "info" => Some(Self::Info),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Source location of a finding.
///
/// Lines come from the host's syntax tree or reflection, so only a line is
/// tracked. Line `0` means the host could not supply any position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path of the analyzed class (relative to the model root when known).
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
}

impl Location {
    /// Creates a new location.
    #[must_use]
    pub fn new(file: PathBuf, line: usize) -> Self {
        Self { file, line }
    }
}

/// A lint finding produced by a rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Rule code (e.g., "EL001").
    pub code: String,
    /// Rule name (e.g., "entity-column-comment").
    pub rule: String,
    /// Dotted identifier (e.g., `doctrine.column.comment.missingOptions`).
    pub identifier: String,
    /// Severity of this finding.
    pub severity: Severity,
    /// Where the finding was reported.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// Optional remediation tip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

impl Finding {
    /// Creates a new finding.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        identifier: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            identifier: identifier.into(),
            severity,
            location,
            message: message.into(),
            tip: None,
        }
    }

    /// Adds a remediation tip to this finding.
    #[must_use]
    pub fn with_tip(mut self, tip: impl Into<String>) -> Self {
        self.tip = Some(tip.into());
        self
    }

    /// Formats the finding for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} at {}:{}\n",
            self.code,
            self.rule,
            self.location.file.display(),
            self.location.line,
        );
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        let _ = writeln!(output, "  = id: {}", self.identifier);
        if let Some(tip) = &self.tip {
            let _ = writeln!(output, "  = tip: {tip}");
        }
        output
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {} [{}] {} ({})",
            self.location.file.display(),
            self.location.line,
            self.severity,
            self.code,
            self.message,
            self.identifier,
        )
    }
}

/// A finding rendered as a miette diagnostic.
///
/// The host hands over no source text, so the diagnostic carries the
/// location inside its message instead of a labeled span.
#[derive(Debug, thiserror::Error)]
#[error("{location}: {message}")]
pub struct FindingDiagnostic {
    location: String,
    message: String,
    code: String,
    help: Option<String>,
    severity: Severity,
}

impl Diagnostic for FindingDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(&self.code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.severity {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
            Severity::Info => miette::Severity::Advice,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }
}

impl From<&Finding> for FindingDiagnostic {
    fn from(f: &Finding) -> Self {
        Self {
            location: format!("{}:{}", f.location.file.display(), f.location.line),
            message: f.message.clone(),
            code: format!("{}::{}", f.code, f.identifier),
            help: f.tip.clone(),
            severity: f.severity,
        }
    }
}

/// Result of running lint analysis.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All findings.
    pub findings: Vec<Finding>,
    /// Number of class declarations checked.
    pub classes_checked: usize,
    /// Number of model files loaded.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    /// Returns findings carrying the given identifier.
    #[must_use]
    pub fn by_identifier(&self, identifier: &str) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|f| f.identifier == identifier)
            .collect()
    }

    /// Counts findings by severity as `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |s: Severity| self.findings.iter().filter(|f| f.severity == s).count();
        (
            count(Severity::Error),
            count(Severity::Warning),
            count(Severity::Info),
        )
    }

    /// Sorts findings by file, then line, then rule code.
    pub fn sort(&mut self) {
        self.findings.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.line.cmp(&b.location.line))
                .then(a.code.cmp(&b.code))
        });
    }

    /// Formats findings as a test failure report.
    ///
    /// Produces a human-readable multi-line report suitable for `panic!()`
    /// messages in `cargo test` integration.
    #[must_use]
    pub fn format_test_report(&self, fail_on: Severity) -> String {
        use std::fmt::Write;

        let failing: Vec<&Finding> = self
            .findings
            .iter()
            .filter(|f| f.severity >= fail_on)
            .collect();

        let mut report = String::new();
        let _ = writeln!(
            report,
            "\n=== entity-lint: {} finding(s) ===\n",
            failing.len()
        );

        for f in &failing {
            let _ = writeln!(report, "{}", f.format());
        }

        let (errors, warnings, infos) = self.count_by_severity();
        let _ = writeln!(
            report,
            "Total: {} error(s), {} warning(s), {} info(s) in {} class(es)",
            errors, warnings, infos, self.classes_checked
        );

        report
    }

    /// Checks if any findings meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_findings_at(&self, severity: Severity) -> bool {
        self.findings.iter().any(|f| f.severity >= severity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_finding(severity: Severity) -> Finding {
        Finding::new(
            "EL001",
            "entity-column-comment",
            "doctrine.column.comment.missingOptions",
            severity,
            Location::new(PathBuf::from("src/Entity/User.php"), 42),
            "Property $name has no options",
        )
    }

    #[test]
    fn finding_format_includes_identifier_and_tip() {
        let f = make_finding(Severity::Error).with_tip("Add options: ['comment' => '...']");
        let formatted = f.format();
        assert!(formatted.contains("= id: doctrine.column.comment.missingOptions"));
        assert!(formatted.contains("= tip: Add options"));
        assert!(formatted.contains("src/Entity/User.php:42"));
    }

    #[test]
    fn finding_format_omits_tip_when_none() {
        let formatted = make_finding(Severity::Error).format();
        assert!(!formatted.contains("tip:"));
    }

    #[test]
    fn finding_display_is_single_line() {
        let display = format!("{}", make_finding(Severity::Warning));
        assert_eq!(
            display,
            "src/Entity/User.php:42: warning [EL001] Property $name has no options \
             (doctrine.column.comment.missingOptions)"
        );
    }

    #[test]
    fn diagnostic_carries_code_and_help() {
        let f = make_finding(Severity::Warning).with_tip("add a comment");
        let diag = FindingDiagnostic::from(&f);
        let code = diag.code().map(|c| c.to_string());
        assert_eq!(
            code.as_deref(),
            Some("EL001::doctrine.column.comment.missingOptions")
        );
        assert_eq!(diag.help().map(|h| h.to_string()).as_deref(), Some("add a comment"));
        assert_eq!(diag.severity(), Some(miette::Severity::Warning));
        assert!(diag.to_string().starts_with("src/Entity/User.php:42: "));
    }

    #[test]
    fn severity_from_name() {
        assert_eq!(Severity::from_name("warning"), Some(Severity::Warning));
        assert_eq!(Severity::from_name("critical"), None);
    }

    #[test]
    fn has_findings_at_threshold() {
        let mut result = LintResult::new();
        result.findings.push(make_finding(Severity::Warning));
        assert!(!result.has_findings_at(Severity::Error));
        assert!(result.has_findings_at(Severity::Warning));
        assert!(!result.has_errors());
    }

    #[test]
    fn format_test_report_filters_by_severity() {
        let mut result = LintResult::new();
        result.classes_checked = 5;
        result.findings.push(make_finding(Severity::Warning));
        result.findings.push(make_finding(Severity::Error));

        let report = result.format_test_report(Severity::Error);
        assert!(report.contains("1 finding(s)"));
        assert!(report.contains("1 error(s)"));
        assert!(report.contains("1 warning(s)"));
        assert!(report.contains("in 5 class(es)"));
    }

    #[test]
    fn sort_orders_by_file_then_line() {
        let mut result = LintResult::new();
        let mut late = make_finding(Severity::Error);
        late.location.line = 90;
        let mut other_file = make_finding(Severity::Error);
        other_file.location.file = PathBuf::from("src/Entity/Order.php");
        result.findings = vec![late, make_finding(Severity::Error), other_file];

        result.sort();
        let lines: Vec<(String, usize)> = result
            .findings
            .iter()
            .map(|f| (f.location.file.display().to_string(), f.location.line))
            .collect();
        assert_eq!(
            lines,
            vec![
                ("src/Entity/Order.php".to_string(), 42),
                ("src/Entity/User.php".to_string(), 42),
                ("src/Entity/User.php".to_string(), 90),
            ]
        );
    }
}
