//! Shared output formatting for lint results.

use anyhow::Result;
use entity_lint_core::{FindingDiagnostic, LintResult};
use miette::{GraphicalReportHandler, GraphicalTheme};
use std::fmt::Write;
use std::io::IsTerminal;

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    let color = std::io::stdout().is_terminal();
    print!("{}", render(result, format, color)?);
    Ok(())
}

/// Renders lint results to a string.
pub fn render(result: &LintResult, format: OutputFormat, color: bool) -> Result<String> {
    match format {
        OutputFormat::Text => render_text(result, color),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(result)?)),
        OutputFormat::Compact => Ok(render_compact(result)),
    }
}

fn render_text(result: &LintResult, color: bool) -> Result<String> {
    let theme = if color {
        GraphicalTheme::unicode()
    } else {
        GraphicalTheme::unicode_nocolor()
    };
    let handler = GraphicalReportHandler::new_themed(theme).with_width(120);

    let mut out = String::new();
    for finding in &result.findings {
        let diagnostic = FindingDiagnostic::from(finding);
        handler.render_report(&mut out, &diagnostic)?;
        out.push('\n');
    }

    let (errors, warnings, infos) = result.count_by_severity();
    let summary = format!(
        "Found {} error(s), {} warning(s), {} info(s) in {} class(es) from {} model file(s)",
        errors, warnings, infos, result.classes_checked, result.files_checked
    );
    if color {
        let summary_color = if errors > 0 {
            "\x1b[31m"
        } else if warnings > 0 {
            "\x1b[33m"
        } else {
            "\x1b[32m"
        };
        writeln!(out, "{summary_color}{summary}\x1b[0m")?;
    } else {
        writeln!(out, "{summary}")?;
    }
    Ok(out)
}

fn render_compact(result: &LintResult) -> String {
    let mut out = String::new();
    for finding in &result.findings {
        let _ = writeln!(out, "{finding}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity_lint_core::{Finding, Location, Severity};
    use std::path::PathBuf;

    fn sample() -> LintResult {
        let mut result = LintResult::new();
        result.classes_checked = 3;
        result.files_checked = 1;
        result.findings.push(
            Finding::new(
                "EL006",
                "index-name-prefix",
                "doctrine.indexName.prefix",
                Severity::Warning,
                Location::new(PathBuf::from("src/Entity/Order.php"), 12),
                "Index \"idx_status\" in entity \"App\\Entity\\Order\" must be prefixed with the table name \"shop_order_\".",
            )
            .with_tip("Rename the index to something like \"shop_order_idx_status\"."),
        );
        result
    }

    #[test]
    fn compact_is_one_line_per_finding() {
        let out = render(&sample(), OutputFormat::Compact, false).unwrap();
        insta::assert_snapshot!(out, @r#"src/Entity/Order.php:12: warning [EL006] Index "idx_status" in entity "App\Entity\Order" must be prefixed with the table name "shop_order_". (doctrine.indexName.prefix)"#);
    }

    #[test]
    fn json_round_trips_findings() {
        let out = render(&sample(), OutputFormat::Json, false).unwrap();
        let parsed: LintResult = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.findings.len(), 1);
        assert_eq!(parsed.findings[0].identifier, "doctrine.indexName.prefix");
        assert_eq!(parsed.classes_checked, 3);
    }

    #[test]
    fn text_includes_code_tip_and_summary() {
        let out = render(&sample(), OutputFormat::Text, false).unwrap();
        assert!(out.contains("EL006::doctrine.indexName.prefix"));
        assert!(out.contains("shop_order_idx_status"));
        assert!(out.contains("src/Entity/Order.php:12"));
        assert!(out.contains("Found 0 error(s), 1 warning(s), 0 info(s) in 3 class(es) from 1 model file(s)"));
        assert!(!out.contains('\x1b'));
    }
}
