//! Check command implementation.

use anyhow::{bail, Context, Result};
use entity_lint_core::{Analyzer, Config, RuleBox};
use entity_lint_rules::{rule_by_name, Preset};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
///
/// Returns whether any error-severity finding was reported.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<String>,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<bool> {
    let config = load_config(source)?;
    let rules = select_rules(&config, rules_filter.as_deref())?;

    let mut builder = Analyzer::builder().root(path).config(config).excludes(exclude);
    for rule in rules {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!("Analyzing {:?} with {} rules", path, analyzer.rule_count());

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, format)?;

    Ok(result.has_errors())
}

/// Loads the configuration the resolver pointed at.
pub fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(p) = source.path() else {
        return Ok(Config::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", p.display());
    }
    Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
}

/// Picks the rules to run: `--rules` wins over the configured preset.
pub fn select_rules(config: &Config, filter: Option<&str>) -> Result<Vec<RuleBox>> {
    if let Some(filter) = filter {
        let mut rules = Vec::new();
        for name in filter.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            match rule_by_name(name) {
                Some(rule) => rules.push(rule),
                None => tracing::warn!("Unknown rule: {}", name),
            }
        }
        if rules.is_empty() {
            bail!("No known rules in --rules {filter:?}; see `entity-lint list-rules`");
        }
        return Ok(rules);
    }

    let preset = match config.preset.as_deref() {
        None => Preset::Recommended,
        Some(name) => Preset::from_name(name)
            .with_context(|| format!("Unknown preset {name:?} (expected recommended, strict or minimal)"))?,
    };
    Ok(preset.rules())
}
