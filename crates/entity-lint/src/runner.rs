//! Internal runner for `check!()` macro integration.
//!
//! This module is `#[doc(hidden)]` and not part of the public API.

use entity_lint_core::{Analyzer, Config, Severity};
use entity_lint_rules::Preset;
use std::path::{Path, PathBuf};

const CONFIG_CANDIDATES: &[&str] = &["entity-lint.toml", ".entity-lint.toml"];

/// Arguments collected from a `check!()` invocation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    /// Preset name overriding the config file.
    pub preset: Option<String>,
    /// Config path, relative to the project root unless absolute.
    pub config: Option<String>,
    /// Failure threshold overriding the config file.
    pub fail_on: Option<String>,
}

impl CheckOptions {
    /// Sets one macro argument by name.
    ///
    /// # Panics
    ///
    /// Panics on an unknown argument name.
    pub fn set(&mut self, key: &str, value: &str) {
        let slot = match key {
            "preset" => &mut self.preset,
            "config" => &mut self.config,
            "fail_on" => &mut self.fail_on,
            other => panic!(
                "entity-lint: unknown check!() argument `{other}`. Valid arguments: preset, config, fail_on"
            ),
        };
        *slot = Some(value.to_string());
    }
}

/// Runs entity-lint as part of `cargo test`.
///
/// # Panics
///
/// Panics with a formatted report if findings at or above `fail_on` are
/// found, or if configuration or analysis fails.
pub fn run_check(options: &CheckOptions) {
    let project_root = find_project_root();
    let config = load_config(&project_root, options.config.as_deref());

    let preset = resolve_preset(options.preset.as_deref(), &config);
    let fail_on = resolve_fail_on(options.fail_on.as_deref(), &config);
    let model_root = if config.analyzer.root.is_absolute() {
        config.analyzer.root.clone()
    } else {
        project_root.join(&config.analyzer.root)
    };

    let mut builder = Analyzer::builder().root(model_root).config(config);
    for rule in preset.rules() {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder
        .build()
        .unwrap_or_else(|e| panic!("entity-lint: failed to build analyzer: {e}"));
    let result = analyzer
        .analyze()
        .unwrap_or_else(|e| panic!("entity-lint: analysis failed: {e}"));

    if result.has_findings_at(fail_on) {
        panic!("{}", result.format_test_report(fail_on));
    }
}

fn load_config(root: &Path, explicit: Option<&str>) -> Config {
    let path = match explicit {
        Some(p) if Path::new(p).is_absolute() => Some(PathBuf::from(p)),
        Some(p) => Some(root.join(p)),
        None => CONFIG_CANDIDATES
            .iter()
            .map(|name| root.join(name))
            .find(|candidate| candidate.is_file()),
    };

    match path {
        Some(path) => Config::from_file(&path).unwrap_or_else(|e| {
            panic!("entity-lint: failed to load config from {}: {e}", path.display())
        }),
        None => Config::default(),
    }
}

/// Checks whether a `Cargo.toml` declares a `[workspace]` table.
fn has_workspace_section(cargo_toml: &Path) -> bool {
    std::fs::read_to_string(cargo_toml)
        .ok()
        .and_then(|content| content.parse::<toml::Table>().ok())
        .is_some_and(|table| table.contains_key("workspace"))
}

/// Workspace root above `CARGO_MANIFEST_DIR`, else the manifest dir, else cwd.
fn find_project_root() -> PathBuf {
    let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") else {
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    };
    let manifest_dir = PathBuf::from(manifest_dir);
    manifest_dir
        .ancestors()
        .find(|dir| has_workspace_section(&dir.join("Cargo.toml")))
        .map_or_else(|| manifest_dir.clone(), Path::to_path_buf)
}

/// Macro arg > config > `recommended`.
fn resolve_preset(macro_arg: Option<&str>, config: &Config) -> Preset {
    let name = macro_arg
        .or(config.preset.as_deref())
        .unwrap_or("recommended");
    Preset::from_name(name).unwrap_or_else(|| {
        panic!("entity-lint: unknown preset `{name}`. Valid presets: recommended, strict, minimal")
    })
}

/// Macro arg > config > `error`.
fn resolve_fail_on(macro_arg: Option<&str>, config: &Config) -> Severity {
    let name = macro_arg.or(config.fail_on.as_deref()).unwrap_or("error");
    Severity::from_name(name).unwrap_or_else(|| {
        panic!("entity-lint: unknown severity `{name}`. Valid values: error, warning, info")
    })
}
