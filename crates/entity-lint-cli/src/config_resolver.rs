//! Locating `entity-lint.toml`.
//!
//! Lookup order, first hit wins:
//!
//! 1. the `--config` flag, taken as-is;
//! 2. `entity-lint.toml` or `.entity-lint.toml` in the model directory or
//!    any of its ancestors;
//! 3. `config.toml` in the global directory (`$ENTITY_LINT_CONFIG_DIR`,
//!    else `~/.entity-lint/`);
//! 4. built-in defaults.

use std::path::{Path, PathBuf};

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found next to the models or in a parent directory.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Path of the config file, unless defaults apply.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Whether the global fallback was used.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

const PROJECT_CONFIG_NAMES: &[&str] = &["entity-lint.toml", ".entity-lint.toml"];
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration for models under `model_dir`.
#[must_use]
pub fn resolve(model_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_with(model_dir, explicit, global_config_dir())
}

fn resolve_with(model_dir: &Path, explicit: Option<&Path>, global_dir: Option<PathBuf>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = find_project_config(model_dir) {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
        .map_or(ConfigSource::Default, |candidate| {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        })
}

/// Walks from `start` towards the filesystem root looking for a project config.
fn find_project_config(start: &Path) -> Option<PathBuf> {
    let start = if start.as_os_str().is_empty() {
        Path::new(".")
    } else {
        start
    };
    let absolute = std::fs::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());
    absolute.ancestors().find_map(|dir| {
        PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

/// Global config directory: `$ENTITY_LINT_CONFIG_DIR`, else `~/.entity-lint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("ENTITY_LINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".entity-lint"))
}
