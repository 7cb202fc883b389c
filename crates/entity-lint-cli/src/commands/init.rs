//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

/// File name written by `entity-lint init`.
pub const CONFIG_FILE_NAME: &str = "entity-lint.toml";

const DEFAULT_CONFIG: &str = r#"# entity-lint configuration

# Rule preset: "recommended" (default), "strict" or "minimal"
preset = "recommended"

# Minimum severity that fails `cargo test` integration
fail_on = "error"

[analyzer]
# Root directory holding model documents (default: current directory)
# root = "./var/model"

# Model documents to load
include = ["**/*.model.json"]

# Glob patterns to exclude from analysis
exclude = [
    "**/vendor/**",
    "**/node_modules/**",
]

# Worker threads for class evaluation (default: all cores)
# parallelism = 4

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.entity-column-comment]
enabled = true
# severity = "error"
skip_tests = true

[rules.index-column-mutually-exclusive]
index_column_class = "App\\Doctrine\\Attribute\\IndexColumn"

[rules.entity-test-must-extend]
base_class = "App\\Tests\\AbstractEntityTestCase"

# Suppress individual findings
# [[ignore]]
# identifier = "doctrine.indexName.prefix"
# path = "src/Legacy/**"
# reason = "legacy tables keep their historic index names"
"#;

/// Runs the init command, writing the default configuration into `dir`.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE_NAME} to configure rules");
    println!("  2. Export your class model as *.model.json");
    println!("  3. Run: entity-lint check");

    Ok(())
}
