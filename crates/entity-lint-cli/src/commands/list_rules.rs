//! List rules command implementation.

use entity_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<9} {:<34} Description", "Code", "Severity", "Name");
    println!("{}", "-".repeat(96));

    for rule in all_rules() {
        println!(
            "{:<8} {:<9} {:<34} {}",
            rule.code(),
            rule.default_severity().to_string(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nPresets:");
    println!("  recommended  - EL001 through EL008 (default)");
    println!("  strict       - All rules, EL001 and EL006 raised to errors, tests not skipped");
    println!("  minimal      - EL001, EL002, EL004 (for gradual adoption)");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  entity-lint check --rules entity-datetime-immutable,index-name-prefix");
    println!("  entity-lint check --rules EL001,EL004");
}
