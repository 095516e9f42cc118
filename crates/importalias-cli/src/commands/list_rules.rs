//! List rules command implementation.

use importalias_rules::builtin_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Built-in rules (first match wins):\n");
    println!("{:<16} Description", "Name");
    println!("{}", "-".repeat(80));

    for rule in builtin_rules() {
        println!("{:<16} {}", rule.name(), rule.description());
    }

    println!("\nImports matched by no rule may use any alias.");
}
