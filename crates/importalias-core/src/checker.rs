//! Alias checker: compares one import spec against the rule table.

use crate::extractor::ImportObservation;
use crate::rule::RuleTable;
use crate::types::Violation;

/// Checks one import spec and returns at most one violation.
///
/// Imports the table has no opinion about always pass, whatever their alias.
#[must_use]
pub fn check_import(rules: &RuleTable, import: &ImportObservation) -> Option<Violation> {
    let expectation = rules.expected_alias(&import.path)?;

    match import.declared_alias.as_deref() {
        None => Some(Violation::missing_alias(
            expectation.rule,
            import.location.clone(),
            &import.path,
            expectation.alias,
        )),
        Some(declared) if declared != expectation.alias => Some(Violation::wrong_alias(
            expectation.rule,
            import.location.clone(),
            &import.path,
            expectation.alias,
            declared,
        )),
        Some(_) => None,
    }
}
