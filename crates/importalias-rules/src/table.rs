//! The compiled-in rule table.

use crate::{K8sApiGroup, K8sMeta};
use importalias_core::RuleTable;
use lazy_static::lazy_static;

lazy_static! {
    static ref BUILTIN: RuleTable = RuleTable::default()
        .with_rule(K8sApiGroup::new())
        .with_rule(K8sMeta::new());
}

/// Returns the built-in rule table.
///
/// Precedence:
/// 1. `k8s-api-group`
/// 2. `k8s-meta`
///
/// The table is built once per process and never changes.
#[must_use]
pub fn builtin_rules() -> &'static RuleTable {
    &BUILTIN
}
