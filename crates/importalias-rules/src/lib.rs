//! # importalias-rules
//!
//! Built-in alias rules for importalias.
//!
//! ## Available Rules
//!
//! Listed in precedence order:
//!
//! | Name | Import path | Expected alias |
//! |------|-------------|----------------|
//! | `k8s-api-group` | `k8s.io/api/<group>/v<version>` | `<group>` |
//! | `k8s-meta` | `k8s.io/apimachinery/pkg/apis/meta/v<version>` | `meta` |
//!
//! Both patterns are unanchored searches, so vendored or otherwise prefixed
//! paths match as well.
//!
//! ## Usage
//!
//! ```ignore
//! use importalias_rules::builtin_rules;
//!
//! let expected = builtin_rules().expected_alias("k8s.io/api/apps/v1");
//! assert_eq!(expected.map(|e| e.alias).as_deref(), Some("apps"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod k8s_api_group;
mod k8s_meta;
mod table;

pub use k8s_api_group::K8sApiGroup;
pub use k8s_meta::K8sMeta;
pub use table::builtin_rules;

/// Re-export core types for convenience.
pub use importalias_core::{AliasRule, RuleTable};
