//! `k8s.io/apimachinery/pkg/apis/meta/v<version>` must be aliased to `meta`.

use importalias_core::AliasRule;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref APIMACHINERY_META: Regex = Regex::new(r"k8s\.io/apimachinery/pkg/apis/meta/v.*")
        .unwrap_or_else(|e| panic!("regex: {e}"));
}

/// Alias every apimachinery `meta` import as `meta`.
#[derive(Debug, Clone, Copy, Default)]
pub struct K8sMeta;

impl K8sMeta {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl AliasRule for K8sMeta {
    fn name(&self) -> &'static str {
        "k8s-meta"
    }

    fn description(&self) -> &'static str {
        "k8s.io/apimachinery/pkg/apis/meta/v<version> must be aliased to meta"
    }

    fn derive_alias(&self, import_path: &str) -> Option<String> {
        APIMACHINERY_META
            .is_match(import_path)
            .then(|| "meta".to_owned())
    }
}
