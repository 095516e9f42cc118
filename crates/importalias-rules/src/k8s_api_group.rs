//! `k8s.io/api/<group>/v<version>` must be aliased to `<group>`.

use importalias_core::AliasRule;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref API_GROUP: Regex =
        Regex::new(r"k8s\.io/api/([^/]*)/v.*").unwrap_or_else(|e| panic!("regex: {e}"));
}

/// Requires Kubernetes API group imports to be aliased to the group name.
///
/// ```go
/// // BAD
/// appsv1 "k8s.io/api/apps/v1"
///
/// // GOOD
/// apps "k8s.io/api/apps/v1"
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct K8sApiGroup;

impl K8sApiGroup {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl AliasRule for K8sApiGroup {
    fn name(&self) -> &'static str {
        "k8s-api-group"
    }

    fn description(&self) -> &'static str {
        "k8s.io/api/<group>/v<version> must be aliased to <group>"
    }

    fn derive_alias(&self, import_path: &str) -> Option<String> {
        let group = API_GROUP.captures(import_path)?.get(1)?.as_str();
        // An empty group segment gives no opinion.
        (!group.is_empty()).then(|| group.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alias(path: &str) -> Option<String> {
        K8sApiGroup::new().derive_alias(path)
    }

    #[test]
    fn derives_group_for_any_version() {
        for (path, group) in [
            ("k8s.io/api/apps/v1", "apps"),
            ("k8s.io/api/batch/v1beta1", "batch"),
            ("k8s.io/api/core/v1", "core"),
            ("k8s.io/api/rbac/v1alpha1", "rbac"),
            ("k8s.io/api/autoscaling/v2", "autoscaling"),
        ] {
            assert_eq!(alias(path).as_deref(), Some(group), "{path}");
        }
    }

    #[test]
    fn matches_prefixed_paths() {
        assert_eq!(
            alias("github.com/org/repo/vendor/k8s.io/api/apps/v1").as_deref(),
            Some("apps")
        );
    }

    #[test]
    fn no_opinion_without_version_segment() {
        assert_eq!(alias("k8s.io/api/apps"), None);
        assert_eq!(alias("k8s.io/api/core/install"), None);
        assert_eq!(alias("k8s.io/api"), None);
    }

    #[test]
    fn no_opinion_on_empty_group() {
        assert_eq!(alias("k8s.io/api//v1"), None);
    }

    #[test]
    fn ignores_other_modules() {
        assert_eq!(alias("k8s.io/apimachinery/pkg/apis/meta/v1"), None);
        assert_eq!(alias("k8s.io/client-go/kubernetes"), None);
        assert_eq!(alias("fmt"), None);
    }
}
