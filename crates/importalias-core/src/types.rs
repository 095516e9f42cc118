//! Core types for alias violations and run results.

use std::path::PathBuf;

/// Source code location of an import spec.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    /// File path as it was joined from the package path.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in bytes).
    pub column: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// What was wrong with an import's alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// The import has no alias but one is required.
    MissingAlias {
        /// Alias the rule table expects.
        expected: String,
    },
    /// The import declares an alias other than the expected one.
    WrongAlias {
        /// Alias the rule table expects.
        expected: String,
        /// Alias written in the source.
        declared: String,
    },
}

impl ViolationKind {
    /// Returns the alias the rule table expected.
    #[must_use]
    pub fn expected(&self) -> &str {
        match self {
            Self::MissingAlias { expected } | Self::WrongAlias { expected, .. } => expected,
        }
    }
}

/// A single alias non-conformance found during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Name of the rule that derived the expected alias.
    pub rule: String,
    /// Location of the offending import spec.
    pub location: Location,
    /// Import path as written, without quotes.
    pub import_path: String,
    /// Missing or wrong alias.
    pub kind: ViolationKind,
    /// Fully rendered report line.
    pub message: String,
}

impl Violation {
    /// Creates a violation for an import that declares no alias.
    #[must_use]
    pub fn missing_alias(
        rule: impl Into<String>,
        location: Location,
        import_path: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        let import_path = import_path.into();
        let expected = expected.into();
        let message = format!("{location}: {import_path} must declare import alias \"{expected}\"");
        Self {
            rule: rule.into(),
            location,
            import_path,
            kind: ViolationKind::MissingAlias { expected },
            message,
        }
    }

    /// Creates a violation for an import whose alias differs from the expected one.
    #[must_use]
    pub fn wrong_alias(
        rule: impl Into<String>,
        location: Location,
        import_path: impl Into<String>,
        expected: impl Into<String>,
        declared: impl Into<String>,
    ) -> Self {
        let import_path = import_path.into();
        let expected = expected.into();
        let declared = declared.into();
        let message = format!(
            "{location}: expected {import_path} to declare import alias \"{expected}\" but was \"{declared}\""
        );
        Self {
            rule: rule.into(),
            location,
            import_path,
            kind: ViolationKind::WrongAlias { expected, declared },
            message,
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Aggregate outcome of one run over one or more packages.
#[derive(Debug, Default)]
pub struct RunResult {
    /// All violations, in the order they were reported.
    pub violations: Vec<Violation>,
    /// Number of files checked.
    pub files_checked: usize,
    /// Number of packages checked.
    pub packages_checked: usize,
}

impl RunResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if any violation was found.
    #[must_use]
    pub fn failed(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Counts violations by kind as `(missing, wrong)`.
    #[must_use]
    pub fn count_by_kind(&self) -> (usize, usize) {
        let missing = self
            .violations
            .iter()
            .filter(|v| matches!(v.kind, ViolationKind::MissingAlias { .. }))
            .count();
        (missing, self.violations.len() - missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> Location {
        Location::new("pkg/foo.go", 6, 2)
    }

    #[test]
    fn missing_alias_message() {
        let v = Violation::missing_alias(
            "k8s-meta",
            location(),
            "k8s.io/apimachinery/pkg/apis/meta/v1",
            "meta",
        );
        assert_eq!(
            v.message,
            r#"pkg/foo.go:6:2: k8s.io/apimachinery/pkg/apis/meta/v1 must declare import alias "meta""#
        );
        assert_eq!(v.kind.expected(), "meta");
    }

    #[test]
    fn wrong_alias_message() {
        let v = Violation::wrong_alias(
            "k8s-api-group",
            location(),
            "k8s.io/api/apps/v1",
            "apps",
            "appsv1",
        );
        assert_eq!(
            v.to_string(),
            r#"pkg/foo.go:6:2: expected k8s.io/api/apps/v1 to declare import alias "apps" but was "appsv1""#
        );
    }

    #[test]
    fn empty_result_passes() {
        let result = RunResult::new();
        assert!(!result.failed());
        assert_eq!(result.count_by_kind(), (0, 0));
    }

    #[test]
    fn any_violation_fails() {
        let mut result = RunResult::new();
        result.violations.push(Violation::wrong_alias(
            "k8s-api-group",
            location(),
            "k8s.io/api/apps/v1",
            "apps",
            "_",
        ));
        result.violations.push(Violation::missing_alias(
            "k8s-meta",
            location(),
            "k8s.io/apimachinery/pkg/apis/meta/v1",
            "meta",
        ));
        assert!(result.failed());
        assert_eq!(result.count_by_kind(), (1, 1));
    }
}
