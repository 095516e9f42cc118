//! Alias rule trait and the ordered rule table.

/// A rule that derives the alias an import path must be bound to.
///
/// Returning `None` means the rule has no opinion about the path, so the
/// next rule in the table gets a chance. It never means "no alias required".
///
/// # Example
///
/// ```ignore
/// use importalias_core::AliasRule;
///
/// pub struct ProtobufAlias;
///
/// impl AliasRule for ProtobufAlias {
///     fn name(&self) -> &'static str { "protobuf" }
///
///     fn derive_alias(&self, import_path: &str) -> Option<String> {
///         (import_path == "github.com/golang/protobuf/proto").then(|| "proto".to_owned())
///     }
/// }
/// ```
pub trait AliasRule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "k8s-api-group").
    fn name(&self) -> &'static str;

    /// Returns a brief description of the paths this rule covers.
    fn description(&self) -> &'static str {
        ""
    }

    /// Derives the expected alias for `import_path`, or `None` for no opinion.
    fn derive_alias(&self, import_path: &str) -> Option<String>;
}

/// Type alias for boxed `AliasRule` trait objects.
pub type RuleBox = Box<dyn AliasRule>;

/// The alias a table expects for a path, and which rule decided it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    /// Expected alias.
    pub alias: String,
    /// Name of the deciding rule.
    pub rule: &'static str,
}

/// Ordered list of alias rules.
///
/// Insertion order is precedence: the first rule with an opinion decides the
/// expected alias and later rules are not consulted. If two rules could match
/// the same path and disagree, the earlier one silently wins.
#[derive(Default)]
pub struct RuleTable {
    rules: Vec<RuleBox>,
}

impl RuleTable {
    /// Creates a table from rules in precedence order.
    #[must_use]
    pub fn new(rules: Vec<RuleBox>) -> Self {
        Self { rules }
    }

    /// Appends a rule with the lowest precedence so far.
    #[must_use]
    pub fn with_rule<R: AliasRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Returns the expected alias for `import_path`, or `None` if no rule has an opinion.
    #[must_use]
    pub fn expected_alias(&self, import_path: &str) -> Option<Expectation> {
        self.rules.iter().find_map(|rule| {
            rule.derive_alias(import_path).map(|alias| Expectation {
                alias,
                rule: rule.name(),
            })
        })
    }

    /// Iterates the rules in precedence order.
    pub fn iter(&self) -> std::slice::Iter<'_, RuleBox> {
        self.rules.iter()
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the table has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a RuleBox;
    type IntoIter = std::slice::Iter<'a, RuleBox>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Debug for RuleTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|r| r.name()))
            .finish()
    }
}
