//! Language-agnostic import extraction types and trait.
//!
//! `LanguageExtractor` is the extension point for parsing a source file into
//! the import specs the checker looks at.

use crate::types::Location;

/// One import spec occurrence in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportObservation {
    /// Import path as written, without the surrounding quote delimiters.
    pub path: String,
    /// Alias identifier written before the path, if any (`_` and `.` included).
    pub declared_alias: Option<String>,
    /// Position of the first token of the spec.
    pub location: Location,
}

impl ImportObservation {
    /// Creates an observation.
    #[must_use]
    pub fn new(path: impl Into<String>, declared_alias: Option<String>, location: Location) -> Self {
        Self {
            path: path.into(),
            declared_alias,
            location,
        }
    }
}

/// A syntax error reported by an extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in bytes).
    pub column: usize,
    /// Byte offset of the offending token.
    pub offset: usize,
    /// Length of the offending token in bytes.
    pub length: usize,
    /// Parser diagnostic.
    pub message: String,
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

/// Trait for language-specific import extraction.
///
/// Implementations parse the whole file. A file that does not parse cleanly
/// must be reported as a [`SyntaxError`], never as an empty import list.
pub trait LanguageExtractor: Send + Sync {
    /// Language identifier (e.g., `"go"`).
    fn language_id(&self) -> &'static str;

    /// Extracts import specs from `source` in declaration order.
    ///
    /// `file` is copied into each observation's location.
    ///
    /// # Errors
    ///
    /// Returns the first syntax error found in `source`.
    fn extract_imports(
        &self,
        file: &std::path::Path,
        source: &str,
    ) -> Result<Vec<ImportObservation>, SyntaxError>;
}
