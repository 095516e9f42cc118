//! Package runner: checks every file of every package and streams violations.

use crate::checker::check_import;
use crate::extractor::{LanguageExtractor, SyntaxError};
use crate::loader::{LoadError, PackageLoader};
use crate::paths::join_package_file;
use crate::rule::RuleTable;
use crate::types::{RunResult, Violation};

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Fatal errors that abort a run.
///
/// Violations are never reported through this type; they are streamed to the
/// output sink and collected in [`RunResult`].
#[derive(Debug, Error, Diagnostic)]
pub enum RunError {
    /// A source file could not be read.
    #[error("failed to read {path}")]
    #[diagnostic(code(importalias::read))]
    Read {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A source file could not be parsed.
    #[error("failed to parse file {path}: {line}:{column}: {message}")]
    #[diagnostic(
        code(importalias::parse),
        help("fix the syntax error before running the alias check")
    )]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Line of the syntax error (1-indexed).
        line: usize,
        /// Column of the syntax error (1-indexed).
        column: usize,
        /// Parser diagnostic.
        message: String,
        /// File contents for rendering.
        #[source_code]
        src: NamedSource<String>,
        /// Span of the offending token.
        #[label("{message}")]
        span: SourceSpan,
    },

    /// A package directory could not be resolved.
    #[error(transparent)]
    #[diagnostic(code(importalias::load_package))]
    LoadPackage(#[from] LoadError),

    /// The output sink rejected a write.
    #[error("failed to write report")]
    #[diagnostic(code(importalias::output))]
    Output(#[source] std::io::Error),
}

/// Checks packages against a rule table.
///
/// Execution is single-threaded: each file is read, parsed and checked to
/// completion before the next one starts, so output order is fully determined
/// by package order, file name order and declaration order.
pub struct Runner<'r> {
    rules: &'r RuleTable,
    extractor: Box<dyn LanguageExtractor>,
    loader: Box<dyn PackageLoader>,
}

impl<'r> Runner<'r> {
    /// Creates a runner from its collaborators.
    #[must_use]
    pub fn new(
        rules: &'r RuleTable,
        extractor: Box<dyn LanguageExtractor>,
        loader: Box<dyn PackageLoader>,
    ) -> Self {
        Self {
            rules,
            extractor,
            loader,
        }
    }

    /// Returns the rule table this runner checks against.
    #[must_use]
    pub fn rules(&self) -> &RuleTable {
        self.rules
    }

    /// Checks every package and writes one line per violation to `out`.
    ///
    /// All packages and files are processed even after violations are found.
    /// `verbose` does not change what is written to `out`.
    ///
    /// # Errors
    ///
    /// Returns immediately on the first package that cannot be loaded, file
    /// that cannot be read or parsed, or failed write to `out`.
    pub fn run<P: AsRef<Path>>(
        &self,
        packages: &[P],
        verbose: bool,
        out: &mut dyn Write,
    ) -> Result<RunResult, RunError> {
        debug!(
            verbose,
            language = self.extractor.language_id(),
            rules = self.rules.len(),
            "Starting run over {} package(s)",
            packages.len()
        );

        let mut result = RunResult::new();

        for dir in packages {
            let dir = dir.as_ref();
            let package = self.loader.load(dir)?;
            if package.is_empty() {
                warn!("No source files in {}", dir.display());
            }

            for name in package.sorted_files() {
                let path = join_package_file(dir, name);
                let violations = self.check_file(&path)?;
                for violation in &violations {
                    writeln!(out, "{violation}").map_err(RunError::Output)?;
                }
                result.violations.extend(violations);
                result.files_checked += 1;
            }
            result.packages_checked += 1;
        }

        let (missing, wrong) = result.count_by_kind();
        info!(
            "Checked {} file(s) in {} package(s): {} missing alias(es), {} wrong alias(es)",
            result.files_checked, result.packages_checked, missing, wrong
        );

        Ok(result)
    }

    /// Checks a single file and returns its violations in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Read`] or [`RunError::Parse`].
    pub fn check_file(&self, path: &Path) -> Result<Vec<Violation>, RunError> {
        debug!("Checking: {}", path.display());

        let bytes = std::fs::read(path).map_err(|source| RunError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(e) => {
                let error = invalid_utf8(e.as_bytes(), e.utf8_error().valid_up_to());
                let lossy = String::from_utf8_lossy(e.as_bytes()).into_owned();
                return Err(parse_error(path, lossy, error));
            }
        };

        let imports = self
            .extractor
            .extract_imports(path, &content)
            .map_err(|e| parse_error(path, content.clone(), e))?;

        Ok(imports
            .iter()
            .filter_map(|import| check_import(self.rules, import))
            .collect())
    }
}

fn parse_error(path: &Path, content: String, e: SyntaxError) -> RunError {
    RunError::Parse {
        path: path.to_path_buf(),
        line: e.line,
        column: e.column,
        span: SourceSpan::from((e.offset, e.length)),
        message: e.message,
        src: NamedSource::new(path.display().to_string(), content),
    }
}

/// Positions a syntax error at the first byte that is not valid UTF-8.
fn invalid_utf8(bytes: &[u8], valid_up_to: usize) -> SyntaxError {
    let prefix = &bytes[..valid_up_to];
    let line_start = prefix
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    SyntaxError {
        line: prefix.iter().filter(|&&b| b == b'\n').count() + 1,
        column: valid_up_to - line_start + 1,
        offset: valid_up_to,
        // Width of the U+FFFD that replaces the bad sequence in the rendered source.
        length: char::REPLACEMENT_CHARACTER.len_utf8(),
        message: "invalid UTF-8 encoding".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_utf8_position() {
        let bytes = b"package p\n\n// caf\xff\n";
        let err = String::from_utf8(bytes.to_vec()).unwrap_err();
        let e = invalid_utf8(bytes, err.utf8_error().valid_up_to());
        assert_eq!((e.line, e.column, e.offset), (3, 7, 17));
        assert_eq!(e.message, "invalid UTF-8 encoding");
    }

    #[test]
    fn invalid_utf8_on_first_line() {
        let e = invalid_utf8(b"\xffpackage p\n", 0);
        assert_eq!((e.line, e.column, e.offset), (1, 1, 0));
    }
}
