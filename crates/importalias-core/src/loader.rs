//! Package discovery trait.

use std::path::{Path, PathBuf};

/// Files belonging to one package directory.
///
/// File names are bare names relative to `dir`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourcePackage {
    /// Package directory as given by the caller.
    pub dir: PathBuf,
    /// Package name from the first implementation file, if known.
    pub name: Option<String>,
    /// Implementation files.
    pub source_files: Vec<String>,
    /// Test files in the same package.
    pub test_files: Vec<String>,
    /// Test files in the external `_test` package.
    pub external_test_files: Vec<String>,
}

impl SourcePackage {
    /// Creates an empty package for `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    /// All file names of the package, sorted lexicographically.
    #[must_use]
    pub fn sorted_files(&self) -> Vec<&str> {
        let mut files: Vec<&str> = self
            .source_files
            .iter()
            .chain(&self.test_files)
            .chain(&self.external_test_files)
            .map(String::as_str)
            .collect();
        files.sort_unstable();
        files
    }

    /// Returns true if the package has no files at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source_files.is_empty() && self.test_files.is_empty() && self.external_test_files.is_empty()
    }
}

/// Error resolving a package directory.
#[derive(Debug, thiserror::Error)]
#[error("cannot load package {}", .dir.display())]
pub struct LoadError {
    /// Package directory that failed.
    pub dir: PathBuf,
    /// Underlying IO error.
    #[source]
    pub source: std::io::Error,
}

/// Resolves a package directory into its member files.
pub trait PackageLoader: Send + Sync {
    /// Lists the files belonging to the package in `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    fn load(&self, dir: &Path) -> Result<SourcePackage, LoadError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_files_merges_all_lists() {
        let pkg = SourcePackage {
            dir: PathBuf::from("pkg"),
            name: Some("pkg".into()),
            source_files: vec!["z.go".into(), "b.go".into()],
            test_files: vec!["b_test.go".into()],
            external_test_files: vec!["a_test.go".into()],
        };
        assert_eq!(pkg.sorted_files(), ["a_test.go", "b.go", "b_test.go", "z.go"]);
        assert!(!pkg.is_empty());
    }

    #[test]
    fn new_package_is_empty() {
        let pkg = SourcePackage::new("pkg");
        assert!(pkg.is_empty());
        assert!(pkg.sorted_files().is_empty());
    }
}
