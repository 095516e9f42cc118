//! Package pattern expansion.
//!
//! `dir/...` (or a bare `...`) expands to every directory under `dir` that
//! holds at least one `.go` file. Like the go tool, directories named
//! `testdata` or `vendor` and directories starting with `.` or `_` are not
//! descended into. Any other argument is taken as a package directory as is.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use importalias_core::clean_path;
use tracing::debug;

/// Errors from expanding package patterns.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// An exclude pattern is not a valid glob.
    #[error("invalid exclude pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Walking a `...` pattern failed.
    #[error("failed to walk package tree: {0}")]
    Walk(#[from] ignore::Error),
}

const WILDCARD: &str = "...";

/// Expands package patterns into an ordered, de-duplicated list of directories.
///
/// Every directory is cleaned lexically, so `./pkg/a` from a walk and a plain
/// `pkg/a` argument are the same package.
///
/// Directories matching an `exclude` glob are skipped during `...` expansion;
/// explicitly named directories are always kept.
///
/// # Errors
///
/// Returns an error for an invalid glob or an unreadable tree.
pub fn expand_patterns<S: AsRef<str>>(
    patterns: &[S],
    exclude: &[String],
) -> Result<Vec<PathBuf>, PatternError> {
    let exclude = exclude
        .iter()
        .map(|p| glob::Pattern::new(p).map(|g| (g, p.clone())))
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::new();
    let mut dirs = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        let expanded = match wildcard_root(pattern) {
            Some(root) => walk_packages(root, &exclude)?,
            None => vec![clean_path(Path::new(pattern))],
        };
        debug!("Pattern {pattern} -> {} package(s)", expanded.len());

        for dir in expanded {
            if seen.insert(dir.clone()) {
                dirs.push(dir);
            }
        }
    }

    Ok(dirs)
}

fn wildcard_root(pattern: &str) -> Option<&Path> {
    if pattern == WILDCARD {
        return Some(Path::new("."));
    }
    pattern
        .strip_suffix(WILDCARD)
        .and_then(|p| p.strip_suffix('/'))
        .map(|p| if p.is_empty() { Path::new("/") } else { Path::new(p) })
}

fn walk_packages(
    root: &Path,
    exclude: &[(glob::Pattern, String)],
) -> Result<Vec<PathBuf>, PatternError> {
    let filter_exclude = exclude.to_vec();
    let mut builder = ignore::WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .follow_links(false)
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            if entry.depth() == 0 || !is_dir {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !(skipped_dir_name(&name) || is_excluded(entry.path(), &filter_exclude))
        });

    let mut dirs = BTreeSet::new();
    for entry in builder.build() {
        let entry = entry?;
        let path = entry.path();
        let is_go_file = entry.file_type().is_some_and(|t| t.is_file())
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(".go") && !n.starts_with('_') && !n.starts_with('.'));
        if is_go_file {
            if let Some(parent) = path.parent() {
                dirs.insert(clean_path(parent));
            }
        }
    }

    Ok(dirs.into_iter().collect())
}

fn skipped_dir_name(name: &str) -> bool {
    name == "testdata" || name == "vendor" || name.starts_with('.') || name.starts_with('_')
}

/// Matches `path` as a glob, or as a substring once `**` segments are removed.
fn is_excluded(path: &Path, exclude: &[(glob::Pattern, String)]) -> bool {
    let path_str = path.to_string_lossy();
    exclude.iter().any(|(glob, raw)| {
        if glob.matches(&path_str) {
            return true;
        }
        let clean = raw.replace("**/", "").replace("/**", "");
        !clean.is_empty() && path_str.contains(&clean)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let p = root.join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(p, "package x\n").unwrap();
    }

    fn rel(root: &Path, dirs: &[PathBuf]) -> Vec<String> {
        dirs.iter()
            .map(|d| {
                d.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn plain_paths_pass_through_deduplicated() {
        let dirs = expand_patterns(&["a", "b", "a"], &[]).unwrap();
        assert_eq!(dirs, [PathBuf::from("a"), PathBuf::from("b")]);
    }

    #[test]
    fn wildcard_finds_go_packages() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        touch(root, "main.go");
        touch(root, "pkg/b/b.go");
        touch(root, "pkg/a/a.go");
        touch(root, "pkg/a/inner/x_test.go");
        touch(root, "docs/readme.md");
        touch(root, "pkg/testdata/t.go");
        touch(root, "vendor/k8s.io/api/v.go");
        touch(root, ".git/hooks/h.go");
        touch(root, "_tools/t.go");
        touch(root, "pkg/c/_skip.go");

        let pattern = format!("{}/...", root.display());
        let dirs = expand_patterns(&[pattern], &[]).unwrap();
        assert_eq!(rel(root, &dirs), ["", "pkg/a", "pkg/a/inner", "pkg/b"]);
    }

    #[test]
    fn exclude_globs_prune_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        touch(root, "pkg/a/a.go");
        touch(root, "pkg/generated/g.go");
        touch(root, "pkg/generated/deep/d.go");

        let pattern = format!("{}/...", root.display());
        let dirs = expand_patterns(&[pattern], &["**/generated/**".to_owned()]).unwrap();
        assert_eq!(rel(root, &dirs), ["pkg/a"]);
    }

    #[test]
    fn wildcard_and_plain_path_deduplicated() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        touch(root, "pkg/a/a.go");
        touch(root, "pkg/b/b.go");

        let dirs = expand_patterns(
            &[
                format!("{}/./...", root.display()),
                format!("{}/pkg/a", root.display()),
                format!("{}/pkg/./b/", root.display()),
            ],
            &[],
        )
        .unwrap();
        assert_eq!(rel(root, &dirs), ["pkg/a", "pkg/b"]);
    }

    #[test]
    fn plain_paths_are_cleaned() {
        let dirs = expand_patterns(&["./pkg/a", "pkg/a", "pkg/x/../a", "./"], &[]).unwrap();
        assert_eq!(dirs, [PathBuf::from("pkg/a"), PathBuf::from(".")]);
    }

    #[test]
    fn invalid_glob_rejected() {
        let err = expand_patterns(&["."], &["[".to_owned()]).unwrap_err();
        assert!(matches!(err, PatternError::Glob(_)));
    }

    #[test]
    fn wildcard_roots() {
        assert_eq!(wildcard_root("..."), Some(Path::new(".")));
        assert_eq!(wildcard_root("./..."), Some(Path::new(".")));
        assert_eq!(wildcard_root("pkg/..."), Some(Path::new("pkg")));
        assert_eq!(wildcard_root("pkg"), None);
        assert_eq!(wildcard_root("pkg..."), None);
    }
}
