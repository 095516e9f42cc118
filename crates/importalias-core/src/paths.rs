//! Lexical path cleaning for package directories and report paths.

use std::path::{Component, Path, PathBuf};

/// Cleans a path lexically, the way Go's `path.Clean` does.
///
/// - `.` components are dropped
/// - `name/..` pairs collapse
/// - `..` directly after the root is dropped
/// - leading `..` of a relative path are kept
/// - an empty result becomes `.`
///
/// The filesystem is never consulted, so symlinks are not resolved.
#[must_use]
pub fn clean_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    let cleaned: PathBuf = parts.iter().collect();
    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}

/// Joins a package directory and a file name, then cleans the result.
///
/// `./src` and `foo.go` give `src/foo.go`; `pkg/../other` and `x.go` give
/// `other/x.go`.
#[must_use]
pub fn join_package_file(dir: &Path, file: &str) -> PathBuf {
    clean_path(&dir.join(file))
}
