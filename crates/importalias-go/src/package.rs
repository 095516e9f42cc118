//! Go package loading: which files in a directory belong to the package.
//!
//! Follows the rules `go/build` applies to a single directory:
//!
//! - only `*.go` files, non-recursively
//! - names starting with `_` or `.` are ignored
//! - `name_GOOS.go`, `name_GOARCH.go` and `name_GOOS_GOARCH.go` (with or
//!   without `_test`) only count for a matching build target
//! - `*_test.go` files are tests; those whose package clause ends in `_test`
//!   are external tests
//!
//! `//go:build` lines are not evaluated.

use importalias_core::{LoadError, PackageLoader, SourcePackage};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;
use tracing::debug;

lazy_static! {
    static ref PACKAGE_CLAUSE: Regex = Regex::new(r"^package\s+([\p{L}_][\p{L}\p{N}_]*)")
        .unwrap_or_else(|e| panic!("regex: {e}"));
}

const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux",
    "nacl", "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

const KNOWN_ARCH: &[&str] = &[
    "386", "amd64", "amd64p32", "arm", "armbe", "arm64", "arm64be", "loong64", "mips", "mipsle",
    "mips64", "mips64le", "mips64p32", "mips64p32le", "ppc", "ppc64", "ppc64le", "riscv",
    "riscv64", "s390", "s390x", "sparc", "sparc64", "wasm",
];

/// The GOOS/GOARCH pair file name constraints are evaluated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
    /// Operating system, in Go's naming (e.g., `darwin`).
    pub goos: String,
    /// Architecture, in Go's naming (e.g., `amd64`).
    pub goarch: String,
}

impl BuildTarget {
    /// Creates a target from explicit Go names.
    #[must_use]
    pub fn new(goos: impl Into<String>, goarch: impl Into<String>) -> Self {
        Self {
            goos: goos.into(),
            goarch: goarch.into(),
        }
    }

    /// The target of the running host, translated to Go's names.
    #[must_use]
    pub fn host() -> Self {
        let goos = match std::env::consts::OS {
            "macos" => "darwin",
            other => other,
        };
        let little = cfg!(target_endian = "little");
        let goarch = match std::env::consts::ARCH {
            "x86" => "386",
            "x86_64" => "amd64",
            "aarch64" => "arm64",
            "loongarch64" => "loong64",
            "powerpc" => "ppc",
            "powerpc64" if little => "ppc64le",
            "powerpc64" => "ppc64",
            "mips" if little => "mipsle",
            "mips64" if little => "mips64le",
            "wasm32" => "wasm",
            other => other,
        };
        Self::new(goos, goarch)
    }

    /// Host target overridden by the `GOOS` and `GOARCH` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let host = Self::host();
        Self::new(
            std::env::var("GOOS").unwrap_or(host.goos),
            std::env::var("GOARCH").unwrap_or(host.goarch),
        )
    }

    fn matches_tag(&self, tag: &str) -> bool {
        tag == self.goarch
            || tag == self.goos
            || (tag == "linux" && self.goos == "android")
            || (tag == "solaris" && self.goos == "illumos")
            || (tag == "darwin" && self.goos == "ios")
    }

    /// Whether a file name's `_GOOS`/`_GOARCH` suffix admits this target.
    #[must_use]
    pub fn matches_file_name(&self, file_name: &str) -> bool {
        let stem = file_name.split('.').next().unwrap_or(file_name);
        // Everything before the first underscore is ignored.
        let Some(i) = stem.find('_') else {
            return true;
        };
        let mut parts: Vec<&str> = stem[i..].split('_').collect();
        if parts.last() == Some(&"test") {
            parts.pop();
        }

        let n = parts.len();
        if n >= 2 && KNOWN_OS.contains(&parts[n - 2]) && KNOWN_ARCH.contains(&parts[n - 1]) {
            return self.matches_tag(parts[n - 2]) && self.matches_tag(parts[n - 1]);
        }
        if n >= 1 && (KNOWN_OS.contains(&parts[n - 1]) || KNOWN_ARCH.contains(&parts[n - 1])) {
            return self.matches_tag(parts[n - 1]);
        }
        true
    }
}

impl Default for BuildTarget {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Loads the member files of a Go package directory.
#[derive(Debug, Clone, Default)]
pub struct GoPackageLoader {
    target: BuildTarget,
}

impl GoPackageLoader {
    /// Creates a loader for the given build target.
    #[must_use]
    pub fn new(target: BuildTarget) -> Self {
        Self { target }
    }

    /// Returns the build target in use.
    #[must_use]
    pub fn target(&self) -> &BuildTarget {
        &self.target
    }

    fn is_candidate(&self, name: &str) -> bool {
        name.ends_with(".go")
            && !name.starts_with('_')
            && !name.starts_with('.')
            && self.target.matches_file_name(name)
    }
}

impl PackageLoader for GoPackageLoader {
    fn load(&self, dir: &Path) -> Result<SourcePackage, LoadError> {
        let to_load_error = |source| LoadError {
            dir: dir.to_path_buf(),
            source,
        };

        let mut pkg = SourcePackage::new(dir);
        for entry in std::fs::read_dir(dir).map_err(to_load_error)? {
            let entry = entry.map_err(to_load_error)?;
            let file_type = entry.file_type().map_err(to_load_error)?;
            // A symlink counts as a directory when its target is one.
            let is_dir = file_type.is_dir()
                || (file_type.is_symlink()
                    && std::fs::metadata(entry.path()).is_ok_and(|m| m.is_dir()));
            if is_dir {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if !self.is_candidate(&name) {
                debug!("Skipping {name} in {}", dir.display());
                continue;
            }

            // Unreadable files stay in the package so the check reports them.
            let package = std::fs::read_to_string(entry.path())
                .ok()
                .and_then(|src| package_name(&src));

            if name.ends_with("_test.go") {
                if package.as_deref().is_some_and(|p| p.ends_with("_test")) {
                    pkg.external_test_files.push(name);
                } else {
                    pkg.test_files.push(name);
                }
            } else {
                if pkg.name.is_none() {
                    pkg.name = package;
                }
                pkg.source_files.push(name);
            }
        }

        pkg.source_files.sort();
        pkg.test_files.sort();
        pkg.external_test_files.sort();

        debug!(
            "Loaded package {} ({}): {} source, {} test, {} external test file(s)",
            dir.display(),
            pkg.name.as_deref().unwrap_or("?"),
            pkg.source_files.len(),
            pkg.test_files.len(),
            pkg.external_test_files.len()
        );

        Ok(pkg)
    }
}

/// Reads the package name from the package clause, skipping leading comments.
fn package_name(source: &str) -> Option<String> {
    let mut rest = source.trim_start_matches('\u{feff}');
    loop {
        rest = rest.trim_start();
        if let Some(after) = rest.strip_prefix("//") {
            rest = after.split_once('\n').map_or("", |(_, tail)| tail);
        } else if let Some(after) = rest.strip_prefix("/*") {
            rest = after.split_once("*/")?.1;
        } else {
            break;
        }
    }
    PACKAGE_CLAUSE
        .captures(rest)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_owned())
}
