//! # importalias-go
//!
//! Go frontend for importalias.
//!
//! This crate plugs Go support into `importalias-core`:
//!
//! - [`GoExtractor`] parses Go source with Tree-sitter and yields every
//!   import spec in declaration order
//! - [`GoPackageLoader`] resolves a directory into the package's
//!   implementation, test and external test files
//! - [`expand_patterns`] turns `./...` style arguments into package directories

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod extractor;
pub mod package;
pub mod pattern;

pub use extractor::GoExtractor;
pub use package::{BuildTarget, GoPackageLoader};
pub use pattern::{expand_patterns, PatternError};
