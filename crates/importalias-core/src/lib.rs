//! # importalias-core
//!
//! Core framework for enforcing import alias conventions.
//!
//! This crate holds the language-agnostic parts of the linter:
//!
//! - [`AliasRule`] trait and the ordered [`RuleTable`] that derives an
//!   expected alias from an import path
//! - [`check_import`] for comparing one [`ImportObservation`] against the table
//! - [`LanguageExtractor`] and [`PackageLoader`] traits, the seams where a
//!   language frontend plugs in
//! - [`Runner`] for checking whole packages and streaming [`Violation`]s
//!
//! ## Example
//!
//! ```ignore
//! use importalias_core::Runner;
//!
//! let runner = Runner::new(rules, Box::new(extractor), Box::new(loader));
//! let result = runner.run(&["./pkg/controller"], false, &mut std::io::stdout())?;
//! if result.failed() {
//!     std::process::exit(1);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod checker;
mod extractor;
mod loader;
mod paths;
mod rule;
mod runner;
mod types;

pub use checker::check_import;
pub use extractor::{ImportObservation, LanguageExtractor, SyntaxError};
pub use loader::{LoadError, PackageLoader, SourcePackage};
pub use paths::{clean_path, join_package_file};
pub use rule::{AliasRule, Expectation, RuleBox, RuleTable};
pub use runner::{RunError, Runner};
pub use types::{Location, RunResult, Violation, ViolationKind};
