//! Check command implementation.

use anyhow::{Context, Result};
use importalias_core::Runner;
use importalias_go::{expand_patterns, GoExtractor, GoPackageLoader};
use importalias_rules::builtin_rules;
use std::io::Write;
use std::path::Path;

use super::Outcome;
use crate::config::Config;
use crate::config_resolver;

/// Runs the check command.
///
/// Violations go to stdout, one per line. A fatal run error is rendered to
/// stderr as a diagnostic and reported as [`Outcome::Fatal`].
pub fn run(packages: &[String], verbose: bool, config_path: Option<&Path>) -> Result<Outcome> {
    let source = config_resolver::resolve(Path::new("."), config_path);
    let config = Config::load(&source).context("failed to load configuration")?;
    if let Some(p) = source.path() {
        tracing::debug!("Using config: {}", p.display());
    }

    let patterns = if packages.is_empty() {
        config.analyzer.packages.as_slice()
    } else {
        packages
    };
    let dirs = expand_patterns(patterns, &config.analyzer.exclude)
        .context("failed to expand package patterns")?;

    let target = config.analyzer.build_target();
    tracing::debug!("Build target {}/{}", target.goos, target.goarch);

    let runner = Runner::new(
        builtin_rules(),
        Box::new(GoExtractor::new()),
        Box::new(GoPackageLoader::new(target)),
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = runner.run(&dirs, verbose, &mut out);
    out.flush().context("failed to flush output")?;

    match result {
        Ok(result) if result.failed() => Ok(Outcome::Violations),
        Ok(_) => Ok(Outcome::Clean),
        Err(err) => {
            eprintln!("{:?}", miette::Report::new(err));
            Ok(Outcome::Fatal)
        }
    }
}
