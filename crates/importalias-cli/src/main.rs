//! importalias CLI tool.
//!
//! Usage:
//! ```bash
//! importalias check [OPTIONS] [PACKAGES]...
//! importalias list-rules
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod config_resolver;

use commands::Outcome;

/// Checks that Kubernetes API imports in Go packages use the conventional aliases
#[derive(Parser)]
#[command(name = "importalias")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check Go packages for import alias violations
    Check {
        /// Package directories or `dir/...` patterns (default: from config, else ".")
        packages: Vec<String>,
    },

    /// List the built-in alias rules
    ListRules,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match cli.command {
        Commands::Check { packages } => {
            commands::check::run(&packages, cli.verbose, cli.config.as_deref())
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(Outcome::Clean)
        }
    };

    match outcome {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            eprintln!("error: {err:#}");
            Outcome::Fatal.exit_code()
        }
    }
}

/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug over warn.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
