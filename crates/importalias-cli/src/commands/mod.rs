//! Subcommand implementations.

pub mod check;
pub mod list_rules;

use std::process::ExitCode;

/// How a command finished, mapped onto the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to report.
    Clean,
    /// At least one violation was written.
    Violations,
    /// The run could not complete.
    Fatal,
}

impl Outcome {
    /// 0, 1 and 2 respectively.
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Clean => ExitCode::SUCCESS,
            Self::Violations => ExitCode::from(1),
            Self::Fatal => ExitCode::from(2),
        }
    }
}
