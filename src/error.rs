//! Structured error handling and exit codes.

use std::path::PathBuf;

use serde::Serialize;

use crate::duplicates::CompareError;
use crate::scanner::ScanError;

/// Exit codes for the dup application.
///
/// - 0: Success (completed normally, with or without duplicates)
/// - 1: Invalid arguments, or a fatal error during the run
/// - 130: Interrupted by user (Ctrl+C)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Completed normally, including "no duplicates found".
    Success,
    /// Bad command-line input. No engine work was performed.
    InvalidArguments,
    /// Listing or comparison failed and the run was aborted.
    GeneralError,
    /// Interrupted by user (Ctrl+C).
    Interrupted,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::InvalidArguments | Self::GeneralError => 1,
            Self::Interrupted => 130,
        }
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DUP000",
            Self::InvalidArguments => "DUP001",
            Self::GeneralError => "DUP002",
            Self::Interrupted => "DUP130",
        }
    }
}

/// Errors that abort a run.
///
/// Every variant is fatal: the run stops and no duplicate report is shown.
/// Deletion failures are not represented here since they never abort.
#[derive(thiserror::Error, Debug)]
pub enum DupError {
    /// Bad command-line input or configuration.
    #[error("{0}")]
    InvalidArguments(String),

    /// A directory could not be listed.
    #[error(transparent)]
    Traversal(#[from] ScanError),

    /// A file could not be opened, stat'd or read during comparison.
    #[error(transparent)]
    Compare(#[from] CompareError),

    /// The run was interrupted by user (Ctrl+C or shutdown signal).
    #[error("Interrupted by user")]
    Interrupted,

    /// Configuration could not be loaded.
    #[error("Invalid configuration in {path}: {message}")]
    Config {
        /// Source of the bad configuration
        path: PathBuf,
        /// What went wrong
        message: String,
    },
}

impl DupError {
    /// The exit code the binary should terminate with for this error.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::InvalidArguments(_) | Self::Config { .. } => ExitCode::InvalidArguments,
            Self::Traversal(_) | Self::Compare(_) => ExitCode::GeneralError,
            Self::Interrupted => ExitCode::Interrupted,
        }
    }
}

/// Map an `anyhow` error from [`crate::run_app`] to an exit code.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    err.downcast_ref::<DupError>()
        .map_or(ExitCode::GeneralError, DupError::exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 1);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::Interrupted.as_i32(), 130);
    }

    #[test]
    fn test_code_prefixes_are_distinct() {
        let prefixes = [
            ExitCode::Success.code_prefix(),
            ExitCode::InvalidArguments.code_prefix(),
            ExitCode::GeneralError.code_prefix(),
            ExitCode::Interrupted.code_prefix(),
        ];
        for (i, a) in prefixes.iter().enumerate() {
            for b in &prefixes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_dup_error_exit_codes() {
        assert_eq!(
            DupError::InvalidArguments("x".into()).exit_code(),
            ExitCode::InvalidArguments
        );
        assert_eq!(DupError::Interrupted.exit_code(), ExitCode::Interrupted);

        let err = DupError::from(CompareError::Open {
            path: PathBuf::from("/a"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        });
        assert_eq!(err.exit_code(), ExitCode::GeneralError);

        let err = DupError::from(ScanError::NotFound(PathBuf::from("/missing")));
        assert_eq!(err.exit_code(), ExitCode::GeneralError);
    }

    #[test]
    fn test_exit_code_for_anyhow() {
        let err = anyhow::Error::new(DupError::Interrupted);
        assert_eq!(exit_code_for(&err), ExitCode::Interrupted);

        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code_for(&err), ExitCode::GeneralError);
    }
}
