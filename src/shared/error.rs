use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts to distinguish between configuration
/// problems and failures that happen while exploring the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Exploration completed and the report was written
    Success = 0,
    /// Invalid configuration file, configuration value, or unreadable input file
    ConfigurationError = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (registry error, resolution failure, output I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Maps an error returned by the application to the exit code reported to the shell.
    ///
    /// Errors that are not a [`VisualizerError`] are treated as application errors.
    pub fn from_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<VisualizerError>() {
            Some(VisualizerError::ConfigInvalid { .. })
            | Some(VisualizerError::FileUnreadable { .. }) => ExitCode::ConfigurationError,
            _ => ExitCode::ApplicationError,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ConfigurationError => write!(f, "Configuration Error (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Closed set of error kinds produced by dep-visualizer.
///
/// Errors travel through the crate as `anyhow::Error`; callers that need to
/// branch on the kind use `err.downcast_ref::<VisualizerError>()`.
#[derive(Debug, Error)]
pub enum VisualizerError {
    #[error("Invalid configuration: {reason}\n\n💡 Hint: Check the configuration file and command-line options")]
    ConfigInvalid { reason: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileUnreadable { path: PathBuf, details: String },

    #[error("Dependency source unavailable: {source_name}\nDetails: {details}")]
    SourceUnavailable { source_name: String, details: String },

    #[error("Failed to resolve dependencies of '{package}'\nDetails: {details}")]
    ResolutionFailed { package: String, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },
}

impl VisualizerError {
    pub fn config(reason: impl Into<String>) -> Self {
        VisualizerError::ConfigInvalid {
            reason: reason.into(),
        }
    }
}
