use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - BOM processing completed, or the upload was skipped on purpose
    Success = 0,
    /// The server rejected the upload or a status check failed
    UploadFailed = 1,
    /// Invalid command-line arguments or missing required settings
    InvalidArguments = 2,
    /// Application error (unreadable BOM, client setup, config file I/O, etc.)
    ApplicationError = 3,
    /// The server did not finish processing before the deadline
    TimedOut = 4,
    /// Interrupted by the operator (Ctrl-C)
    Cancelled = 130,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::UploadFailed => write!(f, "Upload Failed (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
            ExitCode::TimedOut => write!(f, "Timed Out (4)"),
            ExitCode::Cancelled => write!(f, "Cancelled (130)"),
        }
    }
}

/// Errors surfaced by the upload-and-await workflow.
///
/// Each variant names the phase it came from so callers can pick an exit
/// status and operators can tell "the server never answered in time" apart
/// from "the server reported a failure".
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Missing or invalid setting: {setting}\nReason: {reason}\n\n💡 Hint: Pass --{setting}, set {env_var}, or add '{setting}' to the config file")]
    Configuration {
        setting: &'static str,
        env_var: &'static str,
        reason: String,
    },

    #[error("Failed to read BOM file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    BomRead { path: PathBuf, details: String },

    #[error("Failed to upload BOM for project {project}\nDetails: {details}\n\n💡 Hint: Check the server URL, the API key permissions (BOM_UPLOAD, PROJECT_CREATION_UPLOAD) and that the project exists or auto-create is enabled")]
    Submission { project: String, details: String },

    #[error("Failed to check processing status for token {token}\nDetails: {details}")]
    QueryFailed { token: String, details: String },

    #[error("BOM processing for token {token} did not finish within {}s\n\n💡 Hint: The server may still be processing the BOM. Raise --timeout for slow ingestion backends", waited.as_secs())]
    TimedOut { token: String, waited: Duration },

    #[error("Upload cancelled{}", token.as_ref().map(|t| format!(" while waiting for token {}", t)).unwrap_or_default())]
    Cancelled { token: Option<String> },
}

impl UploadError {
    /// Maps the error to the process exit status reported to CI.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            UploadError::Configuration { .. } => ExitCode::InvalidArguments,
            UploadError::BomRead { .. } => ExitCode::ApplicationError,
            UploadError::Submission { .. } | UploadError::QueryFailed { .. } => {
                ExitCode::UploadFailed
            }
            UploadError::TimedOut { .. } => ExitCode::TimedOut,
            UploadError::Cancelled { .. } => ExitCode::Cancelled,
        }
    }

    /// Short phase label used as a structured log field.
    pub fn phase(&self) -> &'static str {
        match self {
            UploadError::Configuration { .. } => "configuration",
            UploadError::BomRead { .. } => "bom-read",
            UploadError::Submission { .. } => "submission",
            UploadError::QueryFailed { .. } => "status-query",
            UploadError::TimedOut { .. } => "timeout",
            UploadError::Cancelled { .. } => "cancelled",
        }
    }
}
