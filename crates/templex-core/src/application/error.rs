//! Application layer errors.
//!
//! These errors represent orchestration failures — a port call that failed —
//! not business-rule violations. Business-rule violations are `DomainError`.

use thiserror::Error;

use crate::error::ErrorCategory;

#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    #[error("failed to resolve template: {reason}")]
    TemplateResolutionFailed { reason: String },

    #[error("task {index} of {total} failed with exit code {exit_code}: {command}")]
    TaskFailed {
        index: usize,
        total: usize,
        command: String,
        exit_code: i32,
    },

    #[error("vcs operation '{operation}' failed: {reason}")]
    VcsOperationFailed { operation: String, reason: String },

    #[error("rendering failed for {path}: {reason}")]
    RenderingFailed { path: String, reason: String },

    #[error("answers file at {path} is corrupt: {reason}")]
    AnswersFileCorrupt { path: String, reason: String },

    #[error("required adapter not configured: {name}")]
    AdapterNotConfigured { name: &'static str },

    #[error("filesystem error at {path}: {reason}")]
    FilesystemError { path: String, reason: String },

    #[error("user cancelled the operation")]
    Cancelled,
}

impl ApplicationError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateResolutionFailed { reason } => vec![
                format!("Resolution failed: {reason}"),
                "Check the template URL/path and --vcs-ref".into(),
            ],
            Self::TaskFailed {
                command, exit_code, ..
            } => vec![
                format!("Task `{command}` exited with code {exit_code}"),
                "Run the command manually in the destination to debug it".into(),
            ],
            Self::VcsOperationFailed { operation, reason } => vec![
                format!("git {operation} failed: {reason}"),
                "Ensure git is installed and the repository is reachable".into(),
            ],
            Self::RenderingFailed { path, reason } => vec![
                format!("Failed to render {path}: {reason}"),
                "Check for undefined variables or malformed template syntax".into(),
            ],
            Self::AnswersFileCorrupt { path, .. } => vec![
                format!("Could not parse answers file at {path}"),
                "Delete or fix the file, or pass --answers-file explicitly".into(),
            ],
            Self::AdapterNotConfigured { name } => vec![
                format!("Missing required component: {name}"),
                "This is a wiring bug, not a user error".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {path}"),
                "Check permissions and that the parent directory exists".into(),
            ],
            Self::Cancelled => vec!["Re-run and confirm when prompted".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateResolutionFailed { .. } => ErrorCategory::NotFound,
            Self::TaskFailed { .. } => ErrorCategory::Internal,
            Self::VcsOperationFailed { .. } => ErrorCategory::Internal,
            Self::RenderingFailed { .. } => ErrorCategory::Validation,
            Self::AnswersFileCorrupt { .. } => ErrorCategory::Configuration,
            Self::AdapterNotConfigured { .. } => ErrorCategory::Configuration,
            Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::Cancelled => ErrorCategory::Validation,
        }
    }
}
