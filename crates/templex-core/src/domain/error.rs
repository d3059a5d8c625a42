//! Domain error taxonomy: construction and validation failures.
//!
//! Business-rule violations only. Orchestration failures (a task exiting
//! non-zero, a VCS command failing) are `ApplicationError`.

use thiserror::Error;

/// Root domain error type.
///
/// All errors are cloneable (for retry/report logic), categorizable (for
/// CLI display), and actionable (carry suggestions).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("path must be relative: {path}")]
    PathNotRelative { path: String },

    #[error("question '{name}' declares unknown type '{type_name}'")]
    InvalidQuestionType { name: String, type_name: String },

    #[error("refusing to downgrade template from {from} to {to}")]
    DowngradeRefused { from: String, to: String },

    #[error("template requires engine version >= {required}, running {actual}")]
    UnsupportedEngineVersion { required: String, actual: String },

    #[error("no template reference recorded in destination answers file")]
    MissingTemplateReference,

    #[error("destination working tree has uncommitted changes")]
    DirtyWorkingTree,

    #[error("more than one config file found: {paths}")]
    AmbiguousConfigFile { paths: String },

    #[error("invalid config file {path}: {reason}")]
    InvalidConfigFile { path: String, reason: String },

    #[error("undefined variable while rendering: {0}")]
    UndefinedTemplateVariable(String),

    #[error("invalid version string '{value}': {reason}")]
    InvalidVersion { value: String, reason: String },
}

impl DomainError {
    /// User-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::PathNotRelative { path } => vec![
                format!("Path must not be absolute: {path}"),
                "Check the template's file layout".into(),
            ],
            Self::InvalidQuestionType { name, type_name } => vec![
                format!("Question '{name}' has type '{type_name}'"),
                "Valid types: bool, int, float, str, json, yaml".into(),
            ],
            Self::DowngradeRefused { from, to } => vec![
                format!("Current template is {from}, target is {to}"),
                "Pass an explicit --vcs-ref to force a specific revision".into(),
            ],
            Self::UnsupportedEngineVersion { required, actual } => vec![
                format!("This template requires engine version >= {required}, you have {actual}"),
                "Upgrade templex or choose an older template revision".into(),
            ],
            Self::MissingTemplateReference => vec![
                "The destination has no recorded template origin".into(),
                "Run `templex copy` first, or pass --answers-file explicitly".into(),
            ],
            Self::DirtyWorkingTree => {
                vec!["Commit or stash your changes before running update".into()]
            }
            Self::AmbiguousConfigFile { paths } => vec![
                format!("Found more than one config file: {paths}"),
                "Keep only one of copier.yml / copier.yaml".into(),
            ],
            Self::InvalidConfigFile { path, .. } => {
                vec![format!("Fix the YAML syntax in {path}")]
            }
            Self::UndefinedTemplateVariable(_) => {
                vec!["Add a default for the variable, or declare it as a question".into()]
            }
            Self::InvalidVersion { .. } => {
                vec!["Use a PEP 440 / semver-compatible version tag".into()]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::PathNotRelative { .. }
            | Self::InvalidQuestionType { .. }
            | Self::InvalidVersion { .. }
            | Self::DowngradeRefused { .. }
            | Self::DirtyWorkingTree => ErrorCategory::Validation,
            Self::UnsupportedEngineVersion { .. } => ErrorCategory::Compatibility,
            Self::MissingTemplateReference => ErrorCategory::NotFound,
            Self::AmbiguousConfigFile { .. } | Self::InvalidConfigFile { .. } => {
                ErrorCategory::Configuration
            }
            Self::UndefinedTemplateVariable(_) => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Configuration,
    Internal,
}
