//! Application layer.
//!
//! This layer contains:
//! - **Services**: use case orchestration (config assembly, template
//!   resolution, question resolution, rendering, task execution, update).
//! - **Ports**: interface definitions (traits) for external dependencies.
//! - **Errors**: application-specific error types.
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;
pub mod value_convert;

pub use error::ApplicationError;
pub use ports::{
    Filesystem, ProcessRunner, Prompter, TemplateConfigLoader, TemplateEngine, VersionControl,
};
pub use services::{
    CopyOptions, Engine, QuestionResolver, RenderAction, RenderOptions, RenderPipeline, TaskRunner,
    TemplateResolver, cast_to_type, split_raw_document,
};
pub use value_convert::{value_from_json, value_from_yaml, value_to_json, value_to_yaml};
