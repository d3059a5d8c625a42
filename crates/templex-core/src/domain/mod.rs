//! Core domain layer for templex.
//!
//! This module contains pure business logic. Rendering, VCS plumbing,
//! interactive prompting, and YAML parsing are all handled behind ports
//! (traits) defined in the application layer and implemented in
//! `templex-adapters`.
//!
//! ## Hexagonal architecture compliance
//!
//! - **No async**: domain logic is synchronous.
//! - **No I/O**: no filesystem, network, subprocess, or terminal access.
//! - **Domain purity**: this module must not import `tracing`. Observability
//!   is the responsibility of the application and CLI layers.
//! - **Immutable-by-default entities**: domain objects are `Clone` + `PartialEq`.

pub mod common;
pub mod entities;
pub mod error;
mod validation;

pub use common::{RelativePath, Value, parse_template_version};
pub use entities::{
    AnswersMap, Choice, EnvOps, Migration, MigrationStage, Question, QuestionType, RenderContext,
    Subproject, Task, TaskCommand, Template, TemplateRef,
};
pub use error::{DomainError, ErrorCategory};
pub use validation::DomainValidator;
