//! Templex Core — hexagonal architecture implementation.
//!
//! This crate provides the domain and application layers for the templex
//! project scaffolding and update engine, following hexagonal (ports and
//! adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            templex-cli (CLI)             │
//! │       (Implements Driving Ports)         │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services            │
//! │  (config assembly, template resolution,  │
//! │   question resolution, render, tasks,    │
//! │   update orchestration)                  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)          │
//! │ (Filesystem, VersionControl, Template-   │
//! │  Engine, Prompter, TemplateConfigLoader) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      templex-adapters (Infrastructure)    │
//! │  (LocalFilesystem, GitVersionControl,    │
//! │   MinijinjaEngine, YamlConfigLoader)     │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Domain Layer (Pure Logic)        │
//! │ (Template, Question, AnswersMap,          │
//! │  Subproject, Task, Migration)             │
//! │         No External Dependencies          │
//! └─────────────────────────────────────────┘
//! ```

pub mod domain;

pub mod application;

pub mod error;

/// Public API - what external crates should use.
pub mod prelude {
    pub use crate::application::{
        ApplicationError, CopyOptions, Engine, Filesystem, ProcessRunner, Prompter,
        QuestionResolver, RenderAction, RenderOptions, RenderPipeline, TaskRunner,
        TemplateConfigLoader, TemplateEngine, TemplateResolver, VersionControl, cast_to_type,
        split_raw_document, value_from_json, value_from_yaml, value_to_json, value_to_yaml,
    };
    pub use crate::domain::{
        AnswersMap, Choice, DomainError, EnvOps, Migration, MigrationStage, Question,
        QuestionType, RenderContext, Subproject, Task, TaskCommand, Template, TemplateRef,
    };
    pub use crate::error::{Context, TemplexError, TemplexResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
