//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces the application needs
//! from the outside world. Adapters in `templex-adapters` implement these.
//!
//! - **Driven (output) ports**: called by the application, implemented by
//!   infrastructure — `Filesystem`, `VersionControl`, `TemplateEngine`,
//!   `Prompter`, `TemplateConfigLoader`.
//! - **Driving (input) ports**: called by the CLI, implemented by the
//!   application services in this crate (no trait needed — the services
//!   themselves are the entry point).

pub mod output;

pub use output::{
    ApplyHunkStatus, Filesystem, ProcessRunner, Prompter, RawTemplateConfig, RenderedQuestion,
    TemplateConfigLoader, TemplateEngine, VersionControl,
};
