//! Driven (output) ports — implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `templex-adapters` crate provides implementations; `templex-core`'s
//! own test modules provide `mockall`-generated fakes.

use std::path::{Path, PathBuf};

use crate::application::ApplicationError;
use crate::domain::{Choice, EnvOps, Migration, Question, RenderContext, Task, TaskCommand};

/// Port for filesystem operations.
///
/// Implemented by `templex_adapters::filesystem::{LocalFilesystem, MemoryFilesystem}`.
/// Paths passed in are always either absolute (destination/template roots)
/// or relative to one of those roots — never ambiguous.
pub trait Filesystem: Send + Sync {
    fn create_dir_all(&self, path: &Path) -> Result<(), ApplicationError>;
    fn write_file(&self, path: &Path, content: &[u8]) -> Result<(), ApplicationError>;
    fn read_file(&self, path: &Path) -> Result<Vec<u8>, ApplicationError>;
    fn read_to_string(&self, path: &Path) -> Result<String, ApplicationError>;
    fn exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
    fn remove_dir_all(&self, path: &Path) -> Result<(), ApplicationError>;
    fn remove_file(&self, path: &Path) -> Result<(), ApplicationError>;
    /// Immediate children of `path`, sorted lexicographically by file name,
    /// for deterministic walk order.
    fn read_dir_sorted(&self, path: &Path) -> Result<Vec<PathBuf>, ApplicationError>;
    /// Glob-match files relative to `base`, sorted.
    fn glob(&self, base: &Path, pattern: &str) -> Result<Vec<PathBuf>, ApplicationError>;
}

/// Per-hunk outcome of a `git apply --reject` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyHunkStatus {
    Applied { file: String },
    Rejected { file: String, reject_path: String },
}

/// Port for VCS plumbing (§6). The engine only ever shells out through this
/// port — no direct `git` invocations live outside its implementation.
pub trait VersionControl: Send + Sync {
    /// True when `url` should be treated as a VCS remote rather than a local path.
    fn is_repo_url(&self, url: &str) -> bool;

    /// Shallow-clone `url` (optionally at `vcs_ref`) into a fresh temp dir.
    fn clone(&self, url: &str, vcs_ref: Option<&str>) -> Result<PathBuf, ApplicationError>;

    fn checkout(&self, path: &Path, vcs_ref: &str) -> Result<(), ApplicationError>;
    fn describe(&self, path: &Path) -> Result<String, ApplicationError>;
    fn tags(&self, path: &Path) -> Result<Vec<String>, ApplicationError>;
    fn is_clean(&self, path: &Path) -> Result<bool, ApplicationError>;

    fn init(&self, path: &Path) -> Result<(), ApplicationError>;
    fn add_all(&self, path: &Path) -> Result<(), ApplicationError>;
    fn commit(&self, path: &Path, message: &str, allow_empty: bool) -> Result<(), ApplicationError>;
    fn set_config(&self, path: &Path, key: &str, value: &str) -> Result<(), ApplicationError>;
    fn add_remote(&self, path: &Path, name: &str, url: &str) -> Result<(), ApplicationError>;
    fn fetch(
        &self,
        path: &Path,
        remote: &str,
        refspec: &str,
        depth: u32,
    ) -> Result<(), ApplicationError>;

    /// `diff-tree --unified=1 <range>`, with `--inter-hunk-context=<n>` when
    /// `inter_hunk_context` is `Some` (the orchestrator retries with `Some(0)`
    /// if `Some(-1)` is rejected by the installed git).
    fn diff(
        &self,
        path: &Path,
        range: &str,
        inter_hunk_context: Option<i64>,
    ) -> Result<String, ApplicationError>;

    fn apply(
        &self,
        path: &Path,
        diff: &str,
        excludes: &[String],
    ) -> Result<Vec<ApplyHunkStatus>, ApplicationError>;
}

/// Port for running a single post-render task (§4.F) to completion.
///
/// Implemented in `templex-adapters` with `std::process::Command`, executed
/// with `cwd` set to the subproject root and `extra_env` layered over the
/// inherited environment.
pub trait ProcessRunner: Send + Sync {
    fn run(
        &self,
        cwd: &Path,
        command: &TaskCommand,
        extra_env: &[(String, String)],
    ) -> Result<i32, ApplicationError>;
}

/// Port for the sandboxed template engine (§4.E, §5).
pub trait TemplateEngine: Send + Sync {
    /// Render a single template string against `ctx`, using `envops` for
    /// delimiters. Must expose the `to_nice_yaml` filter (§9).
    fn render_str(
        &self,
        template: &str,
        ctx: &RenderContext,
        envops: &EnvOps,
    ) -> Result<String, ApplicationError>;
}

/// What the interactive prompter needs to show for one question, with every
/// templated field already rendered.
#[derive(Debug, Clone)]
pub struct RenderedQuestion<'a> {
    pub message: &'a str,
    pub type_name: &'static str,
    pub secret: bool,
    pub help: Option<String>,
    pub placeholder: Option<String>,
    pub default_display: String,
    pub choices: Option<Vec<Choice>>,
}

/// Port for interactive prompting (§4.D). A non-interactive implementation
/// (used with `--force`/scripted runs) returns the supplied default without
/// blocking on stdin.
pub trait Prompter: Send + Sync {
    fn is_interactive(&self) -> bool;
    fn ask(
        &self,
        question: &Question,
        rendered: &RenderedQuestion<'_>,
    ) -> Result<String, ApplicationError>;
    fn confirm(&self, message: &str, default: bool) -> Result<bool, ApplicationError>;
}

/// A template's config file, parsed and split into settings vs. questions,
/// before domain-level assembly into a `Template`.
#[derive(Debug, Clone, Default)]
pub struct RawTemplateConfig {
    pub subdirectory: String,
    pub exclude: Option<Vec<String>>,
    pub skip_if_exists: Vec<String>,
    pub envops_overrides: Vec<(String, String)>,
    pub tasks: Vec<Task>,
    pub migrations: Vec<Migration>,
    pub answers_file: Option<String>,
    pub templates_suffix: Option<String>,
    pub min_copier_version: Option<String>,
    pub questions: Vec<Question>,
    pub secret_questions: Vec<String>,
}

/// Port for loading and splitting a template's `copier.{yml,yaml}` (§4.B),
/// including `!include` glob splicing. Implemented in `templex-adapters`
/// with `serde_yaml` + `glob`, since the splicing mechanics are YAML-specific.
pub trait TemplateConfigLoader: Send + Sync {
    fn load(&self, template_root: &Path) -> Result<RawTemplateConfig, ApplicationError>;
}
