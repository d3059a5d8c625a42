//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! and help text. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "templex",
    bin_name = "templex",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Render and update projects from templates",
    long_about = "templex renders project scaffolding from a template repository \
                  and keeps previously generated projects in sync with upstream \
                  template changes.",
    after_help = "EXAMPLES:\n\
        \x20 templex copy gh:my-org/my-template my-project\n\
        \x20 templex update my-project\n\
        \x20 templex auto gh:my-org/my-template my-project\n\
        \x20 templex completions bash > /usr/share/bash-completion/completions/templex",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a template into a new destination.
    #[command(
        about = "Render a template into a new or empty destination",
        after_help = "EXAMPLES:\n\
            \x20 templex copy gh:my-org/my-template my-project\n\
            \x20 templex copy ./local-template my-project --data name=demo"
    )]
    Copy(CopyArgs),

    /// Re-render a previously generated project against a newer template revision.
    #[command(
        about = "Update a project to the latest (or a pinned) template revision",
        after_help = "EXAMPLES:\n\
            \x20 templex update my-project\n\
            \x20 templex update my-project --vcs-ref v2.0.0"
    )]
    Update(UpdateArgs),

    /// Copy or update, chosen by whether the destination already has answers.
    #[command(
        about = "Copy or update, auto-detected from the destination",
        after_help = "EXAMPLES:\n\
            \x20 templex auto gh:my-org/my-template my-project"
    )]
    Auto(AutoArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 templex completions bash > ~/.local/share/bash-completion/completions/templex\n\
            \x20 templex completions zsh  > ~/.zfunc/_templex\n\
            \x20 templex completions fish > ~/.config/fish/completions/templex.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the templex configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 templex config get answers_file\n\
            \x20 templex config set answers_file .copier-answers.yml\n\
            \x20 templex config list"
    )]
    Config(ConfigCommands),
}

// ── shared render flags ───────────────────────────────────────────────────────

/// Flags shared by `copy`, `update`, and `auto` (§6 CLI surface).
#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    /// Answers file name, relative to the destination root.
    #[arg(long = "answers-file", value_name = "PATH")]
    pub answers_file: Option<String>,

    /// Extra exclude glob, on top of the template's own `_exclude` (repeatable).
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Extra skip-if-exists glob (repeatable).
    #[arg(long = "skip", value_name = "GLOB")]
    pub skip: Vec<String>,

    /// Git ref (tag, branch, or commit) to resolve the template at.
    #[arg(long = "vcs-ref", value_name = "REF")]
    pub vcs_ref: Option<String>,

    /// Consider prerelease tags when resolving the latest version.
    #[arg(long = "prereleases")]
    pub prereleases: bool,

    /// Overwrite existing files without prompting.
    #[arg(long = "force")]
    pub force: bool,

    /// Run without writing anything to disk.
    #[arg(long = "pretend")]
    pub pretend: bool,

    /// Suppress per-file render progress output.
    #[arg(long = "quiet")]
    pub quiet: bool,

    /// Leave a partially-written destination in place on failure.
    #[arg(long = "no-cleanup")]
    pub no_cleanup: bool,

    /// Force an answer for a question, bypassing the prompt: `KEY=VALUE` (repeatable).
    #[arg(long = "data", value_name = "KEY=VALUE")]
    pub data: Vec<String>,
}

// ── copy ──────────────────────────────────────────────────────────────────────

/// Arguments for `templex copy`.
#[derive(Debug, Args)]
pub struct CopyArgs {
    /// Template source: a local path or a VCS URL.
    #[arg(value_name = "TEMPLATE")]
    pub src_path: String,

    /// Destination directory to render into.
    #[arg(value_name = "DESTINATION")]
    pub destination: PathBuf,

    #[command(flatten)]
    pub render: RenderArgs,
}

// ── update ────────────────────────────────────────────────────────────────────

/// Arguments for `templex update`.
#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Destination directory to update in place.
    #[arg(value_name = "DESTINATION", default_value = ".")]
    pub destination: PathBuf,

    #[command(flatten)]
    pub render: RenderArgs,
}

// ── auto ──────────────────────────────────────────────────────────────────────

/// Arguments for `templex auto`.
#[derive(Debug, Args)]
pub struct AutoArgs {
    /// Template source: a local path or a VCS URL. Omit to update in place.
    #[arg(value_name = "TEMPLATE")]
    pub src_path: Option<String>,

    /// Destination directory.
    #[arg(value_name = "DESTINATION", default_value = ".")]
    pub destination: PathBuf,

    #[command(flatten)]
    pub render: RenderArgs,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `templex completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `templex config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `answers_file`.
        key: String,
    },
    /// Set a configuration key to a value.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
