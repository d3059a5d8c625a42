//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! `templex-core` crate never sees it; render-time settings that originate
//! here are folded into `CopyOptions` at the call-site.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables (`TEMPLEX_*`, via the `config` crate)
//! 3. Config file (TOML, read via the `config` crate)
//! 4. Built-in defaults (always present)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default values applied when the matching CLI flag is absent.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    /// Default answers-file name, used when `--answers-file` is absent.
    pub answers_file: Option<String>,
    /// Whether to consider prerelease tags by default.
    pub prereleases: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: Defaults {
                answers_file: None,
                prereleases: false,
            },
            output: OutputConfig {
                no_color: false,
                format: "human".into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from `config_file` (or the default location),
    /// falling back to built-in defaults when neither exists.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let path = config_file
            .cloned()
            .unwrap_or_else(Self::config_path);

        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("TEMPLEX").separator("__"))
            .build()?;

        Ok(settings.try_deserialize().unwrap_or_else(|_| Self::default()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.templex.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "templex", "templex")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".templex.toml"))
    }
}
