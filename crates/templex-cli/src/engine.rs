//! Wires the `templex-adapters` implementations into `templex_core::application::Engine`
//! and translates CLI-level arguments into `CopyOptions`.

use std::collections::BTreeMap;
use std::path::Path;

use templex_adapters::{
    CommandProcessRunner, GitVersionControl, LocalFilesystem, MinijinjaEngine,
    NonInteractivePrompter, YamlConfigLoader,
};
use templex_core::application::{CopyOptions, Engine, Prompter};
use templex_core::domain::{TemplateRef, Value};

use crate::cli::RenderArgs;
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// Owns every adapter instance the engine needs.
pub struct Adapters {
    fs: LocalFilesystem,
    vcs: GitVersionControl,
    config_loader: YamlConfigLoader,
    template_engine: MinijinjaEngine,
    process: CommandProcessRunner,
    prompter: Box<dyn Prompter>,
}

impl Adapters {
    pub fn new(force: bool) -> Self {
        Self {
            fs: LocalFilesystem::new(),
            vcs: GitVersionControl::new(),
            config_loader: YamlConfigLoader::new(),
            template_engine: MinijinjaEngine::new(),
            process: CommandProcessRunner::new(),
            prompter: build_prompter(force),
        }
    }

    pub fn engine(&self) -> Engine<'_> {
        Engine::new(
            &self.vcs,
            &self.config_loader,
            &self.fs,
            &self.template_engine,
            self.prompter.as_ref(),
            &self.process,
        )
    }
}

#[cfg(feature = "interactive")]
fn build_prompter(force: bool) -> Box<dyn Prompter> {
    if force || !std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        Box::new(NonInteractivePrompter::new())
    } else {
        Box::new(crate::prompter::DialoguerPrompter::new())
    }
}

#[cfg(not(feature = "interactive"))]
fn build_prompter(_force: bool) -> Box<dyn Prompter> {
    Box::new(NonInteractivePrompter::new())
}

/// Parse repeated `--data KEY=VALUE` flags into forced answers.
pub fn parse_forced_answers(data: &[String]) -> CliResult<BTreeMap<String, Value>> {
    let mut answers = BTreeMap::new();
    for raw in data {
        let (key, value) = raw.split_once('=').ok_or_else(|| CliError::InvalidDataArgument {
            raw: raw.clone(),
        })?;
        answers.insert(key.to_string(), Value::Str(value.to_string()));
    }
    Ok(answers)
}

/// Build `CopyOptions` from the shared render flags.
pub fn copy_options(render: &RenderArgs) -> CliResult<CopyOptions> {
    Ok(CopyOptions {
        answers_file: render.answers_file.clone(),
        forced_answers: parse_forced_answers(&render.data)?,
        extra_exclude: render.exclude.clone(),
        extra_skip_if_exists: render.skip.clone(),
        force: render.force,
        pretend: render.pretend,
        quiet: render.quiet,
        ask_user: !render.force,
        cleanup_on_error: !render.no_cleanup,
    })
}

/// Build `CopyOptions`, falling back to `config`'s defaults for flags the
/// user left unset.
pub fn copy_options_with_config(render: &RenderArgs, config: &AppConfig) -> CliResult<CopyOptions> {
    let mut options = copy_options(render)?;
    if options.answers_file.is_none() {
        options.answers_file = config.defaults.answers_file.clone();
    }
    Ok(options)
}

/// Build the `TemplateRef` a render flag set resolves to.
pub fn template_ref(src_path: &str, render: &RenderArgs) -> TemplateRef {
    let mut template_ref = TemplateRef::new(src_path).with_prereleases(render.prereleases);
    if let Some(vcs_ref) = &render.vcs_ref {
        template_ref = template_ref.with_ref(vcs_ref.clone());
    }
    template_ref
}

/// [`template_ref`], but falls back to `config`'s default for `--prereleases`
/// when the flag was left unset.
pub fn template_ref_with_config(src_path: &str, render: &RenderArgs, config: &AppConfig) -> TemplateRef {
    let prereleases = render.prereleases || config.defaults.prereleases;
    let mut template_ref = TemplateRef::new(src_path).with_prereleases(prereleases);
    if let Some(vcs_ref) = &render.vcs_ref {
        template_ref = template_ref.with_ref(vcs_ref.clone());
    }
    template_ref
}

/// `true` if `destination` already looks like a previously-rendered project,
/// i.e. it contains an answers file.
pub fn has_answers_file(destination: &Path, render: &RenderArgs, config: &AppConfig) -> bool {
    answers_file_path(destination, render, config).is_file()
}

fn answers_file_path(destination: &Path, render: &RenderArgs, config: &AppConfig) -> std::path::PathBuf {
    let name = render
        .answers_file
        .as_deref()
        .or(config.defaults.answers_file.as_deref())
        .unwrap_or(".copier-answers.yml");
    destination.join(name)
}

/// Read the template URL (`_src_path`) a previous `copy`/`update` stored in
/// the destination's answers file.
pub fn stored_template_url(destination: &Path, render: &RenderArgs, config: &AppConfig) -> CliResult<String> {
    let path = answers_file_path(destination, render, config);
    let contents = std::fs::read_to_string(&path).map_err(|_| CliError::InvalidInput {
        message: format!(
            "{} has no answers file; run `templex copy` first",
            destination.display()
        ),
        source: None,
    })?;
    let doc: serde_yaml::Value =
        serde_yaml::from_str(&contents).map_err(|e| CliError::ConfigError {
            message: format!("failed to parse {}: {e}", path.display()),
            source: Some(Box::new(e)),
        })?;
    doc.get("_src_path")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| CliError::InvalidInput {
            message: format!("{} is missing a `_src_path` entry", path.display()),
            source: None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_args() -> RenderArgs {
        RenderArgs {
            answers_file: None,
            exclude: vec![],
            skip: vec![],
            vcs_ref: None,
            prereleases: false,
            force: false,
            pretend: false,
            quiet: false,
            no_cleanup: false,
            data: vec![],
        }
    }

    #[test]
    fn parse_forced_answers_splits_on_first_equals() {
        let answers = parse_forced_answers(&["name=demo=project".to_string()]).unwrap();
        assert_eq!(
            answers.get("name"),
            Some(&Value::Str("demo=project".to_string()))
        );
    }

    #[test]
    fn parse_forced_answers_rejects_missing_separator() {
        let err = parse_forced_answers(&["name".to_string()]).unwrap_err();
        assert!(matches!(err, CliError::InvalidDataArgument { .. }));
    }

    #[test]
    fn copy_options_maps_force_to_ask_user_false() {
        let mut render = render_args();
        render.force = true;
        let options = copy_options(&render).unwrap();
        assert!(!options.ask_user);
        assert!(options.force);
    }

    #[test]
    fn copy_options_no_cleanup_inverts_cleanup_on_error() {
        let mut render = render_args();
        render.no_cleanup = true;
        let options = copy_options(&render).unwrap();
        assert!(!options.cleanup_on_error);
    }

    #[test]
    fn template_ref_carries_vcs_ref_and_prereleases() {
        let mut render = render_args();
        render.vcs_ref = Some("v2.0.0".to_string());
        render.prereleases = true;
        let template_ref = template_ref("gh:org/tmpl", &render);
        assert_eq!(template_ref.vcs_ref(), Some("v2.0.0"));
        assert!(template_ref.use_prereleases());
    }

    #[test]
    fn has_answers_file_false_for_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!has_answers_file(dir.path(), &render_args(), &AppConfig::default()));
    }

    #[test]
    fn copy_options_with_config_falls_back_to_config_answers_file() {
        let render = render_args();
        let mut config = AppConfig::default();
        config.defaults.answers_file = Some(".answers.yml".to_string());
        let options = copy_options_with_config(&render, &config).unwrap();
        assert_eq!(options.answers_file.as_deref(), Some(".answers.yml"));
    }

    #[test]
    fn template_ref_with_config_honors_config_prereleases() {
        let render = render_args();
        let mut config = AppConfig::default();
        config.defaults.prereleases = true;
        let template_ref = template_ref_with_config("gh:org/tmpl", &render, &config);
        assert!(template_ref.use_prereleases());
    }
}
