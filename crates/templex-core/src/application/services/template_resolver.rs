//! Template Locator + Config Loader orchestration (§4.A, §4.B).
//!
//! Resolves a `TemplateRef` into a local working copy, selects a VCS ref when
//! the caller didn't pin one, loads the config file, and assembles a
//! `Template`.

use std::path::PathBuf;

use crate::application::ApplicationError;
use crate::application::ports::output::{Filesystem, TemplateConfigLoader, VersionControl};
use crate::domain::common::RelativePath;
use crate::domain::entities::template::{
    DEFAULT_ANSWERS_FILE, DEFAULT_TEMPLATES_SUFFIX, EnvOps, Template, default_exclude,
};
use crate::domain::{DomainValidator, TemplateRef, parse_template_version};

/// Candidate tags are filtered to those `semver`-parseable (tolerating a
/// leading `v`); the highest wins, with prereleases excluded unless
/// `use_prereleases` is set.
fn select_tag(tags: &[String], use_prereleases: bool) -> Option<String> {
    let mut candidates: Vec<(semver::Version, &String)> = tags
        .iter()
        .filter_map(|t| parse_template_version(t).ok().map(|v| (v, t)))
        .filter(|(v, _)| use_prereleases || v.pre.is_empty())
        .collect();
    candidates.sort_by(|a, b| a.0.cmp(&b.0));
    candidates.last().map(|(_, t)| (*t).clone())
}

pub struct TemplateResolver<'a> {
    vcs: &'a dyn VersionControl,
    config_loader: &'a dyn TemplateConfigLoader,
    fs: &'a dyn Filesystem,
}

impl<'a> TemplateResolver<'a> {
    pub fn new(
        vcs: &'a dyn VersionControl,
        config_loader: &'a dyn TemplateConfigLoader,
        fs: &'a dyn Filesystem,
    ) -> Self {
        Self {
            vcs,
            config_loader,
            fs,
        }
    }

    /// Resolve `template_ref` into a fully assembled `Template`.
    ///
    /// For a VCS URL: clone, pick the ref (pinned, or highest matching tag,
    /// or `HEAD` when the repo has no tags at all), then checkout and
    /// describe. For a local path: use it directly, with no commit pin.
    pub fn resolve(&self, template_ref: &TemplateRef) -> Result<Template, ApplicationError> {
        let (local_abspath, commit) = if self.vcs.is_repo_url(template_ref.url()) {
            let checkout = self.vcs.clone(template_ref.url(), template_ref.vcs_ref())?;
            let commit = match template_ref.vcs_ref() {
                Some(r) => {
                    self.vcs.checkout(&checkout, r)?;
                    r.to_string()
                }
                None => {
                    let tags = self.vcs.tags(&checkout)?;
                    match select_tag(&tags, template_ref.use_prereleases()) {
                        Some(tag) => {
                            self.vcs.checkout(&checkout, &tag)?;
                            tag
                        }
                        None => self.vcs.describe(&checkout)?,
                    }
                }
            };
            (checkout, Some(commit))
        } else {
            (PathBuf::from(template_ref.url()), None)
        };

        if !self.fs.exists(&local_abspath) {
            return Err(ApplicationError::TemplateResolutionFailed {
                reason: format!("template path does not exist: {}", local_abspath.display()),
            });
        }

        let raw = self.config_loader.load(&local_abspath)?;

        let templates_suffix = raw
            .templates_suffix
            .unwrap_or_else(|| DEFAULT_TEMPLATES_SUFFIX.to_string());
        let answers_file = raw
            .answers_file
            .unwrap_or_else(|| DEFAULT_ANSWERS_FILE.to_string());
        let answers_relpath = RelativePath::try_new(answers_file).map_err(|e| {
            ApplicationError::TemplateResolutionFailed {
                reason: e.to_string(),
            }
        })?;

        let mut envops = EnvOps::default();
        for (key, value) in &raw.envops_overrides {
            apply_envops_override(&mut envops, key, value);
        }

        DomainValidator::validate_migrations_parse(&raw.migrations).map_err(|e| {
            ApplicationError::TemplateResolutionFailed {
                reason: e.to_string(),
            }
        })?;

        let template = Template {
            local_abspath,
            commit,
            url: template_ref.url().to_string(),
            subdirectory: raw.subdirectory,
            templates_suffix,
            answers_relpath,
            exclude: raw.exclude.unwrap_or_else(default_exclude),
            skip_if_exists: raw.skip_if_exists,
            envops,
            questions: raw.questions,
            secret_questions: raw.secret_questions,
            tasks: raw.tasks,
            migrations: raw.migrations,
            min_engine_version: raw.min_copier_version,
        };

        DomainValidator::validate_min_engine_version(&template, env!("CARGO_PKG_VERSION"))
            .map_err(|e| ApplicationError::TemplateResolutionFailed {
                reason: e.to_string(),
            })?;

        Ok(template)
    }
}

fn apply_envops_override(envops: &mut EnvOps, key: &str, value: &str) {
    match key {
        "block_start_string" => envops.block_start = value.to_string(),
        "block_end_string" => envops.block_end = value.to_string(),
        "variable_start_string" => envops.variable_start = value.to_string(),
        "variable_end_string" => envops.variable_end = value.to_string(),
        "comment_start_string" => envops.comment_start = value.to_string(),
        "comment_end_string" => envops.comment_end = value.to_string(),
        "keep_trailing_newline" => envops.keep_trailing_newline = value == "true",
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_tag_picks_highest_stable_by_default() {
        let tags = vec!["v1.0.0".into(), "v1.2.0".into(), "v2.0.0-rc1".into()];
        assert_eq!(select_tag(&tags, false), Some("v1.2.0".to_string()));
    }

    #[test]
    fn select_tag_includes_prereleases_when_requested() {
        let tags = vec!["v1.0.0".into(), "v2.0.0-rc1".into()];
        assert_eq!(select_tag(&tags, true), Some("v2.0.0-rc1".to_string()));
    }

    #[test]
    fn select_tag_ignores_unparseable_tags() {
        let tags = vec!["not-a-version".into(), "v1.0.0".into()];
        assert_eq!(select_tag(&tags, false), Some("v1.0.0".to_string()));
    }

    #[test]
    fn select_tag_empty_when_no_candidates() {
        let tags = vec!["latest".into()];
        assert_eq!(select_tag(&tags, false), None);
    }
}
