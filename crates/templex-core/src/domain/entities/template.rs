//! `Template`: a resolved, on-disk view of a `TemplateRef`.

use crate::domain::common::RelativePath;
use crate::domain::entities::{
    question::Question,
    task::{Migration, Task},
};
use std::path::PathBuf;

pub const DEFAULT_TEMPLATES_SUFFIX: &str = ".tmpl";
pub const DEFAULT_ANSWERS_FILE: &str = ".copier-answers.yml";

pub fn default_exclude() -> Vec<String> {
    vec![
        "copier.yaml".into(),
        "copier.yml".into(),
        "~*".into(),
        "*.pyc".into(),
        "*.pyo".into(),
        "__pycache__".into(),
        ".git".into(),
        ".DS_Store".into(),
        ".svn".into(),
    ]
}

/// Jinja-equivalent delimiter and whitespace settings for the template
/// engine, overridable per template via the `_envops` config key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvOps {
    pub block_start: String,
    pub block_end: String,
    pub variable_start: String,
    pub variable_end: String,
    pub comment_start: String,
    pub comment_end: String,
    pub keep_trailing_newline: bool,
}

impl Default for EnvOps {
    fn default() -> Self {
        Self {
            block_start: "[%".into(),
            block_end: "%]".into(),
            variable_start: "[[".into(),
            variable_end: "]]".into(),
            comment_start: "[#".into(),
            comment_end: "#]".into(),
            keep_trailing_newline: true,
        }
    }
}

/// A resolved template: a local working copy, plus everything parsed from
/// its config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub local_abspath: PathBuf,
    pub commit: Option<String>,
    pub url: String,
    pub subdirectory: String,
    pub templates_suffix: String,
    pub answers_relpath: RelativePath,
    pub exclude: Vec<String>,
    pub skip_if_exists: Vec<String>,
    pub envops: EnvOps,
    pub questions: Vec<Question>,
    pub secret_questions: Vec<String>,
    pub tasks: Vec<Task>,
    pub migrations: Vec<Migration>,
    pub min_engine_version: Option<String>,
}

impl Template {
    /// Absolute path to the copy root (the subdirectory setting, if any).
    pub fn copy_root(&self) -> PathBuf {
        if self.subdirectory.is_empty() {
            self.local_abspath.clone()
        } else {
            self.local_abspath.join(&self.subdirectory)
        }
    }

    pub fn is_vcs_tracked(&self) -> bool {
        self.commit.is_some()
    }

    /// Metadata entries to merge into an `AnswersMap`'s `metadata` layer.
    pub fn metadata_entries(&self) -> Vec<(String, crate::domain::common::Value)> {
        use crate::domain::common::Value;
        let mut out = vec![("_src_path".to_string(), Value::Str(self.url.clone()))];
        if let Some(commit) = &self.commit {
            out.push(("_commit".to_string(), Value::Str(commit.clone())));
        }
        out
    }

    /// Migrations applicable to an update spanning `from..=to`, grouped with
    /// their matched version for `VERSION_CURRENT` environment injection.
    pub fn migrations_for_range<'a>(
        &'a self,
        from: &semver::Version,
        to: &semver::Version,
    ) -> Vec<(&'a Migration, semver::Version)> {
        self.migrations
            .iter()
            .filter_map(|m| m.applies(from, to).map(|v| (m, v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_template() -> Template {
        Template {
            local_abspath: PathBuf::from("/tmp/t"),
            commit: Some("v1.0.0".into()),
            url: "https://example.com/t.git".into(),
            subdirectory: String::new(),
            templates_suffix: DEFAULT_TEMPLATES_SUFFIX.into(),
            answers_relpath: RelativePath::try_new(DEFAULT_ANSWERS_FILE).unwrap(),
            exclude: default_exclude(),
            skip_if_exists: vec![],
            envops: EnvOps::default(),
            questions: vec![],
            secret_questions: vec![],
            tasks: vec![],
            migrations: vec![],
            min_engine_version: None,
        }
    }

    #[test]
    fn copy_root_uses_subdirectory_when_set() {
        let mut t = base_template();
        t.subdirectory = "template".into();
        assert_eq!(t.copy_root(), PathBuf::from("/tmp/t/template"));
    }

    #[test]
    fn copy_root_defaults_to_local_abspath() {
        let t = base_template();
        assert_eq!(t.copy_root(), PathBuf::from("/tmp/t"));
    }

    #[test]
    fn metadata_entries_include_commit_when_vcs_tracked() {
        let t = base_template();
        let entries = t.metadata_entries();
        assert_eq!(entries.len(), 2);
    }
}
