//! `Subproject`: the destination side of a render/update.

use crate::domain::common::{RelativePath, Value};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The destination project: where answers were last recorded, and what they
/// said about the template that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Subproject {
    pub local_abspath: PathBuf,
    pub answers_relpath: RelativePath,
    pub last_answers: BTreeMap<String, Value>,
    pub is_vcs_tracked: bool,
}

impl Subproject {
    pub fn new(local_abspath: PathBuf, answers_relpath: RelativePath) -> Self {
        Self {
            local_abspath,
            answers_relpath,
            last_answers: BTreeMap::new(),
            is_vcs_tracked: false,
        }
    }

    pub fn with_last_answers(mut self, answers: BTreeMap<String, Value>) -> Self {
        self.last_answers = answers;
        self
    }

    /// `{ url: last_answers["_src_path"], ref: last_answers["_commit"] }`,
    /// when both are present — the template an `update` should resolve `new`
    /// against `old`.
    pub fn template_ref_from_answers(&self) -> Option<(String, String)> {
        let url = self.last_answers.get("_src_path")?.as_str()?.to_string();
        let commit = self.last_answers.get("_commit")?.as_str()?.to_string();
        Some((url, commit))
    }

    pub fn answers_abspath(&self) -> PathBuf {
        self.local_abspath.join(self.answers_relpath.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_ref_requires_both_keys() {
        let sub = Subproject::new(PathBuf::from("/dst"), RelativePath::try_new(".copier-answers.yml").unwrap());
        assert!(sub.template_ref_from_answers().is_none());

        let mut answers = BTreeMap::new();
        answers.insert("_src_path".into(), Value::Str("tmpl".into()));
        let sub = sub.with_last_answers(answers);
        assert!(sub.template_ref_from_answers().is_none());
    }

    #[test]
    fn template_ref_resolves_when_both_present() {
        let mut answers = BTreeMap::new();
        answers.insert("_src_path".into(), Value::Str("tmpl".into()));
        answers.insert("_commit".into(), Value::Str("v1".into()));
        let sub = Subproject::new(PathBuf::from("/dst"), RelativePath::try_new(".copier-answers.yml").unwrap())
            .with_last_answers(answers);
        assert_eq!(
            sub.template_ref_from_answers(),
            Some(("tmpl".to_string(), "v1".to_string()))
        );
    }
}
