//! `AnswersMap`: the layered, precedence-ordered view over a project's answers.

use std::collections::BTreeMap;

use crate::domain::common::Value;

/// Layered answer storage.
///
/// Precedence, highest to lowest: `user` (interactive) > `init` (forced via
/// `--data`) > `last` (loaded from the destination's answers file) >
/// `metadata` (template-provided, `_src_path`/`_commit`) > `default` (from
/// question declarations).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswersMap {
    pub user: BTreeMap<String, Value>,
    pub init: BTreeMap<String, Value>,
    pub last: BTreeMap<String, Value>,
    pub metadata: BTreeMap<String, Value>,
    pub default: BTreeMap<String, Value>,
}

impl AnswersMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_last(mut self, last: BTreeMap<String, Value>) -> Self {
        self.last = last;
        self
    }

    pub fn with_init(mut self, init: BTreeMap<String, Value>) -> Self {
        self.init = init;
        self
    }

    pub fn with_metadata(mut self, metadata: BTreeMap<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// The flattened, precedence-resolved view.
    pub fn combined(&self) -> BTreeMap<String, Value> {
        let mut out = self.default.clone();
        out.extend(self.metadata.clone());
        out.extend(self.last.clone());
        out.extend(self.init.clone());
        out.extend(self.user.clone());
        out
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.user
            .get(key)
            .or_else(|| self.init.get(key))
            .or_else(|| self.last.get(key))
            .or_else(|| self.metadata.get(key))
            .or_else(|| self.default.get(key))
    }

    pub fn set_default(&mut self, key: impl Into<String>, value: Value) {
        self.default.insert(key.into(), value);
    }

    pub fn set_user(&mut self, key: impl Into<String>, value: Value) {
        self.user.insert(key.into(), value);
    }

    pub fn is_forced(&self, key: &str) -> bool {
        self.init.contains_key(key)
    }

    /// Keys and values eligible for persistence to the answers file:
    /// every non-underscore-prefixed, non-secret key from the combined view,
    /// plus `_src_path`/`_commit` pulled from `metadata`.
    pub fn persisted_entries(&self, secret_questions: &[String]) -> Vec<(String, Value)> {
        let combined = self.combined();
        let mut out: Vec<(String, Value)> = Vec::new();

        for key in ["_src_path", "_commit"] {
            if let Some(v) = self.metadata.get(key) {
                out.push((key.to_string(), v.clone()));
            }
        }

        for (k, v) in combined {
            if k.starts_with('_') {
                continue;
            }
            if secret_questions.iter().any(|s| s == &k) {
                continue;
            }
            out.push((k, v));
        }

        out
    }
}
