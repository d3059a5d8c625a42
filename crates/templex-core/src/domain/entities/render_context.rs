//! `RenderContext`: the merged view handed to the template engine on every render.

use crate::domain::common::Value;
use std::collections::BTreeMap;

/// The flattened data a render pass sees: every resolved answer, plus a
/// handful of engine-reserved keys.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderContext {
    pub answers: BTreeMap<String, Value>,
    pub folder_name: String,
}

impl RenderContext {
    pub fn new(answers: BTreeMap<String, Value>, folder_name: impl Into<String>) -> Self {
        Self {
            answers,
            folder_name: folder_name.into(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.answers.get(key)
    }
}
