//! Non-interactive `Prompter` adapter, for `--force`/scripted runs.
//!
//! The interactive terminal prompter lives in `templex-cli`, which owns the
//! `dialoguer` dependency; this adapter has no terminal dependency at all.

use templex_core::application::ports::output::{RenderedQuestion, Prompter};
use templex_core::application::ApplicationError;
use templex_core::domain::Question;

#[derive(Debug, Clone, Copy, Default)]
pub struct NonInteractivePrompter;

impl NonInteractivePrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for NonInteractivePrompter {
    fn is_interactive(&self) -> bool {
        false
    }

    fn ask(
        &self,
        _question: &Question,
        rendered: &RenderedQuestion<'_>,
    ) -> Result<String, ApplicationError> {
        Ok(rendered.default_display.clone())
    }

    fn confirm(&self, _message: &str, default: bool) -> Result<bool, ApplicationError> {
        Ok(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ask_returns_the_rendered_default_without_blocking() {
        let prompter = NonInteractivePrompter::new();
        let question = Question::new("name");
        let rendered = RenderedQuestion {
            message: "Name?",
            type_name: "str",
            secret: false,
            help: None,
            placeholder: None,
            default_display: "demo".to_string(),
            choices: None,
        };
        assert_eq!(prompter.ask(&question, &rendered).unwrap(), "demo");
        assert!(!prompter.is_interactive());
    }

    #[test]
    fn confirm_echoes_the_default() {
        let prompter = NonInteractivePrompter::new();
        assert!(prompter.confirm("proceed?", true).unwrap());
        assert!(!prompter.confirm("proceed?", false).unwrap());
    }
}
