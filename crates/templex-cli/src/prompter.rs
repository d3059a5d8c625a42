//! Interactive terminal `Prompter`, built on `dialoguer`.
//!
//! Lives in the CLI crate (not `templex-adapters`) because it's the only
//! adapter that owns a terminal dependency; everything else stays usable
//! from a headless context.

#[cfg(feature = "interactive")]
mod interactive {
    use dialoguer::theme::ColorfulTheme;
    use dialoguer::{Confirm, Input, Password, Select};

    use templex_core::application::ports::output::{Prompter, RenderedQuestion};
    use templex_core::application::ApplicationError;
    use templex_core::domain::{Choice, Question};

    #[derive(Debug, Clone, Copy, Default)]
    pub struct DialoguerPrompter;

    impl DialoguerPrompter {
        pub fn new() -> Self {
            Self
        }
    }

    fn choice_label(choice: &Choice) -> String {
        match choice {
            Choice::Bare(v) => v.to_string(),
            Choice::Labeled(_, label) => label.to_string(),
        }
    }

    fn choice_value(choice: &Choice) -> String {
        match choice {
            Choice::Bare(v) => v.to_string(),
            Choice::Labeled(value, _) => value.to_string(),
        }
    }

    impl Prompter for DialoguerPrompter {
        fn is_interactive(&self) -> bool {
            true
        }

        fn ask(
            &self,
            _question: &Question,
            rendered: &RenderedQuestion<'_>,
        ) -> Result<String, ApplicationError> {
            let theme = ColorfulTheme::default();

            if let Some(choices) = &rendered.choices {
                let labels: Vec<String> = choices.iter().map(choice_label).collect();
                let default_index = choices
                    .iter()
                    .position(|c| choice_value(c) == rendered.default_display)
                    .unwrap_or(0);
                let selection = Select::with_theme(&theme)
                    .with_prompt(rendered.message)
                    .items(&labels)
                    .default(default_index)
                    .interact()
                    .map_err(|_| ApplicationError::Cancelled)?;
                return Ok(choice_value(&choices[selection]));
            }

            if rendered.secret {
                let value = Password::with_theme(&theme)
                    .with_prompt(rendered.message)
                    .allow_empty_password(true)
                    .interact()
                    .map_err(|_| ApplicationError::Cancelled)?;
                return Ok(if value.is_empty() {
                    rendered.default_display.clone()
                } else {
                    value
                });
            }

            Input::with_theme(&theme)
                .with_prompt(rendered.message)
                .default(rendered.default_display.clone())
                .allow_empty(true)
                .interact_text()
                .map_err(|_| ApplicationError::Cancelled)
        }

        fn confirm(&self, message: &str, default: bool) -> Result<bool, ApplicationError> {
            Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(message)
                .default(default)
                .interact()
                .map_err(|_| ApplicationError::Cancelled)
        }
    }
}

#[cfg(feature = "interactive")]
pub use interactive::DialoguerPrompter;
