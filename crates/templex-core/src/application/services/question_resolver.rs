//! Question Resolver (§4.D): the `query_user_data` loop.
//!
//! Walks a template's declared questions in order, building up the
//! `AnswersMap`'s `default` layer as it goes (so later questions' templated
//! `default`/`help`/`choices` fields can reference earlier answers), and only
//! records an answer into the `user` layer when it differs from the
//! question's raw, unrendered default.

use std::str::FromStr;

use crate::application::ApplicationError;
use crate::application::ports::output::{Prompter, RenderedQuestion, TemplateEngine};
use crate::application::services::casting::cast_to_type;
use crate::domain::{AnswersMap, Choice, EnvOps, Question, QuestionType, RenderContext, Template, Value};

pub struct QuestionResolver<'a> {
    engine: &'a dyn TemplateEngine,
    prompter: &'a dyn Prompter,
}

impl<'a> QuestionResolver<'a> {
    pub fn new(engine: &'a dyn TemplateEngine, prompter: &'a dyn Prompter) -> Self {
        Self { engine, prompter }
    }

    /// Resolve every question in `template`, mutating `answers` in place.
    ///
    /// `ask_user` is the caller's global interactivity switch; it's
    /// overridden to `false` per-question whenever an `--data`-forced value
    /// is present for that question.
    pub fn resolve(
        &self,
        template: &Template,
        answers: &mut AnswersMap,
        ask_user: bool,
        folder_name: &str,
    ) -> Result<(), ApplicationError> {
        for question in &template.questions {
            self.resolve_one(question, answers, ask_user, folder_name, &template.envops)?;
        }
        Ok(())
    }

    fn resolve_one(
        &self,
        question: &Question,
        answers: &mut AnswersMap,
        ask_user: bool,
        folder_name: &str,
        envops: &EnvOps,
    ) -> Result<(), ApplicationError> {
        let ctx = RenderContext::new(answers.combined(), folder_name);

        let type_name = self.render_plain(&question.question_type_raw, &ctx, envops)?;
        let qtype =
            QuestionType::from_str(&type_name).map_err(|e| ApplicationError::RenderingFailed {
                path: question.name.clone(),
                reason: e.to_string(),
            })?;

        let rendered_default = self.render_value(question.default_raw.as_ref(), &ctx, envops)?;
        let default_value = cast_to_type(&rendered_default, qtype);
        answers.set_default(question.name.clone(), default_value.clone());

        let mut ask_this = ask_user;
        let answer = if let Some(forced) = answers.init.get(&question.name).cloned() {
            ask_this = false;
            forced
        } else {
            answers
                .last
                .get(&question.name)
                .cloned()
                .unwrap_or_else(|| default_value.clone())
        };

        let final_answer = if ask_this {
            let help = match &question.help {
                Some(h) => Some(self.render_plain(h, &ctx, envops)?),
                None => None,
            };
            let placeholder = match &question.placeholder {
                Some(p) => Some(self.render_plain(p, &ctx, envops)?),
                None => None,
            };
            let choices = match &question.choices {
                Some(c) => Some(self.render_choices(c, &ctx, envops)?),
                None => None,
            };
            let default_display = display_value(&default_value, qtype);
            let rendered = RenderedQuestion {
                message: &question.name,
                type_name: qtype.as_str(),
                secret: question.secret,
                help,
                placeholder,
                default_display,
                choices,
            };
            let raw = self.prompter.ask(question, &rendered)?;
            cast_to_type(&Value::Str(raw), qtype)
        } else {
            answer
        };

        let comparison_default = question
            .default_raw
            .clone()
            .unwrap_or_else(|| default_value.clone());
        if final_answer != comparison_default {
            answers.set_user(question.name.clone(), cast_to_type(&final_answer, qtype));
        }

        Ok(())
    }

    fn render_plain(
        &self,
        template: &str,
        ctx: &RenderContext,
        envops: &EnvOps,
    ) -> Result<String, ApplicationError> {
        self.engine.render_str(template, ctx, envops)
    }

    fn render_value(
        &self,
        value: Option<&Value>,
        ctx: &RenderContext,
        envops: &EnvOps,
    ) -> Result<Value, ApplicationError> {
        match value {
            None => Ok(Value::Null),
            Some(Value::Str(s)) => Ok(Value::Str(self.render_plain(s, ctx, envops)?)),
            Some(other) => Ok(other.clone()),
        }
    }

    fn render_choices(
        &self,
        choices: &[Choice],
        ctx: &RenderContext,
        envops: &EnvOps,
    ) -> Result<Vec<Choice>, ApplicationError> {
        choices
            .iter()
            .map(|choice| match choice {
                Choice::Bare(v) => Ok(Choice::Bare(self.render_value(Some(v), ctx, envops)?)),
                Choice::Labeled(k, v) => Ok(Choice::Labeled(
                    self.render_value(Some(k), ctx, envops)?,
                    self.render_value(Some(v), ctx, envops)?,
                )),
            })
            .collect()
    }
}

fn display_value(value: &Value, qtype: QuestionType) -> String {
    match qtype {
        QuestionType::Json => serde_json::to_string_pretty(&crate::application::value_convert::value_to_json(value))
            .unwrap_or_else(|_| value.to_string()),
        QuestionType::Yaml => serde_yaml::to_string(&crate::application::value_convert::value_to_yaml(value))
            .unwrap_or_else(|_| value.to_string())
            .trim_end()
            .to_string(),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_value_falls_back_to_plain_string_for_str_type() {
        assert_eq!(display_value(&Value::Str("hi".into()), QuestionType::Str), "hi");
    }
}
