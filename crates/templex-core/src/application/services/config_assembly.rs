//! Pure splitting of a parsed config document into settings vs. questions
//! (§4.B `filter_config`), decoupled from any particular YAML library.
//!
//! `templex-adapters` parses `copier.{yml,yaml}` (with `!include` splicing)
//! into a `domain::Value` document and hands it to [`split_raw_document`].
//! Keeping this logic here, rather than in the adapter, makes it testable
//! without a YAML parser in the loop.

use crate::application::ApplicationError;
use crate::application::ports::output::RawTemplateConfig;
use crate::domain::{Choice, Question, Task, Migration, Value};

pub fn split_raw_document(doc: &[(Value, Value)]) -> Result<RawTemplateConfig, ApplicationError> {
    let mut config = RawTemplateConfig::default();

    for (key, value) in doc {
        let Some(key) = key.as_str() else {
            continue;
        };

        if key == "_secret_questions" {
            for v in value.as_seq().unwrap_or(&[]) {
                if let Some(s) = v.as_str() {
                    config.secret_questions.push(s.to_string());
                }
            }
            continue;
        }

        if let Some(setting) = key.strip_prefix('_') {
            apply_setting(&mut config, setting, value)?;
            continue;
        }

        let question = build_question(key, value)?;
        if question.secret {
            config.secret_questions.push(question.name.clone());
        }
        config.questions.push(question);
    }

    Ok(config)
}

fn apply_setting(
    config: &mut RawTemplateConfig,
    setting: &str,
    value: &Value,
) -> Result<(), ApplicationError> {
    match setting {
        "subdirectory" => {
            config.subdirectory = value.as_str().unwrap_or_default().to_string();
        }
        "exclude" => {
            config.exclude = Some(string_seq(value));
        }
        "skip_if_exists" => {
            config.skip_if_exists = string_seq(value);
        }
        "envops" => {
            for (k, v) in value.as_map().unwrap_or(&[]) {
                if let (Some(k), Some(v)) = (k.as_str(), v.as_str()) {
                    config.envops_overrides.push((k.to_string(), v.to_string()));
                }
            }
        }
        "tasks" => {
            for v in value.as_seq().unwrap_or(&[]) {
                config.tasks.push(build_task(v, &[]));
            }
        }
        "migrations" => {
            for v in value.as_seq().unwrap_or(&[]) {
                config.migrations.push(build_migration(v));
            }
        }
        "answers_file" => {
            config.answers_file = value.as_str().map(|s| s.to_string());
        }
        "templates_suffix" => {
            config.templates_suffix = value.as_str().map(|s| s.to_string());
        }
        "min_copier_version" => {
            config.min_copier_version = value.as_str().map(|s| s.to_string());
        }
        // Unknown underscore-prefixed settings are ignored rather than
        // rejected, so templates can carry forward-compatible settings.
        _ => {}
    }
    Ok(())
}

fn string_seq(value: &Value) -> Vec<String> {
    value
        .as_seq()
        .unwrap_or(&[])
        .iter()
        .filter_map(|v| v.as_str().map(|s| s.to_string()))
        .collect()
}

fn build_task(value: &Value, extra_env: &[(String, String)]) -> Task {
    let mut task = match value {
        Value::Str(s) => Task::shell(s.clone()),
        Value::Seq(items) => Task::argv(
            items
                .iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect(),
        ),
        _ => Task::shell(value.to_string()),
    };
    for (k, v) in extra_env {
        task = task.with_env(k.clone(), v.clone());
    }
    task
}

fn build_migration(value: &Value) -> Migration {
    let version = value
        .get("version")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    let before = value
        .get("before")
        .and_then(|v| v.as_seq())
        .unwrap_or(&[])
        .iter()
        .map(|t| build_task(t, &[]))
        .collect();
    let after = value
        .get("after")
        .and_then(|v| v.as_seq())
        .unwrap_or(&[])
        .iter()
        .map(|t| build_task(t, &[]))
        .collect();
    Migration {
        version,
        before,
        after,
    }
}

fn build_question(name: &str, value: &Value) -> Result<Question, ApplicationError> {
    // A bare scalar is sugar for `{default: <scalar>}`.
    let map_value;
    let fields = match value {
        Value::Map(_) => value,
        other => {
            map_value = Value::Map(vec![(Value::Str("default".into()), other.clone())]);
            &map_value
        }
    };

    let mut question = Question::new(name);
    if let Some(t) = fields.get("type").and_then(|v| v.as_str()) {
        question.question_type_raw = t.to_string();
    }
    if let Some(default) = fields.get("default") {
        if !default.is_null() {
            question.default_raw = Some(default.clone());
        }
    }
    if let Some(help) = fields.get("help").and_then(|v| v.as_str()) {
        question.help = Some(help.to_string());
    }
    if let Some(placeholder) = fields.get("placeholder").and_then(|v| v.as_str()) {
        question.placeholder = Some(placeholder.to_string());
    }
    if let Some(secret) = fields.get("secret").and_then(|v| v.as_bool()) {
        question.secret = secret;
    }
    if let Some(choices) = fields.get("choices") {
        question.choices = Some(build_choices(choices));
    }

    Ok(question)
}

fn build_choices(value: &Value) -> Vec<Choice> {
    match value {
        Value::Seq(items) => items
            .iter()
            .map(|v| match v {
                Value::Seq(pair) if pair.len() == 2 => {
                    Choice::Labeled(pair[0].clone(), pair[1].clone())
                }
                other => Choice::Bare(other.clone()),
            })
            .collect(),
        Value::Map(entries) => entries
            .iter()
            .map(|(k, v)| Choice::Labeled(k.clone(), v.clone()))
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Value {
        Value::Str(v.to_string())
    }

    #[test]
    fn scalar_question_becomes_default_only() {
        let doc = vec![(s("name"), s("world"))];
        let config = split_raw_document(&doc).unwrap();
        assert_eq!(config.questions.len(), 1);
        assert_eq!(config.questions[0].default_raw, Some(s("world")));
    }

    #[test]
    fn underscore_keys_become_settings_not_questions() {
        let doc = vec![(
            s("_exclude"),
            Value::Seq(vec![s("secret.txt")]),
        )];
        let config = split_raw_document(&doc).unwrap();
        assert!(config.questions.is_empty());
        assert_eq!(config.exclude, Some(vec!["secret.txt".to_string()]));
    }

    #[test]
    fn secret_question_flag_registers_name() {
        let doc = vec![(
            s("token"),
            Value::Map(vec![(s("secret"), Value::Bool(true))]),
        )];
        let config = split_raw_document(&doc).unwrap();
        assert_eq!(config.secret_questions, vec!["token".to_string()]);
    }

    #[test]
    fn secret_questions_setting_merges_with_inline_flags() {
        let doc = vec![
            (s("_secret_questions"), Value::Seq(vec![s("api_key")])),
            (
                s("token"),
                Value::Map(vec![(s("secret"), Value::Bool(true))]),
            ),
        ];
        let config = split_raw_document(&doc).unwrap();
        assert_eq!(config.secret_questions.len(), 2);
        assert!(config.secret_questions.contains(&"api_key".to_string()));
        assert!(config.secret_questions.contains(&"token".to_string()));
    }
}
