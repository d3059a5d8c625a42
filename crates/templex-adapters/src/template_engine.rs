//! minijinja-backed `TemplateEngine` adapter (§4.E, §5).

use minijinja::value::Value as MiniValue;
use minijinja::Environment;

use templex_core::application::ports::output::TemplateEngine;
use templex_core::application::value_convert::value_to_json;
use templex_core::application::ApplicationError;
use templex_core::domain::{EnvOps, RenderContext, Value};

/// Renders single template strings with an `Environment` reconfigured per
/// call to the template's `_envops` delimiters, since those can vary between
/// templates (and copier re-reads them per file for `[% if %]`/`[[ x ]]`
/// style overrides).
#[derive(Debug, Clone, Copy, Default)]
pub struct MinijinjaEngine;

impl MinijinjaEngine {
    pub fn new() -> Self {
        Self
    }
}

fn nice_yaml_filter(value: MiniValue) -> Result<String, minijinja::Error> {
    let json: serde_json::Value = serde_json::to_value(&value)
        .map_err(|e| minijinja::Error::new(minijinja::ErrorKind::InvalidOperation, e.to_string()))?;
    let yaml = serde_yaml::to_string(&json)
        .map_err(|e| minijinja::Error::new(minijinja::ErrorKind::InvalidOperation, e.to_string()))?;
    Ok(yaml.trim_end().to_string())
}

fn environment_for(envops: &EnvOps) -> Result<Environment<'static>, ApplicationError> {
    let mut env = Environment::new();
    let syntax = minijinja::syntax::SyntaxConfig::builder()
        .block_delimiters(envops.block_start.clone(), envops.block_end.clone())
        .variable_delimiters(envops.variable_start.clone(), envops.variable_end.clone())
        .comment_delimiters(envops.comment_start.clone(), envops.comment_end.clone())
        .build()
        .map_err(|e| ApplicationError::RenderingFailed {
            path: String::new(),
            reason: format!("invalid envops delimiters: {e}"),
        })?;
    env.set_syntax(syntax);
    env.set_keep_trailing_newline(envops.keep_trailing_newline);
    env.add_filter("to_nice_yaml", nice_yaml_filter);
    Ok(env)
}

fn to_minijinja(value: &Value) -> MiniValue {
    MiniValue::from_serialize(value_to_json(value))
}

impl TemplateEngine for MinijinjaEngine {
    fn render_str(
        &self,
        template: &str,
        ctx: &RenderContext,
        envops: &EnvOps,
    ) -> Result<String, ApplicationError> {
        let env = environment_for(envops)?;
        let tmpl = env
            .template_from_str(template)
            .map_err(|e| ApplicationError::RenderingFailed {
                path: String::new(),
                reason: e.to_string(),
            })?;

        let mut context: std::collections::BTreeMap<String, MiniValue> = ctx
            .answers
            .iter()
            .map(|(k, v)| (k.clone(), to_minijinja(v)))
            .collect();
        context.insert("_folder_name".to_string(), MiniValue::from(ctx.folder_name.clone()));

        tmpl.render(context)
            .map_err(|e| ApplicationError::RenderingFailed {
                path: String::new(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn renders_with_default_copier_delimiters() {
        let engine = MinijinjaEngine::new();
        let mut answers = BTreeMap::new();
        answers.insert("name".to_string(), Value::Str("Ada".into()));
        let ctx = RenderContext::new(answers, "proj");
        let out = engine
            .render_str("Hello, [[ name ]]!", &ctx, &EnvOps::default())
            .unwrap();
        assert_eq!(out, "Hello, Ada!");
    }

    #[test]
    fn renders_block_tags() {
        let engine = MinijinjaEngine::new();
        let mut answers = BTreeMap::new();
        answers.insert("flag".to_string(), Value::Bool(true));
        let ctx = RenderContext::new(answers, "proj");
        let out = engine
            .render_str("[% if flag %]yes[% else %]no[% endif %]", &ctx, &EnvOps::default())
            .unwrap();
        assert_eq!(out, "yes");
    }

    #[test]
    fn unknown_variable_is_a_rendering_error() {
        let engine = MinijinjaEngine::new();
        let ctx = RenderContext::new(BTreeMap::new(), "proj");
        let mut envops = EnvOps::default();
        envops.variable_start = "{{".into();
        envops.variable_end = "}}".into();
        let out = engine.render_str("{{ 1 / 0 }}", &ctx, &envops);
        assert!(out.is_err());
    }
}
