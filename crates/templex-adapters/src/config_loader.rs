//! `copier.{yml,yaml}` parsing (§4.B), including `!include` glob splicing.

use std::path::Path;

use templex_core::application::ports::output::{RawTemplateConfig, TemplateConfigLoader};
use templex_core::application::services::split_raw_document;
use templex_core::application::value_convert::value_from_yaml;
use templex_core::application::ApplicationError;
use templex_core::domain::DomainError;

const CONFIG_NAMES: &[&str] = &["copier.yml", "copier.yaml"];
const INCLUDE_TAG: &str = "!include";

/// Loads a template's config file from disk with `serde_yaml`, resolving
/// `!include` directives before handing the merged document to
/// `split_raw_document`.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlConfigLoader;

impl YamlConfigLoader {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateConfigLoader for YamlConfigLoader {
    fn load(&self, template_root: &Path) -> Result<RawTemplateConfig, ApplicationError> {
        let found: Vec<_> = CONFIG_NAMES
            .iter()
            .map(|name| template_root.join(name))
            .filter(|p| p.exists())
            .collect();

        let config_path = match found.as_slice() {
            [] => {
                return Err(ApplicationError::TemplateResolutionFailed {
                    reason: format!(
                        "no copier.yml or copier.yaml found under {}",
                        template_root.display()
                    ),
                });
            }
            [single] => single.clone(),
            many => {
                let paths = many
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(ApplicationError::TemplateResolutionFailed {
                    reason: DomainError::AmbiguousConfigFile { paths }.to_string(),
                });
            }
        };

        let raw = parse_file(&config_path)?;
        let spliced = splice_includes(raw, template_root)?;
        let value = value_from_yaml(spliced);
        let doc = value.as_map().unwrap_or(&[]).to_vec();
        split_raw_document(&doc)
    }
}

fn parse_file(path: &Path) -> Result<serde_yaml::Value, ApplicationError> {
    let text = std::fs::read_to_string(path).map_err(|e| ApplicationError::FilesystemError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    serde_yaml::from_str(&text).map_err(|e| ApplicationError::TemplateResolutionFailed {
        reason: format!("failed to parse {}: {e}", path.display()),
    })
}

fn tag_is_include(tag: &serde_yaml::value::Tag) -> bool {
    tag.to_string() == INCLUDE_TAG
}

/// Glob `pattern` relative to `template_root`, parse and splice each match,
/// then merge their top-level mappings together in sorted-path order.
fn load_included(pattern: &str, template_root: &Path) -> Result<serde_yaml::Mapping, ApplicationError> {
    let full_pattern = template_root.join(pattern);
    let mut paths: Vec<_> = glob::glob(&full_pattern.to_string_lossy())
        .map_err(|e| ApplicationError::TemplateResolutionFailed { reason: e.to_string() })?
        .filter_map(Result::ok)
        .collect();
    paths.sort();

    let mut merged = serde_yaml::Mapping::new();
    for path in paths {
        let included = parse_file(&path)?;
        let included = splice_includes(included, template_root)?;
        if let serde_yaml::Value::Mapping(map) = included {
            for (k, v) in map {
                merged.insert(k, v);
            }
        }
    }
    Ok(merged)
}

/// Recursively resolve `!include` directives, whether they appear as a whole
/// document, as a mapping key (the common form, where the pattern is the
/// key's tagged scalar and the associated value is discarded), or as a value.
fn splice_includes(
    value: serde_yaml::Value,
    template_root: &Path,
) -> Result<serde_yaml::Value, ApplicationError> {
    match value {
        serde_yaml::Value::Tagged(tagged) if tag_is_include(&tagged.tag) => {
            let pattern = tagged.value.as_str().unwrap_or_default().to_string();
            Ok(serde_yaml::Value::Mapping(load_included(&pattern, template_root)?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut out = serde_yaml::Mapping::new();
            for (k, v) in map {
                if let serde_yaml::Value::Tagged(tagged) = &k {
                    if tag_is_include(&tagged.tag) {
                        let pattern = tagged.value.as_str().unwrap_or_default().to_string();
                        for (ik, iv) in load_included(&pattern, template_root)? {
                            out.insert(ik, iv);
                        }
                        continue;
                    }
                }
                out.insert(k, splice_includes(v, template_root)?);
            }
            Ok(serde_yaml::Value::Mapping(out))
        }
        serde_yaml::Value::Sequence(seq) => Ok(serde_yaml::Value::Sequence(
            seq.into_iter()
                .map(|v| splice_includes(v, template_root))
                .collect::<Result<Vec<_>, _>>()?,
        )),
        other => Ok(other),
    }
}
