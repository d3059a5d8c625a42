//! Shared value types used across the domain layer.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::error::DomainError;

/// A path that is guaranteed relative, never escaping via `..` at construction time.
///
/// Used for anything derived from a template's file tree: the answers-file
/// relative path, a question's `default` output path, an exclude pattern's
/// origin, and destination-relative write targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.is_absolute() {
            return Err(DomainError::PathNotRelative {
                path: path.display().to_string(),
            });
        }
        Ok(Self(path))
    }

    pub fn join(&self, segment: impl AsRef<Path>) -> Self {
        Self(self.0.join(segment))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// A minimal JSON/YAML-shaped value, decoupling the domain layer from any
/// particular serialization crate (`serde_yaml`/`serde_json` live in the
/// adapters crate; conversions happen at the adapter boundary).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<Value>),
    Map(Vec<(Value, Value)>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Look up a string key in a `Map` variant; `None` for any other shape.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }
}

/// Parses a version string as semver, tolerating a leading `v` — the
/// convention VCS tags and resolved commits use throughout this crate
/// (`select_tag`, downgrade checks, migration gating all compare against
/// this, not the raw tag text).
pub fn parse_template_version(s: &str) -> Result<semver::Version, semver::Error> {
    semver::Version::parse(s.strip_prefix('v').unwrap_or(s))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Seq(_) | Value::Map(_) => write!(f, "{self:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_rejects_absolute() {
        assert!(RelativePath::try_new("/etc/passwd").is_err());
    }

    #[test]
    fn relative_path_accepts_relative() {
        let p = RelativePath::try_new("src/main.rs").unwrap();
        assert_eq!(p.as_path(), Path::new("src/main.rs"));
    }

    #[test]
    fn relative_path_join() {
        let p = RelativePath::try_new("src").unwrap().join("main.rs");
        assert_eq!(p.as_path(), Path::new("src/main.rs"));
    }
}
