//! `Question`: a single prompt declared by a template's config file.

use crate::domain::common::Value;
use crate::domain::error::DomainError;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionType {
    Bool,
    Int,
    Float,
    Str,
    Json,
    Yaml,
}

impl FromStr for QuestionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bool" => Ok(Self::Bool),
            "int" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            "str" => Ok(Self::Str),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            other => Err(DomainError::InvalidQuestionType {
                name: String::new(),
                type_name: other.to_string(),
            }),
        }
    }
}

impl QuestionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// A single choice entry: a bare value, or an explicit `(value, label)` pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Choice {
    Bare(Value),
    Labeled(Value, Value),
}

/// A question declared in a template's config file.
///
/// Scalar string fields (`default_raw`, `help`, `placeholder`) are template
/// strings, rendered against the in-progress `AnswersMap` at resolution time.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub name: String,
    pub question_type_raw: String,
    /// The *raw*, unrendered default — the Open Question in SPEC_FULL.md §9
    /// requires comparing the user's answer against this, not the rendered
    /// value, before deciding whether to persist it.
    pub default_raw: Option<Value>,
    pub help: Option<String>,
    pub placeholder: Option<String>,
    pub choices: Option<Vec<Choice>>,
    pub secret: bool,
}

impl Question {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            question_type_raw: "yaml".into(),
            default_raw: None,
            help: None,
            placeholder: None,
            choices: None,
            secret: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_type_round_trips() {
        for t in [
            QuestionType::Bool,
            QuestionType::Int,
            QuestionType::Float,
            QuestionType::Str,
            QuestionType::Json,
            QuestionType::Yaml,
        ] {
            assert_eq!(QuestionType::from_str(t.as_str()).unwrap(), t);
        }
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(QuestionType::from_str("enum").is_err());
    }
}
