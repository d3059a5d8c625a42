//! Answer type casting (the `cast_answer_type` step of §4.D).

use crate::application::value_convert::{value_from_json, value_from_yaml};
use crate::domain::{QuestionType, Value};

fn parse_bool_like(s: &str) -> bool {
    matches!(
        s.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "on" | "1"
    )
}

/// Cast `value` to the shape implied by `qtype`, mirroring Copier's
/// `cast_answer_type`: `str` leaves `None`/`Null` untouched, `bool` parses
/// YAML-truthy strings, everything else best-efforts a conversion and falls
/// back to the original value when it doesn't apply.
pub fn cast_to_type(value: &Value, qtype: QuestionType) -> Value {
    match qtype {
        QuestionType::Str => match value {
            Value::Null => Value::Null,
            Value::Str(_) => value.clone(),
            other => Value::Str(other.to_string()),
        },
        QuestionType::Bool => match value {
            Value::Bool(b) => Value::Bool(*b),
            Value::Str(s) => Value::Bool(parse_bool_like(s)),
            Value::Int(i) => Value::Bool(*i != 0),
            Value::Null => Value::Bool(false),
            _ => value.clone(),
        },
        QuestionType::Int => match value {
            Value::Int(_) => value.clone(),
            Value::Float(f) => Value::Int(*f as i64),
            Value::Bool(b) => Value::Int(if *b { 1 } else { 0 }),
            Value::Str(s) => s
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .unwrap_or_else(|_| value.clone()),
            _ => value.clone(),
        },
        QuestionType::Float => match value {
            Value::Float(_) => value.clone(),
            Value::Int(i) => Value::Float(*i as f64),
            Value::Str(s) => s
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .unwrap_or_else(|_| value.clone()),
            _ => value.clone(),
        },
        QuestionType::Json => match value {
            Value::Str(s) => serde_json::from_str::<serde_json::Value>(s)
                .map(value_from_json)
                .unwrap_or_else(|_| value.clone()),
            _ => value.clone(),
        },
        QuestionType::Yaml => match value {
            Value::Str(s) => serde_yaml::from_str::<serde_yaml::Value>(s)
                .map(value_from_yaml)
                .unwrap_or_else(|_| value.clone()),
            _ => value.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_parses_yaml_truthy_strings() {
        assert_eq!(cast_to_type(&Value::Str("yes".into()), QuestionType::Bool), Value::Bool(true));
        assert_eq!(cast_to_type(&Value::Str("no".into()), QuestionType::Bool), Value::Bool(false));
    }

    #[test]
    fn str_leaves_null_untouched() {
        assert_eq!(cast_to_type(&Value::Null, QuestionType::Str), Value::Null);
    }

    #[test]
    fn int_parses_from_string() {
        assert_eq!(cast_to_type(&Value::Str("42".into()), QuestionType::Int), Value::Int(42));
    }

    #[test]
    fn yaml_parses_nested_structure() {
        let result = cast_to_type(&Value::Str("[1, 2, 3]".into()), QuestionType::Yaml);
        assert_eq!(
            result,
            Value::Seq(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
    }
}
