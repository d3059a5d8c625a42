//! Conversions between `domain::Value` and the concrete serialization crates.
//!
//! The domain layer stays free of any particular serialization dependency;
//! this module is the one place that bridges it to `serde_yaml`/`serde_json`,
//! shared by the config loader's YAML parsing and the question resolver's
//! `json`/`yaml`-typed answer casting.

use crate::domain::Value;

pub fn value_from_yaml(v: serde_yaml::Value) -> Value {
    match v {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else {
                Value::Float(n.as_f64().unwrap_or(0.0))
            }
        }
        serde_yaml::Value::String(s) => Value::Str(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Seq(items.into_iter().map(value_from_yaml).collect())
        }
        serde_yaml::Value::Mapping(map) => Value::Map(
            map.into_iter()
                .map(|(k, v)| (value_from_yaml(k), value_from_yaml(v)))
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => value_from_yaml(tagged.value),
    }
}

pub fn value_to_yaml(v: &Value) -> serde_yaml::Value {
    match v {
        Value::Null => serde_yaml::Value::Null,
        Value::Bool(b) => serde_yaml::Value::Bool(*b),
        Value::Int(i) => serde_yaml::Value::Number((*i).into()),
        Value::Float(f) => serde_yaml::Value::Number((*f).into()),
        Value::Str(s) => serde_yaml::Value::String(s.clone()),
        Value::Seq(items) => serde_yaml::Value::Sequence(items.iter().map(value_to_yaml).collect()),
        Value::Map(entries) => {
            let mut map = serde_yaml::Mapping::new();
            for (k, v) in entries {
                map.insert(value_to_yaml(k), value_to_yaml(v));
            }
            serde_yaml::Value::Mapping(map)
        }
    }
}

pub fn value_from_json(v: serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else {
                Value::Float(n.as_f64().unwrap_or(0.0))
            }
        }
        serde_json::Value::String(s) => Value::Str(s),
        serde_json::Value::Array(items) => {
            Value::Seq(items.into_iter().map(value_from_json).collect())
        }
        serde_json::Value::Object(map) => Value::Map(
            map.into_iter()
                .map(|(k, v)| (Value::Str(k), value_from_json(v)))
                .collect(),
        ),
    }
}

pub fn value_to_json(v: &Value) -> serde_json::Value {
    match v {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Str(s) => serde_json::Value::String(s.clone()),
        Value::Seq(items) => serde_json::Value::Array(items.iter().map(value_to_json).collect()),
        Value::Map(entries) => {
            let mut map = serde_json::Map::new();
            for (k, v) in entries {
                let key = k.as_str().unwrap_or_default().to_string();
                map.insert(key, value_to_json(v));
            }
            serde_json::Value::Object(map)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_round_trip_preserves_scalars() {
        let v = Value::Map(vec![
            (Value::Str("name".into()), Value::Str("Ada".into())),
            (Value::Str("count".into()), Value::Int(3)),
        ]);
        let yaml = value_to_yaml(&v);
        let back = value_from_yaml(yaml);
        assert_eq!(back, v);
    }

    #[test]
    fn json_round_trip_preserves_scalars() {
        let v = Value::Seq(vec![Value::Bool(true), Value::Null, Value::Str("x".into())]);
        let json = value_to_json(&v);
        let back = value_from_json(json);
        assert_eq!(back, v);
    }
}
