//! Lenient scalar deserializers for rule documents.
//!
//! Rule authors write rack numbers, VLAN ids and the like unquoted
//! (`allowed: [1, 2]`, `id: 42`). These helpers accept any YAML scalar
//! where a string is expected and keep its text.

use serde::de::{self, Deserialize, Deserializer};
use serde_yaml::Value;

/// `deserialize_with` target for `String` fields. `null` reads as `""`.
pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    scalar_text(value).map_err(de::Error::custom)
}

/// `deserialize_with` target for `Vec<String>` fields. `null` reads as empty.
pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut value = Value::deserialize(deserializer)?;
    while let Value::Tagged(tagged) = value {
        value = tagged.value;
    }

    match value {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(items) => items
            .into_iter()
            .map(scalar_text)
            .collect::<Result<_, _>>()
            .map_err(de::Error::custom),
        other => Err(de::Error::custom(format!(
            "expected a sequence of scalars, found {}",
            kind(&other)
        ))),
    }
}

fn scalar_text(value: Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::Tagged(tagged) => scalar_text(tagged.value),
        other => Err(format!("expected a scalar, found {}", kind(&other))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
