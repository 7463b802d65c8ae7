//! Lenient scalar deserializers for the typed shapes
//!
//! Scalar type mismatches (`"720"` for a FICO score, `1` for a flag) are
//! coerced or dropped instead of failing the whole document. Structural
//! mismatches, such as a string where a section object belongs, still fail.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::reader::{value_to_i64, value_to_string_list};

/// String, stringifying numbers and booleans
pub(crate) fn string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Integer from a number or numeric string
pub(crate) fn int<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(value_to_i64(&Value::deserialize(d)?))
}

/// Boolean from a bool, `"true"` / `"false"` or `0` / `1`
pub(crate) fn boolean<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Bool(b) => Some(b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_i64().map(|i| i != 0),
        _ => None,
    })
}

/// List of non-empty strings
pub(crate) fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(value_to_string_list(&Value::deserialize(d)?))
}

/// Array of arbitrary values; `null` is absent, a scalar is wrapped
pub(crate) fn values<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<Value>>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Null => None,
        Value::Array(items) => Some(items),
        other => Some(vec![other]),
    })
}

/// Section object; `null` reads as the default
pub(crate) fn section<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    struct Loose {
        #[serde(default, deserialize_with = "super::string")]
        name: Option<String>,
        #[serde(default, deserialize_with = "super::int")]
        fico: Option<i64>,
        #[serde(default, deserialize_with = "super::boolean")]
        flag: Option<bool>,
        #[serde(default, deserialize_with = "super::string_list")]
        terms: Vec<String>,
    }

    #[test]
    fn scalars_are_coerced() {
        let loose: Loose = serde_json::from_value(json!({
            "name": 12,
            "fico": "720",
            "flag": 1,
            "terms": [360, "180"]
        }))
        .unwrap();
        assert_eq!(loose.name.as_deref(), Some("12"));
        assert_eq!(loose.fico, Some(720));
        assert_eq!(loose.flag, Some(true));
        assert_eq!(loose.terms, vec!["360", "180"]);
    }

    #[test]
    fn mismatches_become_absent() {
        let loose: Loose = serde_json::from_value(json!({
            "name": {"nested": true},
            "fico": "high",
            "flag": "maybe"
        }))
        .unwrap();
        assert!(loose.name.is_none());
        assert!(loose.fico.is_none());
        assert!(loose.flag.is_none());
        assert!(loose.terms.is_empty());
    }
}
