//! Alias-aware path reader for loosely shaped input
//!
//! UI payloads arrive with either `camelCase` or `PascalCase` keys and with
//! whole sections missing. Every field read goes through an ordered
//! [`Aliases`] list: the first alias holding a non-null value wins, and a
//! missing section reads as an empty one.

use serde_json::{Map, Value};

use crate::decimal::MaybeDecimal;

/// Ordered candidate keys for one field, highest precedence first
pub type Aliases = &'static [&'static str];

static NULL: Value = Value::Null;

/// Read-only view over one JSON object section
#[derive(Debug, Clone, Copy, Default)]
pub struct Section<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Section<'a> {
    /// View a value as a section; non-objects read as empty
    #[must_use]
    pub fn new(value: &'a Value) -> Self {
        Self {
            map: value.as_object(),
        }
    }

    /// Empty section
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self { map: None }
    }

    /// Document root, unwrapping a `data` envelope when it holds an object
    #[must_use]
    pub fn root(document: &'a Value) -> Self {
        match document.get("data") {
            Some(inner @ Value::Object(_)) => Self::new(inner),
            _ => Self::new(document),
        }
    }

    /// Check if the section has no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.map_or(true, Map::is_empty)
    }

    /// First non-null value among the aliases
    #[must_use]
    pub fn get(&self, aliases: Aliases) -> Option<&'a Value> {
        let map = self.map?;
        aliases
            .iter()
            .find_map(|key| map.get(*key).filter(|v| !v.is_null()))
    }

    /// Like [`Section::get`] but yields `null` on a miss
    #[must_use]
    pub fn value(&self, aliases: Aliases) -> &'a Value {
        self.get(aliases).unwrap_or(&NULL)
    }

    /// Nested section; missing or non-object reads as empty
    #[must_use]
    pub fn section(&self, aliases: Aliases) -> Section<'a> {
        self.get(aliases).map_or_else(Self::empty, Self::new)
    }

    /// String field
    ///
    /// Numbers and booleans are stringified; arrays and objects read as a
    /// miss.
    #[must_use]
    pub fn string(&self, aliases: Aliases) -> Option<String> {
        match self.get(aliases)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// String field with default
    #[must_use]
    pub fn string_or(&self, aliases: Aliases, default: &str) -> String {
        self.string(aliases).unwrap_or_else(|| default.to_string())
    }

    /// Boolean field; accepts `"true"` / `"false"` strings
    #[must_use]
    pub fn bool(&self, aliases: Aliases) -> Option<bool> {
        match self.get(aliases)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Boolean field with default
    #[must_use]
    pub fn bool_or(&self, aliases: Aliases, default: bool) -> bool {
        self.bool(aliases).unwrap_or(default)
    }

    /// Integer field; numeric strings are parsed and fractions rounded
    #[must_use]
    pub fn int(&self, aliases: Aliases) -> Option<i64> {
        self.get(aliases).and_then(value_to_i64)
    }

    /// Integer field with default
    #[must_use]
    pub fn int_or(&self, aliases: Aliases, default: i64) -> i64 {
        self.int(aliases).unwrap_or(default)
    }

    /// Decimal field
    #[must_use]
    pub fn decimal(&self, aliases: Aliases) -> MaybeDecimal {
        MaybeDecimal::from_value(self.value(aliases))
    }

    /// List of non-empty strings
    ///
    /// Numbers are stringified and a lone scalar reads as a one-element list.
    #[must_use]
    pub fn string_list(&self, aliases: Aliases) -> Vec<String> {
        self.get(aliases).map(value_to_string_list).unwrap_or_default()
    }

    /// Raw array field
    #[must_use]
    pub fn array(&self, aliases: Aliases) -> Option<&'a Vec<Value>> {
        self.get(aliases).and_then(Value::as_array)
    }
}

/// Coerce a JSON value to an integer
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn value_to_i64(value: &Value) -> Option<i64> {
    let float = match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            n.as_f64()?
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(i) = trimmed.parse::<i64>() {
                return Some(i);
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };
    (float.is_finite() && float.abs() < 9.0e15).then(|| float.round() as i64)
}

/// Coerce a JSON value to a list of non-empty strings
pub(crate) fn value_to_string_list(value: &Value) -> Vec<String> {
    fn item(v: &Value) -> Option<String> {
        match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
    match value {
        Value::Array(items) => items.iter().filter_map(item).collect(),
        other => item(other).into_iter().collect(),
    }
}
