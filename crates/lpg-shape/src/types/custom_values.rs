//! `customValues`: ordered pairs on the pricing side, a mapping on the loan side

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One `{name, value}` pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomValue {
    /// Key
    pub name: String,
    /// Arbitrary JSON value
    #[serde(default)]
    pub value: Value,
}

/// Ordered `customValues` sequence
///
/// Deserializes from a pair array, a keyed mapping (converted in key order)
/// or `null`. Always serializes as a pair array.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CustomValues(Vec<CustomValue>);

impl CustomValues {
    /// Build from a keyed mapping, preserving key order
    #[must_use]
    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self(
            map.iter()
                .map(|(name, value)| CustomValue {
                    name: name.clone(),
                    value: value.clone(),
                })
                .collect(),
        )
    }

    /// Keyed mapping in pair order; a repeated name keeps its last value
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        self.0
            .iter()
            .map(|pair| (pair.name.clone(), pair.value.clone()))
            .collect()
    }

    /// Pairs in order
    #[inline]
    #[must_use]
    pub fn pairs(&self) -> &[CustomValue] {
        &self.0
    }

    /// Check if there are no pairs
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of pairs
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Read leniently from an arbitrary JSON value
    ///
    /// Array items that are not objects, or lack a usable `name`, are
    /// skipped.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::from_map(map),
            Value::Array(items) => Self(
                items
                    .iter()
                    .filter_map(|item| {
                        let obj = item.as_object()?;
                        let name = match obj.get("name")? {
                            Value::String(s) => s.clone(),
                            Value::Number(n) => n.to_string(),
                            _ => return None,
                        };
                        Some(CustomValue {
                            name,
                            value: obj.get("value").cloned().unwrap_or(Value::Null),
                        })
                    })
                    .collect(),
            ),
            _ => Self::default(),
        }
    }
}

impl From<Vec<CustomValue>> for CustomValues {
    fn from(pairs: Vec<CustomValue>) -> Self {
        Self(pairs)
    }
}

impl<'de> Deserialize<'de> for CustomValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_value(&Value::deserialize(deserializer)?))
    }
}

/// Loan-side mapping reader: accepts a mapping, a pair array or `null`
pub(crate) fn loan_mapping<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<Map<String, Value>>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Object(map) => Some(map),
        pairs @ Value::Array(_) => Some(CustomValues::from_value(&pairs).to_map()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn mapping_to_pairs_keeps_order() {
        let map = json!({"zeta": 1, "alpha": "two", "mid": null});
        let pairs = CustomValues::from_map(map.as_object().unwrap());
        assert_eq!(
            serde_json::to_value(&pairs).unwrap(),
            json!([
                {"name": "zeta", "value": 1},
                {"name": "alpha", "value": "two"},
                {"name": "mid", "value": null}
            ])
        );
        assert_eq!(Value::Object(pairs.to_map()), map);
    }

    #[test]
    fn deserializes_every_accepted_form() {
        let from_pairs: CustomValues =
            serde_json::from_value(json!([{"name": "a", "value": 1}, "junk", {"value": 3}])).unwrap();
        assert_eq!(from_pairs.len(), 1);

        let from_map: CustomValues = serde_json::from_value(json!({"a": 1})).unwrap();
        assert_eq!(from_map.pairs()[0].name, "a");

        let from_null: CustomValues = serde_json::from_value(Value::Null).unwrap();
        assert!(from_null.is_empty());
    }
}
