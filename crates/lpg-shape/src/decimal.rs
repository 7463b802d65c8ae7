//! Decimal-as-string normalization
//!
//! Both provider shapes carry money and ratios as strings (`"80.0000"`).
//! Inputs arrive as strings, JSON numbers or garbage; everything funnels
//! through [`to_decimal_string`] so the output spelling is uniform.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Canonical decimal spelling: optional minus, digits, optional fraction
static DECIMAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?\d+(\.\d+)?$").expect("decimal pattern is valid")
});

/// Fractional digits kept when formatting a JSON number
const NUMBER_PRECISION: usize = 4;

/// Check whether a string is a plain decimal literal
#[inline]
#[must_use]
pub fn is_decimal_literal(s: &str) -> bool {
    DECIMAL_RE.is_match(s)
}

/// Trim trailing fractional zeros (and a dangling dot) from a decimal literal
///
/// Integers are returned untouched: `"100"` stays `"100"`.
#[must_use]
pub fn trim_fraction(s: &str) -> String {
    if !s.contains('.') {
        return normalize_negative_zero(s.to_string());
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    normalize_negative_zero(trimmed.to_string())
}

fn normalize_negative_zero(s: String) -> String {
    if s == "-0" {
        "0".to_string()
    } else {
        s
    }
}

fn format_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    let f = n.as_f64().unwrap_or_default();
    trim_fraction(&format!("{:.*}", NUMBER_PRECISION, f))
}

/// Convert a value to a canonical decimal string
///
/// - `null` and `""` → `None`
/// - numeric-looking strings → trailing fractional zeros trimmed
/// - other strings → unchanged
/// - numbers → four decimal places, trailing zeros stripped
/// - anything else → stringified
#[must_use]
pub fn to_decimal_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => {
            let candidate = s.trim();
            if is_decimal_literal(candidate) {
                Some(trim_fraction(candidate))
            } else {
                Some(s.clone())
            }
        }
        Value::Number(n) => Some(format_number(n)),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Decimal string or explicit JSON `null`
#[inline]
#[must_use]
pub fn to_decimal_string_or_null(value: &Value) -> Value {
    to_decimal_string(value).map_or(Value::Null, Value::String)
}

/// Decimal string, or `None` meaning "omit the field"
#[inline]
#[must_use]
pub fn to_decimal_string_or_undefined(value: &Value) -> Option<String> {
    to_decimal_string(value)
}

/// Parse a decimal string or number for derived arithmetic
///
/// Returns `None` for empty, non-numeric or non-finite input.
#[must_use]
pub fn parse_decimal(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

/// Decimal-as-string slot in a shape struct
///
/// Deserializes leniently from strings, numbers, booleans, `null` or `""`
/// and serializes as a string or `null`. Structs that must omit absent
/// decimals pair it with `skip_serializing_if = "MaybeDecimal::is_absent"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MaybeDecimal(Option<String>);

impl MaybeDecimal {
    /// Empty slot
    #[inline]
    #[must_use]
    pub const fn absent() -> Self {
        Self(None)
    }

    /// Normalize any JSON value into a slot
    #[inline]
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self(to_decimal_string(value))
    }

    /// Normalize a string into a slot
    #[inline]
    #[must_use]
    pub fn parse_str(value: &str) -> Self {
        Self::from_value(&Value::String(value.to_string()))
    }

    /// Slot holding an exact literal, bypassing normalization
    ///
    /// Used for placeholders such as `"0.0000"` that a target shape expects
    /// verbatim.
    #[inline]
    #[must_use]
    pub fn literal(value: &str) -> Self {
        Self(Some(value.to_string()))
    }

    /// Slot from a float, formatted like a JSON number
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map_or_else(Self::absent, |n| Self::from_value(&Value::Number(n)))
    }

    /// Get string value
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Check if slot is empty
    #[inline]
    #[must_use]
    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    /// Check if slot holds a value
    #[inline]
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    /// First present of `self` and `other`
    #[inline]
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        if self.is_present() {
            self
        } else {
            other
        }
    }

    /// `self` if present, else the given literal
    #[inline]
    #[must_use]
    pub fn or_literal(self, literal: &str) -> Self {
        self.or(Self::literal(literal))
    }

    /// Parse as float
    #[inline]
    #[must_use]
    pub fn to_f64(&self) -> Option<f64> {
        self.0
            .as_deref()
            .and_then(|s| parse_decimal(&Value::String(s.to_string())))
    }

    /// JSON representation (`null` when absent)
    #[inline]
    #[must_use]
    pub fn to_value(&self) -> Value {
        self.0.clone().map_or(Value::Null, Value::String)
    }

    /// Consume into the inner option
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> Option<String> {
        self.0
    }
}

impl fmt::Display for MaybeDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(s) => f.write_str(s),
            None => f.write_str("null"),
        }
    }
}

impl From<&Value> for MaybeDecimal {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}

impl Serialize for MaybeDecimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(s) => serializer.serialize_str(s),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for MaybeDecimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_and_empty_are_absent() {
        assert_eq!(to_decimal_string(&Value::Null), None);
        assert_eq!(to_decimal_string(&json!("")), None);
        assert_eq!(to_decimal_string_or_null(&json!("")), Value::Null);
        assert_eq!(to_decimal_string_or_undefined(&Value::Null), None);
    }

    #[test]
    fn numeric_strings_are_trimmed() {
        assert_eq!(to_decimal_string(&json!("350000.0000")).as_deref(), Some("350000"));
        assert_eq!(to_decimal_string(&json!("80.50")).as_deref(), Some("80.5"));
        assert_eq!(to_decimal_string(&json!("100")).as_deref(), Some("100"));
        assert_eq!(to_decimal_string(&json!("-0.000")).as_deref(), Some("0"));
    }

    #[test]
    fn non_numeric_strings_pass_through() {
        assert_eq!(to_decimal_string(&json!("n/a")).as_deref(), Some("n/a"));
        assert_eq!(to_decimal_string(&json!("1e5")).as_deref(), Some("1e5"));
    }

    #[test]
    fn numbers_are_formatted() {
        assert_eq!(to_decimal_string(&json!(350_000)).as_deref(), Some("350000"));
        assert_eq!(to_decimal_string(&json!(71.225)).as_deref(), Some("71.225"));
        assert_eq!(to_decimal_string(&json!(0.123_456)).as_deref(), Some("0.1235"));
        assert_eq!(to_decimal_string(&json!(80.0)).as_deref(), Some("80"));
    }

    #[test]
    fn other_types_are_stringified() {
        assert_eq!(to_decimal_string(&json!(true)).as_deref(), Some("true"));
    }

    #[test]
    fn parse_decimal_handles_strings_and_numbers() {
        assert_eq!(parse_decimal(&json!("8500.50")), Some(8500.5));
        assert_eq!(parse_decimal(&json!(12)), Some(12.0));
        assert_eq!(parse_decimal(&json!("")), None);
        assert_eq!(parse_decimal(&json!("abc")), None);
        assert_eq!(parse_decimal(&json!("NaN")), None);
        assert_eq!(parse_decimal(&Value::Null), None);
    }

    #[test]
    fn maybe_decimal_serde() {
        let slot: MaybeDecimal = serde_json::from_value(json!(80.25)).unwrap();
        assert_eq!(slot.as_str(), Some("80.25"));
        let empty: MaybeDecimal = serde_json::from_value(json!("")).unwrap();
        assert!(empty.is_absent());
        assert_eq!(serde_json::to_value(&empty).unwrap(), Value::Null);
        assert_eq!(serde_json::to_value(&slot).unwrap(), json!("80.25"));
    }

    #[test]
    fn maybe_decimal_fallbacks() {
        let slot = MaybeDecimal::absent().or_literal("0.0000");
        assert_eq!(slot.as_str(), Some("0.0000"));
        let kept = MaybeDecimal::parse_str("5").or_literal("0.0000");
        assert_eq!(kept.as_str(), Some("5"));
        assert_eq!(MaybeDecimal::from_f64(1000.0 / 12.0).as_str(), Some("83.3333"));
    }
}
