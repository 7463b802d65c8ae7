//! Enum normalization and domain tables
//!
//! The loan shape spells enums in `SCREAMING_SNAKE_CASE`, the pricing shape
//! in `PascalCase` and the UI shape with small integer codes. Each semantic
//! field has one [`EnumDomain`] (loan ⇄ pricing) and, where the UI exposes
//! it, one [`UiCodeTable`] (code → pricing).

mod field;
mod tables;

pub use field::{EnumField, Fallback};
pub use tables::*;

use serde_json::Value;

/// Canonical lookup key for an enum-ish value
///
/// Trims, upper-cases and collapses whitespace runs into `_`, so
/// `"not specified"`, `"Not_Specified"` and `"NOT  SPECIFIED"` all become
/// `NOT_SPECIFIED`.
#[must_use]
pub fn normalize_enum_key(value: &Value) -> Option<String> {
    let raw = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let key = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase();
    (!key.is_empty()).then_some(key)
}

/// Look up a normalized key in a `(key, value)` table
#[must_use]
pub fn map_enum_normalized(
    value: &Value,
    table: &'static [(&'static str, &'static str)],
) -> Option<&'static str> {
    let key = normalize_enum_key(value)?;
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Casing-only `SCREAMING_SNAKE` → `PascalCase`
///
/// Not a semantic mapping; domains only use it to recognise spellings.
#[must_use]
pub fn screaming_to_pascal(value: &str) -> Option<String> {
    let key = normalize_enum_key(&Value::String(value.to_string()))?;
    let pascal: String = key
        .to_lowercase()
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect();
    (!pascal.is_empty()).then_some(pascal)
}

/// Casing-only `PascalCase` → `SCREAMING_SNAKE`
///
/// Inserts `_` at every lower/digit → upper boundary, then upper-cases.
#[must_use]
pub fn pascal_to_screaming(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut out = String::with_capacity(trimmed.len() + 4);
    let mut prev: Option<char> = None;
    for c in trimmed.chars() {
        if let Some(p) = prev {
            if (p.is_ascii_lowercase() || p.is_ascii_digit()) && c.is_ascii_uppercase() {
                out.push('_');
            }
        }
        out.push(c);
        prev = Some(c);
    }
    Some(out.to_uppercase())
}

/// Collapse a spelling for case- and separator-insensitive comparison
fn collapsed(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .flat_map(char::to_uppercase)
        .collect()
}

/// Bidirectional loan ⇄ pricing table for one semantic enum field
#[derive(Debug, Clone, Copy)]
pub struct EnumDomain {
    name: &'static str,
    pairs: &'static [(&'static str, &'static str)],
}

impl EnumDomain {
    /// Create domain from `(loan key, pricing value)` pairs
    #[must_use]
    pub const fn new(name: &'static str, pairs: &'static [(&'static str, &'static str)]) -> Self {
        Self { name, pairs }
    }

    /// Domain name for diagnostics
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// All `(loan key, pricing value)` pairs
    #[inline]
    #[must_use]
    pub const fn pairs(&self) -> &'static [(&'static str, &'static str)] {
        self.pairs
    }

    /// Check if `key` is a loan-side spelling of this domain
    #[must_use]
    pub fn is_loan_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(l, _)| *l == key)
    }

    /// Check if `value` is a pricing-side spelling of this domain
    #[must_use]
    pub fn is_pricing_value(&self, value: &str) -> bool {
        self.pairs.iter().any(|(_, p)| *p == value)
    }

    /// Loan spelling → pricing spelling
    ///
    /// Looks the normalized key up in the forward table; an input that is
    /// already a known pricing spelling is accepted as that spelling.
    /// Anything else is `None` so the caller applies its fallback.
    #[must_use]
    pub fn to_pricing(&self, value: &Value) -> Option<&'static str> {
        if let Some(hit) = map_enum_normalized(value, self.pairs) {
            return Some(hit);
        }
        let needle = collapsed(&normalize_enum_key(value)?);
        self.pairs
            .iter()
            .find(|(_, p)| collapsed(p) == needle)
            .map(|(_, p)| *p)
    }

    /// Pricing spelling → loan spelling
    ///
    /// Tries the reverse table first, then an input that is already a loan
    /// key, then [`pascal_to_screaming`] when the result is a known loan key.
    #[must_use]
    pub fn to_loan(&self, value: &Value) -> Option<&'static str> {
        let key = normalize_enum_key(value)?;
        let needle = collapsed(&key);
        if let Some((loan, _)) = self.pairs.iter().find(|(_, p)| collapsed(p) == needle) {
            return Some(loan);
        }
        if let Some((loan, _)) = self.pairs.iter().find(|(l, _)| *l == key) {
            return Some(loan);
        }
        let screaming = value.as_str().and_then(pascal_to_screaming)?;
        self.pairs
            .iter()
            .find(|(l, _)| *l == screaming)
            .map(|(l, _)| *l)
    }
}

/// UI integer code → pricing spelling for one enum field
#[derive(Debug, Clone, Copy)]
pub struct UiCodeTable {
    name: &'static str,
    codes: &'static [(i64, &'static str)],
}

impl UiCodeTable {
    /// Create table from `(code, pricing value)` pairs
    #[must_use]
    pub const fn new(name: &'static str, codes: &'static [(i64, &'static str)]) -> Self {
        Self { name, codes }
    }

    /// Table name for diagnostics
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// All `(code, pricing value)` pairs
    #[inline]
    #[must_use]
    pub const fn codes(&self) -> &'static [(i64, &'static str)] {
        self.codes
    }

    fn by_code(&self, code: i64) -> Option<&'static str> {
        self.codes.iter().find(|(c, _)| *c == code).map(|(_, v)| *v)
    }

    /// Resolve a UI value
    ///
    /// Integer codes (as numbers or decimal strings) map through the table.
    /// A string that already is one of the table's values, compared without
    /// case or separators, is accepted. Everything else is `None`.
    #[must_use]
    pub fn lookup(&self, value: &Value) -> Option<&'static str> {
        match value {
            Value::Number(n) => {
                let code = n.as_i64().or_else(|| {
                    n.as_f64()
                        .filter(|f| f.fract() == 0.0 && f.abs() < 1e15)
                        .map(|f| f as i64)
                })?;
                self.by_code(code)
            }
            Value::String(s) => {
                let trimmed = s.trim();
                if let Ok(code) = trimmed.parse::<i64>() {
                    return self.by_code(code);
                }
                let needle = collapsed(trimmed);
                if needle.is_empty() {
                    return None;
                }
                self.codes
                    .iter()
                    .find(|(_, v)| collapsed(v) == needle)
                    .map(|(_, v)| *v)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize_enum_key(&json!("not specified")).as_deref(), Some("NOT_SPECIFIED"));
        assert_eq!(normalize_enum_key(&json!("Not_Specified")).as_deref(), Some("NOT_SPECIFIED"));
        assert_eq!(normalize_enum_key(&json!("  NOT   SPECIFIED ")).as_deref(), Some("NOT_SPECIFIED"));
        assert_eq!(normalize_enum_key(&json!(1099)).as_deref(), Some("1099"));
        assert_eq!(normalize_enum_key(&json!("   ")), None);
        assert_eq!(normalize_enum_key(&Value::Null), None);
    }

    #[test]
    fn casing_helpers() {
        assert_eq!(screaming_to_pascal("FIRST_USE").as_deref(), Some("FirstUse"));
        assert_eq!(screaming_to_pascal("").as_deref(), None);
        assert_eq!(pascal_to_screaming("NotSpecified").as_deref(), Some("NOT_SPECIFIED"));
        assert_eq!(pascal_to_screaming("Method1099").as_deref(), Some("METHOD1099"));
        assert_eq!(pascal_to_screaming("SFR").as_deref(), Some("SFR"));
        assert_eq!(pascal_to_screaming(" ").as_deref(), None);
    }

    #[test]
    fn domain_forward_lookup() {
        assert_eq!(AUS.to_pricing(&json!("not specified")), Some("NotSpecified"));
        assert_eq!(AUS.to_pricing(&json!("NotSpecified")), Some("NotSpecified"));
        assert_eq!(OCCUPANCY.to_pricing(&json!("PRIMARY")), Some("PrimaryResidence"));
        assert_eq!(VERIFICATION_METHOD.to_pricing(&json!(1099)), Some("Method1099"));
        assert_eq!(AUS.to_pricing(&json!("BOGUS")), None);
    }

    #[test]
    fn domain_reverse_lookup() {
        assert_eq!(OCCUPANCY.to_loan(&json!("PrimaryResidence")), Some("PRIMARY"));
        assert_eq!(IMPOUNDS.to_loan(&json!("Partial")), Some("PARTIAL"));
        assert_eq!(PROPERTY_TYPE.to_loan(&json!("TwoFourUnit")), Some("MULTI_UNIT"));
        assert_eq!(VERIFICATION_METHOD.to_loan(&json!("Method1099")), Some("1099"));
        assert_eq!(AUS.to_loan(&json!("NOT_SPECIFIED")), Some("NOT_SPECIFIED"));
        assert_eq!(AUS.to_loan(&json!("Sideways")), None);
    }

    #[test]
    fn every_domain_round_trips() {
        for domain in ALL_DOMAINS {
            for (loan, pricing) in domain.pairs() {
                assert_eq!(
                    domain.to_pricing(&json!(loan)),
                    Some(*pricing),
                    "{} forward {loan}",
                    domain.name()
                );
                assert_eq!(
                    domain.to_loan(&json!(pricing)),
                    Some(*loan),
                    "{} reverse {pricing}",
                    domain.name()
                );
            }
        }
    }

    #[test]
    fn ui_codes_and_names() {
        assert_eq!(UI_LOAN_PURPOSE.lookup(&json!(1)), Some("Purchase"));
        assert_eq!(UI_LOAN_PURPOSE.lookup(&json!("7")), Some("CashOutRefinance"));
        assert_eq!(UI_LOAN_PURPOSE.lookup(&json!(7.0)), Some("CashOutRefinance"));
        assert_eq!(UI_IMPOUNDS.lookup(&json!("partial")), Some("Partial"));
        assert_eq!(UI_PROPERTY_TYPE.lookup(&json!(6)), Some("TwoFourUnit"));
        assert_eq!(UI_PROPERTY_TYPE.lookup(&json!(4)), None);
        assert_eq!(UI_AUS.lookup(&json!("garbage")), None);
        assert_eq!(UI_AUS.lookup(&json!(true)), None);
        assert_eq!(UI_AUS.lookup(&Value::Null), None);
    }
}
