//! Field-definition derivation for the loan-creation form
//!
//! A sample loan document is flattened to dotted paths. Each path gets a
//! [`FieldDefinition`] describing whether it is required, whether the
//! sample holds `null`, a detected string format and any known enum
//! values. The definitions drive the initial form state and the rebuild of
//! a nested payload from the edited flat form.
//!
//! Only top-level keys can be required. A nested path such as
//! `borrower.firstName` is never required, even when its parent is.

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::decimal::is_decimal_literal;

/// Flat form: dotted path → leaf value, in document order
pub type FlatMap = IndexMap<String, Value>;

/// Top-level loan keys the loan service requires
pub const REQUIRED_TOP_LEVEL: &[&str] = &[
    "amortizationType",
    "amount",
    "aus",
    "borrower",
    "cashOutAmount",
    "cltv",
    "customValues",
    "documentationType",
    "externalCreatedAt",
    "externalModifiedAt",
    "fhaTotalLoanAmount",
    "fundedAt",
    "hcltv",
    "helocDrawAmount",
    "helocLineAmount",
    "impoundType",
    "isMortgageInsurancePaidByBorrower",
    "isRelocationLoan",
    "isSecondCommunityLoan",
    "isSecondInvestorSameAsFirst",
    "isSecondPiggyback",
    "lenderFee",
    "loanNumber",
    "loanTerm",
    "loanType",
    "loanofficer",
    "losLoanId",
    "ltv",
    "position",
    "prepaymentPenaltyPeriodMonths",
    "productCode",
    "productName",
    "property",
    "propertyValue",
    "purchasePrice",
    "purpose",
    "rate",
    "refinancePurpose",
    "rollLenderFee",
    "secondAmount",
    "temporaryBuydownType",
    "usdaTotalLoanAmount",
    "vaTotalLoanAmount",
];

const CUSTOM_VALUES: &str = "customValues";

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is valid"));
static DATE_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T").expect("date-time pattern is valid"));

/// Check if a path is a required top-level key
#[must_use]
pub fn is_required_key(key: &str) -> bool {
    !key.contains('.') && REQUIRED_TOP_LEVEL.contains(&key)
}

/// String format detected from a sample value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldFormat {
    /// `YYYY-MM-DD`
    Date,
    /// `YYYY-MM-DDT...`
    DateTime,
    /// Numeric string
    Decimal,
}

impl FieldFormat {
    /// Detect the format of a sample string
    #[must_use]
    pub fn detect(sample: &str) -> Option<Self> {
        if DATE_RE.is_match(sample) {
            Some(Self::Date)
        } else if DATE_TIME_RE.is_match(sample) {
            Some(Self::DateTime)
        } else if is_decimal_literal(sample.trim()) {
            Some(Self::Decimal)
        } else {
            None
        }
    }

    /// Wire spelling
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::DateTime => "date-time",
            Self::Decimal => "decimal",
        }
    }
}

/// One form field derived from a sample document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Dotted path, e.g. `borrower.firstName`
    pub key: String,
    /// Top-level and in [`REQUIRED_TOP_LEVEL`]
    pub is_required: bool,
    /// Sample value was `null`
    pub is_nullable: bool,
    /// Detected string format
    pub format: Option<FieldFormat>,
    /// Allowed values, when known
    pub enum_values: Option<Vec<Value>>,
}

impl FieldDefinition {
    /// Check if the field sits at the top level
    #[inline]
    #[must_use]
    pub fn is_top_level(&self) -> bool {
        !self.key.contains('.')
    }

    /// Form label for the field
    #[must_use]
    pub fn label(&self) -> String {
        humanize_label(&self.key)
    }
}

/// Enum values by field name, read from an enumeration document
///
/// The document maps a field name or dotted path to `{"enum": [...]}`;
/// entries without an `enum` array are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumMetadata {
    values: IndexMap<String, Vec<Value>>,
}

impl EnumMetadata {
    /// Read from a `{field: {enum: [...]}}` document
    #[must_use]
    pub fn from_json(document: &Value) -> Self {
        let values = document
            .as_object()
            .into_iter()
            .flatten()
            .filter_map(|(field, spec)| {
                let list = spec.get("enum")?.as_array()?;
                Some((field.clone(), list.clone()))
            })
            .collect();
        Self { values }
    }

    /// Values for a path, else for its last segment
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&[Value]> {
        self.values
            .get(key)
            .or_else(|| self.values.get(last_segment(key)))
            .map(Vec::as_slice)
    }

    /// Number of fields with known values
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no field has known values
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn last_segment(key: &str) -> &str {
    key.rsplit('.').next().unwrap_or(key)
}

/// Flatten an object to dotted paths
///
/// Arrays and scalars are leaves. Empty nested objects produce no paths.
/// A non-object input flattens to an empty map.
#[must_use]
pub fn flatten(value: &Value) -> FlatMap {
    let mut out = FlatMap::new();
    if let Value::Object(map) = value {
        flatten_into(map, "", &mut out);
    }
    out
}

fn flatten_into(map: &Map<String, Value>, prefix: &str, out: &mut FlatMap) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(inner) => flatten_into(inner, &path, out),
            leaf => {
                out.insert(path, leaf.clone());
            }
        }
    }
}

/// Rebuild a nested object from dotted paths
///
/// A scalar already sitting where a path needs an object is replaced.
#[must_use]
pub fn unflatten(flat: &FlatMap) -> Value {
    let mut root = Map::new();
    for (path, value) in flat {
        let parts: Vec<&str> = path.split('.').collect();
        insert_path(&mut root, &parts, value.clone());
    }
    Value::Object(root)
}

fn insert_path(map: &mut Map<String, Value>, path: &[&str], value: Value) {
    match path {
        [] => {}
        [leaf] => {
            map.insert((*leaf).to_string(), value);
        }
        [head, rest @ ..] => {
            let slot = map
                .entry((*head).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            if let Value::Object(inner) = slot {
                insert_path(inner, rest, value);
            }
        }
    }
}

/// Derive one definition per flattened path of `sample`
#[must_use]
pub fn derive_field_definitions(sample: &Value, enums: &EnumMetadata) -> Vec<FieldDefinition> {
    flatten(sample)
        .into_iter()
        .map(|(key, value)| FieldDefinition {
            is_required: is_required_key(&key),
            is_nullable: value.is_null(),
            format: value.as_str().and_then(FieldFormat::detect),
            enum_values: enums.lookup(&key).map(<[Value]>::to_vec),
            key,
        })
        .collect()
}

/// Realistic default for a required top-level key
///
/// Timestamps use `now`. Keys without a known default get `""`.
#[must_use]
pub fn required_default(key: &str, now: DateTime<Utc>) -> Value {
    let text = |s: &str| Value::String(s.to_string());
    match key {
        "amortizationType" => text("FIXED"),
        "amount" => text("350000.00"),
        "aus" => text("NONE"),
        "cltv" | "hcltv" | "ltv" => text("80.00"),
        "cashOutAmount" | "fhaTotalLoanAmount" | "helocDrawAmount" | "helocLineAmount"
        | "lenderFee" | "secondAmount" | "usdaTotalLoanAmount" | "vaTotalLoanAmount" => text("0.00"),
        "documentationType" => text("FULL_DOCUMENTATION"),
        "externalCreatedAt" | "externalModifiedAt" => {
            Value::String(now.to_rfc3339_opts(SecondsFormat::Millis, true))
        }
        "impoundType" | "refinancePurpose" | "temporaryBuydownType" => text("NONE"),
        "isMortgageInsurancePaidByBorrower"
        | "isRelocationLoan"
        | "isSecondCommunityLoan"
        | "isSecondInvestorSameAsFirst"
        | "isSecondPiggyback"
        | "rollLenderFee" => Value::Bool(false),
        "loanNumber" => text("LN-10001"),
        "loanTerm" => Value::from(360),
        "loanType" => text("CONVENTIONAL"),
        "losLoanId" => text("LOS-10001"),
        "position" => text("FIRST"),
        "prepaymentPenaltyPeriodMonths" => Value::from(0),
        "productCode" => text("TESTCODE"),
        "productName" => text("Test Product"),
        "propertyValue" | "purchasePrice" => text("400000.00"),
        "purpose" => text("PURCHASE"),
        "rate" => text("6.500"),
        _ => text(""),
    }
}

/// Initial form state for a set of definitions
///
/// - required, non-nullable: realistic default
/// - required, nullable: blank
/// - optional: the sample's non-null scalar, else left out
///
/// `customValues` is always `{}`; its entries are not seeded as flat keys.
#[must_use]
pub fn initial_form_state(defs: &[FieldDefinition], sample: &Value) -> FlatMap {
    initial_form_state_at(defs, sample, Utc::now())
}

/// [`initial_form_state`] with an explicit timestamp for date defaults
#[must_use]
pub fn initial_form_state_at(defs: &[FieldDefinition], sample: &Value, now: DateTime<Utc>) -> FlatMap {
    let flat = flatten(sample);
    let mut form = FlatMap::new();

    let custom_prefix = format!("{CUSTOM_VALUES}.");
    for def in defs {
        if def.key.starts_with(&custom_prefix) {
            continue;
        }
        if def.is_required && def.is_top_level() {
            let value = if def.is_nullable {
                Value::String(String::new())
            } else {
                required_default(&def.key, now)
            };
            form.insert(def.key.clone(), value);
            continue;
        }
        match flat.get(&def.key) {
            Some(Value::Null | Value::Array(_) | Value::Object(_)) | None => {}
            Some(scalar) => {
                form.insert(def.key.clone(), scalar.clone());
            }
        }
    }

    form.insert(CUSTOM_VALUES.to_string(), Value::Object(Map::new()));
    form
}

/// Rebuild the nested payload from an edited flat form
///
/// - required, non-nullable: copied when present
/// - required, nullable: `""` becomes `null`
/// - optional: copied only when present
///
/// `customValues` is forced to `{}` when absent or `null`.
#[must_use]
pub fn build_payload_from_form(defs: &[FieldDefinition], form: &FlatMap) -> Value {
    let mut flat = FlatMap::new();

    for def in defs {
        let Some(value) = form.get(&def.key) else {
            continue;
        };
        let value = if def.is_required && def.is_nullable && value.as_str() == Some("") {
            Value::Null
        } else {
            value.clone()
        };
        flat.insert(def.key.clone(), value);
    }

    let mut payload = unflatten(&flat);
    if let Value::Object(root) = &mut payload {
        let slot = root.entry(CUSTOM_VALUES).or_insert(Value::Null);
        if slot.is_null() {
            *slot = Value::Object(Map::new());
        }
    }
    payload
}

/// Human-readable label from the last path segment
///
/// `borrower.isFirstTimeHomeBuyer` → `Is First Time Home Buyer`.
#[must_use]
pub fn humanize_label(key: &str) -> String {
    let last = last_segment(key);
    let mut out = String::with_capacity(last.len() + 8);
    for (i, c) in last.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else {
            if c.is_ascii_uppercase() {
                out.push(' ');
            }
            out.push(c);
        }
    }
    out.trim().to_string()
}
