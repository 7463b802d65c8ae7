//! Shape converters
//!
//! One authoritative converter per direction:
//!
//! | selector | input | output |
//! |----------|-------|--------|
//! | `ui-to-external` | [`UiPricingScenario`] | [`ExternalPricingScenario`] |
//! | `getloan-to-external` | [`LoanRecord`] | [`ExternalPricingScenario`] |
//! | `external-to-getloan` | [`ExternalPricingScenario`] | [`LoanRecord`] |
//!
//! Converters are pure: they borrow their input and build a fresh output.

mod external_to_loan;
mod loan_to_external;
mod ui_to_external;

pub use external_to_loan::{external_to_get_loan, external_to_get_loan_at};
pub use loan_to_external::{
    build_pricing_borrower_from_loan, build_pricing_broker_comp_from_loan,
    build_pricing_loan_from_loan, build_pricing_property_from_loan,
    get_loan_to_external_pricing_scenario,
};
pub use ui_to_external::ui_to_external_pricing_scenario;

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use tracing::debug;

use crate::error::{Result, ShapeError};
use crate::types::{ExternalPricingScenario, LoanRecord, UiPricingScenario};

/// Conversion direction selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conversion {
    /// UI / PE3 input → pricing scenario
    UiToExternal,
    /// Loan → pricing scenario
    LoanToExternal,
    /// Pricing scenario → loan
    ExternalToLoan,
}

impl Conversion {
    /// Every supported conversion
    pub const ALL: [Self; 3] = [Self::UiToExternal, Self::LoanToExternal, Self::ExternalToLoan];

    /// Selector spelling used in routes and on the command line
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UiToExternal => "ui-to-external",
            Self::LoanToExternal => "getloan-to-external",
            Self::ExternalToLoan => "external-to-getloan",
        }
    }

    /// One-line description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::UiToExternal => "UI/PE3 pricing request to external pricing scenario",
            Self::LoanToExternal => "Loan (getLoan response) to external pricing scenario",
            Self::ExternalToLoan => "External pricing scenario to loan shape",
        }
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Conversion {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ShapeError::UnknownConversion(s.to_string()))
    }
}

/// Run a conversion over raw JSON
///
/// # Errors
///
/// - [`ShapeError::NotAnObject`] when `input` is not a JSON object
/// - [`ShapeError::Malformed`] when a section has the wrong structure
/// - [`ShapeError::Serialization`] if the output cannot be written
pub fn convert_json(conversion: Conversion, input: Value) -> Result<Value> {
    if !input.is_object() {
        return Err(ShapeError::NotAnObject);
    }
    debug!(%conversion, "converting payload");
    match conversion {
        Conversion::UiToExternal => {
            let out = ui_to_external_pricing_scenario(&UiPricingScenario::new(input));
            to_json("pricing scenario", &out)
        }
        Conversion::LoanToExternal => {
            let loan = LoanRecord::from_json(input)?;
            to_json("pricing scenario", &get_loan_to_external_pricing_scenario(&loan))
        }
        Conversion::ExternalToLoan => {
            let external = ExternalPricingScenario::from_json(input)?;
            to_json("loan", &external_to_get_loan(&external))
        }
    }
}

fn to_json<T: serde::Serialize>(shape: &'static str, value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|source| ShapeError::Serialization { shape, source })
}

/// Optional string as a JSON value for enum lookups
pub(crate) fn text(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |s| Value::String(s.to_string()))
}

/// Owned copy of a string that is present and non-empty
pub(crate) fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}

/// Owned copy of a string, `""` when absent
pub(crate) fn or_blank(value: Option<&str>) -> Option<String> {
    Some(value.unwrap_or_default().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn selector_round_trip() {
        for c in Conversion::ALL {
            assert_eq!(c.as_str().parse::<Conversion>().unwrap(), c);
        }
        assert!(matches!(
            "sideways".parse::<Conversion>(),
            Err(ShapeError::UnknownConversion(s)) if s == "sideways"
        ));
    }

    #[test]
    fn non_object_input_is_rejected() {
        let err = convert_json(Conversion::LoanToExternal, json!([1, 2])).unwrap_err();
        assert!(matches!(err, ShapeError::NotAnObject));
    }

    #[test]
    fn malformed_section_is_rejected() {
        let err = convert_json(Conversion::ExternalToLoan, json!({"borrower": "x"})).unwrap_err();
        assert!(matches!(err, ShapeError::Malformed { .. }));
    }

    #[test]
    fn ui_conversion_never_fails_on_objects() {
        let out = convert_json(Conversion::UiToExternal, json!({"Search": 5})).unwrap();
        assert_eq!(out["audienceId"], json!("Retail"));
    }
}
