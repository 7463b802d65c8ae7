use serde_json::Value;
use tracing::{debug, warn};

use super::{EnumDomain, UiCodeTable};

/// What a field resolves to when its input is absent or unmapped
///
/// `None` in a slot means the field is omitted (pricing) or `null` (loan).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fallback {
    /// Loan-shape fallback
    pub loan: Option<&'static str>,
    /// Pricing-shape fallback when reading a loan
    pub pricing: Option<&'static str>,
    /// Pricing-shape fallback when reading UI input
    pub ui: Option<&'static str>,
}

impl Fallback {
    /// No fallback anywhere
    pub const OMIT: Self = Self {
        loan: None,
        pricing: None,
        ui: None,
    };

    /// Same sentinel on both sides
    #[must_use]
    pub const fn everywhere(loan: &'static str, pricing: &'static str) -> Self {
        Self {
            loan: Some(loan),
            pricing: Some(pricing),
            ui: Some(pricing),
        }
    }

    /// Pricing sentinel only; the loan side stays `null`
    #[must_use]
    pub const fn pricing_only(pricing: &'static str) -> Self {
        Self {
            loan: None,
            pricing: Some(pricing),
            ui: Some(pricing),
        }
    }
}

/// One semantic enum field: its domain, UI codes and fallback policy
#[derive(Debug, Clone, Copy)]
pub struct EnumField {
    name: &'static str,
    domain: EnumDomain,
    ui: Option<UiCodeTable>,
    fallback: Fallback,
}

impl EnumField {
    /// Create field policy
    #[must_use]
    pub const fn new(
        name: &'static str,
        domain: EnumDomain,
        ui: Option<UiCodeTable>,
        fallback: Fallback,
    ) -> Self {
        Self {
            name,
            domain,
            ui,
            fallback,
        }
    }

    /// Field name for diagnostics
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Loan ⇄ pricing domain
    #[inline]
    #[must_use]
    pub const fn domain(&self) -> EnumDomain {
        self.domain
    }

    /// Fallback policy
    #[inline]
    #[must_use]
    pub const fn fallback(&self) -> Fallback {
        self.fallback
    }

    /// Loan value → pricing spelling, else the pricing fallback
    #[must_use]
    pub fn loan_to_pricing(&self, value: &Value) -> Option<&'static str> {
        self.domain.to_pricing(value).or_else(|| {
            if !value.is_null() {
                debug!(field = self.name, ?value, fallback = ?self.fallback.pricing, "unmapped loan enum value");
            }
            self.fallback.pricing
        })
    }

    /// Pricing value → loan spelling, else the loan fallback
    #[must_use]
    pub fn pricing_to_loan(&self, value: &Value) -> Option<&'static str> {
        self.domain.to_loan(value).or_else(|| {
            if !value.is_null() {
                debug!(field = self.name, ?value, fallback = ?self.fallback.loan, "unmapped pricing enum value");
            }
            self.fallback.loan
        })
    }

    /// UI code or spelling → pricing spelling, else the UI fallback
    ///
    /// A present value that does not resolve is logged at `warn`.
    #[must_use]
    pub fn ui_to_pricing(&self, value: &Value) -> Option<&'static str> {
        let resolved = match self.ui {
            Some(table) => table.lookup(value),
            None => self.domain.to_pricing(value),
        };
        resolved.or_else(|| {
            let blank = value.is_null() || value.as_str().is_some_and(|s| s.trim().is_empty());
            if !blank {
                warn!(field = self.name, ?value, fallback = ?self.fallback.ui, "unknown UI enum code");
            }
            self.fallback.ui
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::policy::*;
    use serde_json::json;

    #[test]
    fn loan_side_fallbacks() {
        assert_eq!(AUS_FIELD.loan_to_pricing(&json!("GARBAGE")), Some("NotSpecified"));
        assert_eq!(AUS_FIELD.loan_to_pricing(&json!(null)), Some("NotSpecified"));
        assert_eq!(PURPOSE_FIELD.loan_to_pricing(&json!("GARBAGE")), None);
        assert_eq!(STREAMLINE_FIELD.loan_to_pricing(&json!(null)), Some("None"));
    }

    #[test]
    fn pricing_side_fallbacks() {
        assert_eq!(OCCUPANCY_FIELD.pricing_to_loan(&json!("Castle")), Some("PRIMARY"));
        assert_eq!(STREAMLINE_FIELD.pricing_to_loan(&json!("None")), Some("NONE"));
        assert_eq!(STREAMLINE_FIELD.pricing_to_loan(&json!(null)), None);
        assert_eq!(VERIFICATION_METHOD_FIELD.pricing_to_loan(&json!("Bogus")), None);
    }

    #[test]
    fn ui_side_fallbacks() {
        assert_eq!(PURPOSE_FIELD.ui_to_pricing(&json!(99)), Some("Purchase"));
        assert_eq!(IMPOUNDS_FIELD.ui_to_pricing(&json!(1)), Some("Partial"));
        assert_eq!(CREDIT_GRADE_FIELD.ui_to_pricing(&json!("zzz")), None);
        assert_eq!(
            PREPAY_STRUCTURE_FIELD.ui_to_pricing(&json!("PPS_5_5")),
            Some("Pps55")
        );
    }
}
