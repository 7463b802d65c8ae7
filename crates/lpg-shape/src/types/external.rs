//! Pricing-scenario shape (`QuoteScenarioRequest`)
//!
//! Enums are `PascalCase`. Decimals are strings or omitted, never `null`
//! and never JSON numbers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::custom_values::CustomValues;
use super::lenient;
use crate::decimal::MaybeDecimal;

/// Pricing-scenario request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExternalPricingScenario {
    /// Audience (`Retail`, `Wholesale`, ...)
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub audience_id: Option<String>,
    /// Top-level loan purpose
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub purpose: Option<String>,
    /// Product search filters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<ExternalSearch>,
    /// Borrower
    #[serde(deserialize_with = "lenient::section")]
    pub borrower: ExternalBorrower,
    /// Loan
    #[serde(deserialize_with = "lenient::section")]
    pub loan: ExternalLoan,
    /// Subject property
    #[serde(deserialize_with = "lenient::section")]
    pub property: ExternalProperty,
    /// Broker compensation plan
    #[serde(deserialize_with = "lenient::section")]
    pub broker_comp_plan: ExternalBrokerCompPlan,
    /// Caller-defined attributes
    pub custom_values: CustomValues,
    /// Manual price adjustments
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::values")]
    pub adjustments: Option<Vec<Value>>,
    /// Response settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<ExternalSettings>,
}

/// Product search filters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct ExternalSearch {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub position: Option<String>,
    #[serde(deserialize_with = "lenient::int")]
    pub desired_lock_period: Option<i64>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub include_interest_only_products: Option<bool>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub loan_types: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub amortization_types: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub loan_terms: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub arm_fixed_terms: Vec<String>,
}

/// Pricing-side borrower
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct ExternalBorrower {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub last_name: Option<String>,
    #[serde(deserialize_with = "lenient::int")]
    pub fico: Option<i64>,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub dti_ratio: MaybeDecimal,
    #[serde(deserialize_with = "lenient::int")]
    pub months_of_reserves: Option<i64>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_non_occupancy_borrower: Option<bool>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_non_occupancy_coborrower: Option<bool>,
    #[serde(deserialize_with = "lenient::int")]
    pub properties_owned: Option<i64>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_self_employed: Option<bool>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub multiple_borrower_pairs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub verification_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub credit_grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub citizenship: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub employment_documentation_method: Option<String>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_non_traditional_credit: Option<bool>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_gift_funds: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::int")]
    pub residual_income: Option<i64>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_first_time_home_buyer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::int")]
    pub investor_experience: Option<i64>,
    #[serde(deserialize_with = "lenient::int")]
    pub full_doc_months: Option<i64>,
    #[serde(deserialize_with = "lenient::int")]
    pub cpa_pand_l_months: Option<i64>,
    /// Whole-dollar annual income
    #[serde(deserialize_with = "lenient::int")]
    pub annual_income: Option<i64>,
}

/// Pricing-side loan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct ExternalLoan {
    /// Purpose nested under `loan` (UI-derived requests put it here)
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub amount: MaybeDecimal,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub purchase_price: MaybeDecimal,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub property_value: MaybeDecimal,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub refinance_purpose: Option<String>,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub cash_out_amount: MaybeDecimal,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub second_amount: MaybeDecimal,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub heloc_line_amount: MaybeDecimal,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub heloc_draw_amount: MaybeDecimal,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_mortgage_insurance_paid_by_borrower: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub impounds: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub aus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub position: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub fha_financing_option: Option<String>,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub fha_mortgage_insurance_premium: MaybeDecimal,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub fha_mortgage_insurance_premium_amount: MaybeDecimal,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub fha_total_loan_amount: MaybeDecimal,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub fha_finance_amount: MaybeDecimal,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub fha_prior_endorsement_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub usda_financing_option: Option<String>,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub usda_guarantee_fee: MaybeDecimal,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub usda_guarantee_fee_amount: MaybeDecimal,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub usda_total_loan_amount: MaybeDecimal,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub usda_finance_amount: MaybeDecimal,

    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub va_financing_option: Option<String>,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub va_down_payment_amount: MaybeDecimal,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub va_down_payment: MaybeDecimal,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub va_loan_history: Option<String>,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub va_funding_fee: MaybeDecimal,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub va_funding_fee_amount: MaybeDecimal,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub va_total_loan_amount: MaybeDecimal,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub va_finance_amount: MaybeDecimal,
    #[serde(deserialize_with = "lenient::boolean")]
    pub va_funding_fee_exempt: Option<bool>,
    #[serde(rename = "vaCashoutLTV", skip_serializing_if = "MaybeDecimal::is_absent")]
    pub va_cashout_ltv: MaybeDecimal,
    #[serde(rename = "vaCashoutCLTV", skip_serializing_if = "MaybeDecimal::is_absent")]
    pub va_cashout_cltv: MaybeDecimal,
    #[serde(rename = "vaCashoutHCLTV", skip_serializing_if = "MaybeDecimal::is_absent")]
    pub va_cashout_hcltv: MaybeDecimal,

    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub application_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub streamline_refinance_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub temporary_buydown_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub prepayment_penalty_structure_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub prepayment_penalty_structure: Option<String>,
    #[serde(deserialize_with = "lenient::int")]
    pub prepayment_penalty_period_months: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub loan_type: Option<String>,

    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub ltv: MaybeDecimal,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub cltv: MaybeDecimal,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub hcltv: MaybeDecimal,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub lender_fee: MaybeDecimal,
    #[serde(deserialize_with = "lenient::boolean")]
    pub roll_lender_fee: Option<bool>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_second_community_loan: Option<bool>,
    /// Piggyback second; also read from `isSecondPiggyback`
    #[serde(
        rename = "isSecondPiggyBack",
        alias = "isSecondPiggyback",
        deserialize_with = "lenient::boolean"
    )]
    pub is_second_piggy_back: Option<bool>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_second_investor_same_as_first: Option<bool>,
    #[serde(deserialize_with = "lenient::int")]
    pub loan_term: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::int")]
    pub arm_fixed_term: Option<i64>,
}

/// Pricing-side subject property
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct ExternalProperty {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub county: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub property_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub occupancy: Option<String>,
    #[serde(deserialize_with = "lenient::int")]
    pub units: Option<i64>,
    #[serde(deserialize_with = "lenient::int")]
    pub stories: Option<i64>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_non_warrantable_project: Option<bool>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_condotel: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::boolean")]
    pub is_declining_market: Option<bool>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub inspection_waiver: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::boolean")]
    pub is_high_cost_county: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub address_line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub address_line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub county_fips_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub zip_code_plus_four: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub property_attachment_type: Option<String>,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub estimated_value: MaybeDecimal,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub appraised_value: MaybeDecimal,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub lot_size_in_acres: MaybeDecimal,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub median_income: MaybeDecimal,
}

/// Pricing-side broker compensation plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct ExternalBrokerCompPlan {
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub fixed_amount: MaybeDecimal,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub percent: MaybeDecimal,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub min_amount: MaybeDecimal,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub max_amount: MaybeDecimal,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub calculated_amount: MaybeDecimal,
    #[serde(skip_serializing_if = "MaybeDecimal::is_absent")]
    pub calculated_adjustment: MaybeDecimal,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub paid_by: Option<String>,
}

impl ExternalBrokerCompPlan {
    /// Check if no field carries a value
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Response settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct ExternalSettings {
    #[serde(deserialize_with = "lenient::string_list")]
    pub operations: Vec<String>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub return_terse_response: Option<bool>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub return_terse_product_response: Option<bool>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub return_ineligible_products: Option<bool>,
}

impl ExternalPricingScenario {
    /// Read a pricing scenario from JSON
    ///
    /// # Errors
    ///
    /// Returns [`crate::ShapeError::Malformed`] when a section has the wrong
    /// structure (e.g. `loan` is a string).
    pub fn from_json(value: Value) -> crate::Result<Self> {
        serde_json::from_value(value).map_err(|e| crate::ShapeError::malformed("pricing scenario", e))
    }

    /// Purpose from the top level, else from `loan.purpose`
    #[must_use]
    pub fn effective_purpose(&self) -> Option<&str> {
        self.purpose.as_deref().or(self.loan.purpose.as_deref())
    }
}
